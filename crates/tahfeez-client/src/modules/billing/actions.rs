use tahfeez_client::{DataSource, Services};
use tahfeez_core::{LocaleFilter, NewSubscription, SubscriptionFilters};

use crate::cli_args::{PaymentArgs, PaymentCommand, SubscriptionArgs, SubscriptionCommand};
use crate::modules::shared::print_envelope;

pub(crate) async fn handle_subscription(
    args: SubscriptionArgs,
    services: &Services,
) -> anyhow::Result<()> {
    let data = services.data.as_ref();
    match args.command {
        SubscriptionCommand::List(args) => {
            let filters = SubscriptionFilters {
                status: args.status,
                page: args.page,
                page_size: args.page_size,
                language: None,
            };
            print_envelope(data.subscriptions(filters).await)
        }
        SubscriptionCommand::Active => {
            print_envelope(data.active_subscription(LocaleFilter::default()).await)
        }
        SubscriptionCommand::Get(args) => print_envelope(data.subscription(args.id).await),
        SubscriptionCommand::Create(args) => {
            let request = NewSubscription {
                package: args.package,
                scopes: args.scopes,
                auto_renew: args.auto_renew,
                charge_id: args.charge_id,
            };
            print_envelope(data.create_subscription(request).await)
        }
        SubscriptionCommand::Cancel(args) => print_envelope(data.cancel_subscription(args.id).await),
        SubscriptionCommand::Scopes(args) => {
            print_envelope(data.update_subscription_scopes(args.id, args.scopes).await)
        }
    }
}

pub(crate) async fn handle_payment(args: PaymentArgs, services: &Services) -> anyhow::Result<()> {
    let data = services.data.as_ref();
    match args.command {
        PaymentCommand::Verify(args) => print_envelope(data.verify_payment(&args.charge_id).await),
        PaymentCommand::Webhook(args) => {
            let payload: serde_json::Value = serde_json::from_str(&args.payload)
                .map_err(|err| anyhow::anyhow!("payload is not valid JSON: {err}"))?;
            print_envelope(data.payment_webhook(payload).await)
        }
    }
}
