use schemars::schema::RootSchema;
use schemars::schema_for;
use tahfeez_client::{DataSource, Services};
use tahfeez_core::{
    ApiResponse, Credentials, DashboardStats, Goal, LocaleFilter, Message, Package,
    PaymentVerification, RegisterRequest, Scope, Subscription, Tokens, User,
};

use crate::cli_args::TypesArgs;
use crate::modules::shared::{print_envelope, print_json};

pub(crate) async fn handle_dashboard(services: &Services) -> anyhow::Result<()> {
    print_envelope(
        services
            .data
            .dashboard_stats(LocaleFilter::default())
            .await,
    )
}

fn schemas() -> Vec<(&'static str, &'static str, RootSchema)> {
    vec![
        ("credentials", "Login request", schema_for!(Credentials)),
        ("register", "Registration request", schema_for!(RegisterRequest)),
        ("tokens", "Access/refresh token pair", schema_for!(Tokens)),
        ("user", "Account profile", schema_for!(User)),
        ("scope", "Life-domain category", schema_for!(Scope)),
        ("message", "Motivational message", schema_for!(Message)),
        ("goal", "Personal goal with progress", schema_for!(Goal)),
        ("package", "Subscription tier", schema_for!(Package)),
        ("subscription", "Package subscription", schema_for!(Subscription)),
        ("dashboard", "Dashboard statistics", schema_for!(DashboardStats)),
        ("payment", "Charge verification result", schema_for!(PaymentVerification)),
        ("envelope", "Response envelope", schema_for!(ApiResponse<serde_json::Value>)),
    ]
}

pub(crate) fn handle_types_command(args: TypesArgs) -> anyhow::Result<()> {
    let schemas = schemas();
    let Some(name) = args.name else {
        println!("TYPE          DESCRIPTION");
        for (name, description, _) in &schemas {
            println!("{name:<13} {description}");
        }
        return Ok(());
    };
    let Some((_, _, schema)) = schemas
        .into_iter()
        .find(|(candidate, _, _)| candidate.eq_ignore_ascii_case(name.trim()))
    else {
        anyhow::bail!("unknown type: {name}");
    };
    print_json(&schema)
}
