use clap::{Args, Subcommand};
use tahfeez_core::SubscriptionStatus;

#[derive(Args)]
pub struct SubscriptionArgs {
    #[command(subcommand)]
    pub command: SubscriptionCommand,
}

#[derive(Subcommand)]
pub enum SubscriptionCommand {
    #[command(about = "List subscriptions")]
    List(SubscriptionListArgs),
    #[command(about = "Show the active subscription")]
    Active,
    #[command(about = "Show a subscription")]
    Get(SubscriptionIdArgs),
    #[command(about = "Subscribe to a package")]
    Create(SubscriptionCreateArgs),
    #[command(about = "Cancel a subscription")]
    Cancel(SubscriptionIdArgs),
    #[command(about = "Replace the scopes of a subscription")]
    Scopes(SubscriptionScopesArgs),
}

#[derive(Args)]
pub struct SubscriptionListArgs {
    #[arg(long, help = "pending, active, cancelled or expired")]
    pub status: Option<SubscriptionStatus>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Args)]
pub struct SubscriptionIdArgs {
    pub id: u64,
}

#[derive(Args)]
pub struct SubscriptionCreateArgs {
    #[arg(long)]
    pub package: u64,
    #[arg(long = "scope", help = "Scope id (repeatable)")]
    pub scopes: Vec<u64>,
    #[arg(long)]
    pub auto_renew: bool,
    #[arg(long, help = "Payment charge id returned by the payment provider")]
    pub charge_id: Option<String>,
}

#[derive(Args)]
pub struct SubscriptionScopesArgs {
    pub id: u64,
    #[arg(long = "scope", help = "Scope id (repeatable)")]
    pub scopes: Vec<u64>,
}

#[derive(Args)]
pub struct PaymentArgs {
    #[command(subcommand)]
    pub command: PaymentCommand,
}

#[derive(Subcommand)]
pub enum PaymentCommand {
    #[command(about = "Check the status of a charge")]
    Verify(PaymentVerifyArgs),
    #[command(about = "Forward a payment provider webhook payload")]
    Webhook(PaymentWebhookArgs),
}

#[derive(Args)]
pub struct PaymentVerifyArgs {
    pub charge_id: String,
}

#[derive(Args)]
pub struct PaymentWebhookArgs {
    #[arg(help = "JSON payload")]
    pub payload: String,
}
