use clap::{ArgAction, Parser, Subcommand};
use tahfeez_core::Language;

pub use crate::modules::auth::args::*;
pub use crate::modules::billing::args::*;
pub use crate::modules::catalog::args::*;
pub use crate::modules::goals::args::*;
pub use crate::modules::messages::args::*;
pub use crate::modules::system::args::*;

#[derive(Parser)]
#[command(name = "tahfeez")]
#[command(about = "Tahfeez client")]
pub struct Cli {
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, conflicts_with = "mock", help = "Serve data from the live API")]
    pub api: bool,
    #[arg(long, help = "Serve data from the built-in demo data")]
    pub mock: bool,
    #[arg(long, help = "Response language (en or ar)")]
    pub lang: Option<Language>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Sign in")]
    Login(LoginArgs),
    #[command(about = "Create an account")]
    Register(RegisterArgs),
    #[command(about = "Sign out and forget the stored session")]
    Logout,
    #[command(about = "Show the current session")]
    Status(StatusArgs),
    #[command(about = "Show dashboard statistics")]
    Dashboard,
    Scopes(ScopeArgs),
    Packages(PackageArgs),
    Subscriptions(SubscriptionArgs),
    Goals(GoalArgs),
    Messages(MessageArgs),
    Payments(PaymentArgs),
    Config(ConfigArgs),
    #[command(about = "List payload types or print one JSON schema")]
    Types(TypesArgs),
}
