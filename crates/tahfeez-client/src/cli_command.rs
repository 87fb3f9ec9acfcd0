use tahfeez_client::Services;

use crate::cli_args::*;
use crate::modules::auth::{handle_login, handle_logout, handle_register, handle_status};
use crate::modules::billing::{handle_payment, handle_subscription};
use crate::modules::catalog::{handle_package, handle_scope};
use crate::modules::goals::handle_goal;
use crate::modules::messages::handle_message;
use crate::modules::system::handle_dashboard;

pub(crate) async fn handle_command(command: Command, services: &Services) -> anyhow::Result<()> {
    match command {
        Command::Login(args) => handle_login(args, services).await?,
        Command::Register(args) => handle_register(args, services).await?,
        Command::Logout => handle_logout(services).await?,
        Command::Status(args) => handle_status(args, services).await?,
        Command::Dashboard => handle_dashboard(services).await?,
        Command::Scopes(args) => handle_scope(args, services).await?,
        Command::Packages(args) => handle_package(args, services).await?,
        Command::Subscriptions(args) => handle_subscription(args, services).await?,
        Command::Goals(args) => handle_goal(args, services).await?,
        Command::Messages(args) => handle_message(args, services).await?,
        Command::Payments(args) => handle_payment(args, services).await?,
        Command::Config(_) | Command::Types(_) => {
            anyhow::bail!("config and types commands run without a session")
        }
    }

    Ok(())
}
