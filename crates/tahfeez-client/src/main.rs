use clap::Parser;
use std::io::{self, Write};

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::system::{handle_config_command, handle_types_command};
use tahfeez_client::config::{config_dir, load_config};
use tahfeez_client::{open_store, Services};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Config(args) => return handle_config_command(args),
        Command::Types(args) => return handle_types_command(args),
        _ => {}
    }

    let mut config = load_config()?;
    if cli.api {
        config.use_api = true;
    }
    if cli.mock {
        config.use_api = false;
    }
    if let Some(language) = cli.lang {
        config.language = language;
    }

    let store = open_store(config.storage, config_dir()?);
    let services = Services::create(config, store)?;
    let result = handle_command(cli.command, &services).await;
    services.dispose();
    result
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    let mut input = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub(crate) fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;
    if password.trim().is_empty() {
        anyhow::bail!("password is required");
    }
    Ok(password)
}
