use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration")]
    Show,
    #[command(about = "Print the config file location")]
    Path,
    #[command(about = "Set a config value in the config file")]
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    #[arg(help = "base_url, api_version, use_api, mock_auth, language, timeout_secs, mock_delay_ms or storage")]
    pub key: String,
    pub value: String,
}

#[derive(Args)]
pub struct TypesArgs {
    #[arg(help = "Print the JSON schema of one type")]
    pub name: Option<String>,
}
