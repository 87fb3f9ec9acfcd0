use tahfeez_client::config::{
    config_path, load_config, parse_bool, read_config_file, write_config_file,
};
use tahfeez_client::ClientConfig;

use crate::cli_args::{ConfigArgs, ConfigCommand, ConfigSetArgs};
use crate::modules::shared::print_json;

pub(crate) fn handle_config_command(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => print_json(&load_config()?),
        ConfigCommand::Path => {
            println!("{}", config_path()?.display());
            Ok(())
        }
        ConfigCommand::Set(args) => {
            let path = config_path()?;
            let mut config = read_config_file(&path)?;
            apply_setting(&mut config, &args)?;
            config.validate()?;
            write_config_file(&path, &config)?;
            println!("{} = {}", args.key, args.value);
            Ok(())
        }
    }
}

pub(crate) fn apply_setting(config: &mut ClientConfig, args: &ConfigSetArgs) -> anyhow::Result<()> {
    let value = args.value.trim();
    match args.key.as_str() {
        "base_url" => config.base_url = value.to_string(),
        "api_version" => config.api_version = value.to_string(),
        "use_api" => config.use_api = parse_flag(value)?,
        "mock_auth" => config.mock_auth = parse_flag(value)?,
        "language" => config.language = value.parse()?,
        "timeout_secs" => config.timeout_secs = value.parse()?,
        "mock_delay_ms" => config.mock_delay_ms = value.parse()?,
        "storage" => config.storage = value.parse()?,
        other => anyhow::bail!("unknown config key: {other}"),
    }
    Ok(())
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    parse_bool(value).ok_or_else(|| anyhow::anyhow!("expected true or false, got {value}"))
}
