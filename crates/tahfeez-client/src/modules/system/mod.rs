mod actions;
pub(crate) mod args;
mod config;

pub(crate) use actions::{handle_dashboard, handle_types_command};
pub(crate) use config::handle_config_command;
