//! Command handlers, one module per top-level command.

pub mod config_cmd;
pub mod doorphones;
pub mod login;
pub mod open;
pub mod watch;

use std::time::Duration;

use ufanet_core::{Integration, IntegrationConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route an account command to its handler.
pub async fn dispatch(
    cmd: Command,
    config: IntegrationConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Doorphones(args) => doorphones::handle(config, args, global).await,
        Command::Open { id } => open::handle(config, id, global).await,
        Command::Login => login::handle(config, global).await,
        Command::Watch { interval } => watch::handle(config, interval, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
    }
}

/// Connect for a single command: first refresh only, no background polling.
pub(crate) async fn connect_once(config: IntegrationConfig) -> Result<Integration, CliError> {
    Ok(Integration::connect(config.with_refresh_interval(Duration::ZERO)).await?)
}
