//! `ufanet open <id>`

use ufanet_core::{DoorphoneId, IntegrationConfig, UnlockOutcome};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(config: IntegrationConfig, id: i64, global: &GlobalOpts) -> Result<(), CliError> {
    let integration = super::connect_once(config).await?;
    let lock = integration.lock(DoorphoneId(id))?;
    let name = lock.name();

    let result = match lock.unlock().await {
        UnlockOutcome::Opened => {
            if !global.quiet {
                eprintln!("Doorphone '{name}' opened");
            }
            Ok(())
        }
        UnlockOutcome::Refused => Err(CliError::OpenRefused { name }),
        UnlockOutcome::Failed { reason } => Err(CliError::OpenFailed { name, reason }),
    };

    integration.unload().await;
    result
}
