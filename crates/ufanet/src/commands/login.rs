//! `ufanet login`: check credentials without touching doorphones.

use ufanet_core::{Integration, IntegrationConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(config: IntegrationConfig, global: &GlobalOpts) -> Result<(), CliError> {
    Integration::validate_credentials(&config).await?;
    if !global.quiet {
        eprintln!(
            "Credentials accepted for contract {} at {}",
            config.credentials.username, config.base_url
        );
    }
    Ok(())
}
