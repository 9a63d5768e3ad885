//! Doorphone command handlers.

use tabled::Tabled;
use ufanet_core::{Doorphone, IntegrationConfig, unique_id_for};

use crate::cli::{DoorphonesArgs, DoorphonesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DoorphoneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Entity")]
    unique_id: String,
}

impl From<&Doorphone> for DoorphoneRow {
    fn from(d: &Doorphone) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.display_name().to_owned(),
            unique_id: unique_id_for(d.id),
        }
    }
}

/// Render a doorphone list in the selected format.
pub(crate) fn render(doorphones: &[Doorphone], global: &GlobalOpts) -> String {
    output::render_list(
        &global.output,
        doorphones,
        |d| DoorphoneRow::from(d),
        |d| d.id.to_string(),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: IntegrationConfig,
    args: DoorphonesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DoorphonesCommand::List => {
            let integration = super::connect_once(config).await?;
            let snap = integration.cache().snapshot();
            output::print_output(&render(&snap, global), global.quiet);
            integration.unload().await;
            Ok(())
        }
    }
}
