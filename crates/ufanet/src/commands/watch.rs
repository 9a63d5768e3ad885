//! `ufanet watch`: run the integration in the foreground.
//!
//! Sets up with a console registry, prints the list after every refresh
//! that changes it, and reports availability flips until Ctrl-C.

use std::time::Duration;

use tracing::info;
use ufanet_core::{Availability, DoorphoneLock, EntityRegistry, Integration, IntegrationConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::doorphones;

/// Announces registered locks on stderr.
struct ConsoleRegistry {
    quiet: bool,
}

impl EntityRegistry for ConsoleRegistry {
    fn add_locks(&self, locks: Vec<DoorphoneLock>) {
        for lock in &locks {
            info!(unique_id = %lock.unique_id(), name = %lock.name(), "lock registered");
        }
        if !self.quiet {
            eprintln!("Registered {} doorphone lock(s)", locks.len());
        }
    }
}

pub async fn handle(
    config: IntegrationConfig,
    interval: Option<u64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let config = match interval {
        Some(0) => {
            return Err(CliError::Validation {
                field: "interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Some(secs) => config.with_refresh_interval(Duration::from_secs(secs)),
        None => config,
    };
    if config.refresh_interval.is_zero() {
        return Err(CliError::Validation {
            field: "refresh_interval".into(),
            reason: "watch needs a non-zero refresh interval".into(),
        });
    }

    let registry = ConsoleRegistry {
        quiet: global.quiet,
    };
    let integration = Integration::setup(config, &registry).await?;
    let cache = integration.cache();

    let mut snapshot_rx = cache.subscribe();
    let mut availability_rx = cache.subscribe_availability();
    let mut shown = snapshot_rx.borrow_and_update().clone();
    let mut healthy = *availability_rx.borrow_and_update() == Availability::Available;
    output::print_output(&doorphones::render(&shown, global), global.quiet);

    if !global.quiet {
        eprintln!(
            "{}: refreshing every {}s, Ctrl-C to stop",
            integration.title(),
            integration.config().refresh_interval.as_secs()
        );
    }

    loop {
        tokio::select! {
            biased;

            _ = tokio::signal::ctrl_c() => break,

            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                // Every refresh publishes a new snapshot; print only real changes.
                let snap = snapshot_rx.borrow_and_update().clone();
                if snap != shown {
                    output::print_output(&doorphones::render(&snap, global), global.quiet);
                    shown = snap;
                }
            }

            changed = availability_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let availability = availability_rx.borrow_and_update().clone();
                match availability {
                    Availability::Unavailable { reason } => {
                        healthy = false;
                        eprintln!("Refresh failed, serving last known list: {reason}");
                    }
                    Availability::Available if !healthy => {
                        healthy = true;
                        if !global.quiet {
                            eprintln!("Service reachable again");
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    integration.unload().await;
    Ok(())
}
