// ── Background refresh loop ──

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::DoorphoneCache;

/// Periodically refresh the doorphone cache until cancelled.
///
/// The first refresh is expected to have happened during setup, so the
/// immediate tick is consumed. Failures are logged and the previous
/// snapshot stays in place.
pub(crate) async fn refresh_task(
    cache: Arc<DoorphoneCache>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                match cache.refresh().await {
                    Ok(count) => debug!(count, "periodic refresh complete"),
                    Err(e) => warn!(error = %e, "periodic refresh failed, keeping previous snapshot"),
                }
            }
        }
    }
    debug!("refresh task stopped");
}
