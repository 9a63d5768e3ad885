// ── Polling doorphone cache ──
//
// Holds the last successfully fetched doorphone list. Reads never touch
// the network; writes happen only through `refresh()`. Changes are
// broadcast to subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tracing::debug;

use ufanet_api::{Doorphone, DoorphoneId, SessionClient};

use crate::error::CoreError;

/// Immutable doorphone list, replaced wholesale on each refresh.
pub type Snapshot = Arc<Vec<Doorphone>>;

/// Health of the cache as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// No refresh has completed yet.
    Pending,
    /// The last refresh succeeded.
    Available,
    /// The last refresh failed; the snapshot is stale but still served.
    Unavailable { reason: String },
}

/// Periodically refreshed view of the account's doorphones.
pub struct DoorphoneCache {
    client: Arc<SessionClient>,
    /// Held across fetch and publish so refreshes apply in call order.
    refresh_lock: Mutex<()>,
    snapshot: watch::Sender<Snapshot>,
    availability: watch::Sender<Availability>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DoorphoneCache {
    pub fn new(client: Arc<SessionClient>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (availability, _) = watch::channel(Availability::Pending);
        let (last_refresh, _) = watch::channel(None);

        Self {
            client,
            refresh_lock: Mutex::new(()),
            snapshot,
            availability,
            last_refresh,
        }
    }

    /// Fetch the doorphone list and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept and the availability
    /// signal flips to [`Availability::Unavailable`]. Returns the number
    /// of doorphones in the new snapshot. Concurrent calls are serialized,
    /// so an older response never replaces a newer one.
    pub async fn refresh(&self) -> Result<usize, CoreError> {
        let _guard = self.refresh_lock.lock().await;
        match self.client.list_doorphones().await {
            Ok(doorphones) => {
                let count = doorphones.len();
                self.snapshot.send_replace(Arc::new(doorphones));
                self.last_refresh.send_replace(Some(Utc::now()));
                self.availability.send_replace(Availability::Available);
                debug!(count, "doorphone snapshot replaced");
                Ok(count)
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.availability.send_replace(Availability::Unavailable {
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    /// The current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn get(&self, id: DoorphoneId) -> Option<Doorphone> {
        self.snapshot.borrow().iter().find(|d| d.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn subscribe_availability(&self) -> watch::Receiver<Availability> {
        self.availability.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn availability(&self) -> Availability {
        self.availability.borrow().clone()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How long ago the last successful refresh happened.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}
