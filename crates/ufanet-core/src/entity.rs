// ── Doorphone lock entity ──
//
// One lock-shaped controllable unit per doorphone. Identity comes from
// the doorphone id; the display name is read from the live snapshot.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info};

use ufanet_api::{Doorphone, DoorphoneId, SessionClient};

use crate::store::{Availability, DoorphoneCache, Snapshot};

/// Prefix of every lock's unique id (`ufanet_doorphone_7`).
pub const UNIQUE_ID_PREFIX: &str = "ufanet_doorphone_";

/// Reported lock state.
///
/// Doorphones are momentary actuators: opening releases the door for a
/// few seconds and the hardware gives no locked/unlocked feedback, so
/// the state is always [`LockState::Unlocked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Unlocked,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlocked => f.write_str("unlocked"),
        }
    }
}

/// Result of an unlock action. Failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The API reported `result: true`.
    Opened,
    /// The API answered but did not confirm the opening.
    Refused,
    /// The request itself failed.
    Failed { reason: String },
}

impl UnlockOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Opened)
    }
}

/// A doorphone presented as a lock.
#[derive(Clone)]
pub struct DoorphoneLock {
    client: Arc<SessionClient>,
    id: DoorphoneId,
    unique_id: String,
    initial_name: String,
    snapshot: watch::Receiver<Snapshot>,
    availability: watch::Receiver<Availability>,
}

impl DoorphoneLock {
    pub fn new(client: Arc<SessionClient>, cache: &DoorphoneCache, doorphone: &Doorphone) -> Self {
        Self {
            client,
            id: doorphone.id,
            unique_id: unique_id_for(doorphone.id),
            initial_name: doorphone.display_name().to_owned(),
            snapshot: cache.subscribe(),
            availability: cache.subscribe_availability(),
        }
    }

    pub fn id(&self) -> DoorphoneId {
        self.id
    }

    /// Stable identifier, independent of the display name.
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Current display name, following renames between polls.
    pub fn name(&self) -> String {
        self.snapshot
            .borrow()
            .iter()
            .find(|d| d.id == self.id)
            .map_or_else(|| self.initial_name.clone(), |d| d.display_name().to_owned())
    }

    /// `false` while the last refresh failed or the doorphone vanished
    /// from the account.
    pub fn available(&self) -> bool {
        *self.availability.borrow() == Availability::Available
            && self.snapshot.borrow().iter().any(|d| d.id == self.id)
    }

    pub fn state(&self) -> LockState {
        LockState::Unlocked
    }

    pub fn is_locked(&self) -> bool {
        false
    }

    /// Open the door.
    ///
    /// Logs the outcome and reports it as a value; nothing propagates
    /// past this call.
    pub async fn unlock(&self) -> UnlockOutcome {
        let name = self.name();
        match self.client.open_doorphone(self.id).await {
            Ok(true) => {
                info!(id = %self.id, name = %name, "doorphone opened");
                UnlockOutcome::Opened
            }
            Ok(false) => {
                error!(id = %self.id, name = %name, "doorphone did not confirm opening");
                UnlockOutcome::Refused
            }
            Err(e) => {
                error!(id = %self.id, name = %name, error = %e, "failed to open doorphone");
                UnlockOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl fmt::Debug for DoorphoneLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoorphoneLock")
            .field("id", &self.id)
            .field("unique_id", &self.unique_id)
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

pub fn unique_id_for(id: DoorphoneId) -> String {
    format!("{UNIQUE_ID_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_id_uses_prefix() {
        assert_eq!(unique_id_for(DoorphoneId(7)), "ufanet_doorphone_7");
    }

    #[test]
    fn only_successful_open_is_success() {
        assert!(UnlockOutcome::Opened.is_success());
        assert!(!UnlockOutcome::Refused.is_success());
        assert!(
            !UnlockOutcome::Failed {
                reason: "timeout".into()
            }
            .is_success()
        );
    }

    #[test]
    fn lock_state_renders_lowercase() {
        assert_eq!(LockState::Unlocked.to_string(), "unlocked");
    }
}
