//! Polling cache, lock entities, and setup context for Ufanet doorphones.
//!
//! - **[`Integration`]**: Per-account context: [`setup()`](Integration::setup)
//!   performs the first refresh, registers one [`DoorphoneLock`] per
//!   doorphone through the host's [`EntityRegistry`], and spawns the
//!   periodic refresh. [`unload()`](Integration::unload) stops it.
//!
//! - **[`DoorphoneCache`]**: Last successfully fetched doorphone list,
//!   served without network I/O and broadcast via `watch` channels.
//!   Refresh failures keep the previous snapshot.
//!
//! - **[`DoorphoneLock`]**: Lock-shaped entity whose `unlock()` opens the
//!   door and reports the outcome as a value.

pub mod config;
pub mod entity;
pub mod error;
pub mod integration;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_REFRESH_INTERVAL, DEFAULT_TIMEOUT, IntegrationConfig, TlsVerification};
pub use entity::{DoorphoneLock, LockState, UNIQUE_ID_PREFIX, UnlockOutcome, unique_id_for};
pub use error::CoreError;
pub use integration::{ENTRY_TITLE, EntityRegistry, Integration};
pub use store::{Availability, DoorphoneCache, Snapshot};

pub use ufanet_api::{Credentials, DEFAULT_BASE_URL, Doorphone, DoorphoneId};
