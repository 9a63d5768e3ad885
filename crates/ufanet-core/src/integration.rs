// ── Integration lifecycle ──
//
// Setup, entity registration, background refresh, and unload for one
// configured account. The `Integration` value is the context object the
// host keeps per entry; nothing here lives in global state.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ufanet_api::{DoorphoneId, SessionClient};

use crate::config::IntegrationConfig;
use crate::entity::DoorphoneLock;
use crate::error::CoreError;
use crate::store::DoorphoneCache;
use crate::store::refresh::refresh_task;

/// Title a host shows for a configured account.
pub const ENTRY_TITLE: &str = "Ufanet Doorphone";

/// Host-side sink for the lock entities created during setup.
pub trait EntityRegistry: Send + Sync {
    fn add_locks(&self, locks: Vec<DoorphoneLock>);
}

/// Everything one configured account needs at runtime.
///
/// Created by [`setup()`](Self::setup), torn down by
/// [`unload()`](Self::unload). Dropping it also stops the refresh loop.
pub struct Integration {
    config: IntegrationConfig,
    client: Arc<SessionClient>,
    cache: Arc<DoorphoneCache>,
    locks: Vec<DoorphoneLock>,
    cancel: CancellationToken,
    refresh_handle: Option<JoinHandle<()>>,
}

impl Integration {
    /// Set up the integration for one account.
    ///
    /// Performs the first refresh synchronously (logging in on the way),
    /// builds one [`DoorphoneLock`] per doorphone, hands them to the
    /// registry, then starts the periodic refresh. Any failure before
    /// registration aborts setup.
    pub async fn setup(
        config: IntegrationConfig,
        registry: &dyn EntityRegistry,
    ) -> Result<Self, CoreError> {
        let integration = Self::connect(config).await?;
        registry.add_locks(integration.locks.clone());
        Ok(integration)
    }

    /// Check credentials without creating an integration.
    pub async fn validate_credentials(config: &IntegrationConfig) -> Result<(), CoreError> {
        let client = build_client(config)?;
        client.authenticate().await?;
        debug!(contract = %client.username(), "credentials accepted");
        Ok(())
    }

    /// Set up without a registry.
    ///
    /// For hosts that read [`locks()`](Self::locks) themselves, such as a
    /// one-shot CLI invocation (usually with a zero refresh interval).
    pub async fn connect(config: IntegrationConfig) -> Result<Self, CoreError> {
        let client = Arc::new(build_client(&config)?);
        let cache = Arc::new(DoorphoneCache::new(Arc::clone(&client)));

        let count = cache.refresh().await?;
        info!(contract = %client.username(), count, "initial doorphone refresh complete");

        let locks: Vec<DoorphoneLock> = cache
            .snapshot()
            .iter()
            .map(|d| DoorphoneLock::new(Arc::clone(&client), &cache, d))
            .collect();

        let cancel = CancellationToken::new();
        let refresh_handle = if config.refresh_interval.is_zero() {
            None
        } else {
            Some(tokio::spawn(refresh_task(
                Arc::clone(&cache),
                config.refresh_interval,
                cancel.clone(),
            )))
        };

        Ok(Self {
            config,
            client,
            cache,
            locks,
            cancel,
            refresh_handle,
        })
    }

    /// Stop the refresh loop and wait for it to finish.
    pub async fn unload(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.refresh_handle.take() {
            join_refresh(handle).await;
        }
        info!(contract = %self.client.username(), "integration unloaded");
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn title(&self) -> &'static str {
        ENTRY_TITLE
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<SessionClient> {
        &self.client
    }

    pub fn cache(&self) -> &Arc<DoorphoneCache> {
        &self.cache
    }

    /// Locks created during setup, in snapshot order.
    pub fn locks(&self) -> &[DoorphoneLock] {
        &self.locks
    }

    pub fn lock(&self, id: DoorphoneId) -> Result<&DoorphoneLock, CoreError> {
        self.locks
            .iter()
            .find(|l| l.id() == id)
            .ok_or(CoreError::DoorphoneNotFound { id })
    }
}

impl Drop for Integration {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Wait for the refresh task, logging a panic or abort instead of dropping it.
async fn join_refresh(handle: JoinHandle<()>) {
    if let Err(e) = handle.await {
        warn!(error = %e, "refresh task ended abnormally");
    }
}

fn build_client(config: &IntegrationConfig) -> Result<SessionClient, CoreError> {
    Ok(SessionClient::new(
        config.base_url.clone(),
        config.credentials.clone(),
        &config.transport(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panicked_refresh_task_is_absorbed_on_join() {
        let handle: JoinHandle<()> = tokio::spawn(async { panic!("refresh blew up") });
        join_refresh(handle).await;
    }
}
