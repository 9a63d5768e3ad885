// Shared-access (SKUD) doorphone endpoints

use tracing::debug;

use crate::client::SessionClient;
use crate::error::Error;
use crate::models::{Doorphone, DoorphoneId, OpenResponse};

const DOORPHONES_PATH: &str = "/api/v0/skud/shared";

impl SessionClient {
    /// List the doorphones this account can open.
    ///
    /// `GET /api/v0/skud/shared`
    pub async fn list_doorphones(&self) -> Result<Vec<Doorphone>, Error> {
        let url = self.endpoint(DOORPHONES_PATH)?;
        debug!("listing doorphones");
        let resp = self.get_with_session(&url).await?;
        self.parse_json(resp).await
    }

    /// Trigger the door release of one doorphone.
    ///
    /// `GET /api/v0/skud/shared/{id}/open/`. Returns the `result` flag of
    /// the response body; a body without `result` counts as `false`.
    pub async fn open_doorphone(&self, id: DoorphoneId) -> Result<bool, Error> {
        let url = self.endpoint(&format!("{DOORPHONES_PATH}/{id}/open/"))?;
        debug!(%id, "opening doorphone");
        let resp = self.get_with_session(&url).await?;
        let body: OpenResponse = self.parse_json(resp).await?;
        Ok(body.result.unwrap_or(false))
    }
}
