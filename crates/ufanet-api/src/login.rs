// Web session login
//
// Form-based login against the personal-account site. The endpoint
// answers with session cookies which land in the client's jar;
// subsequent requests carry them automatically.

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use tracing::{debug, error, warn};

use crate::client::{SessionClient, SessionSlot, SessionState};
use crate::error::Error;

const LOGIN_PATH: &str = "/login/";

/// Redirect target the web form submits as `next`.
pub const LOGIN_REDIRECT: &str = "/office/skud/";

impl SessionClient {
    /// Authenticate with the contract number and password.
    ///
    /// `POST /login/` with form fields `next`, `contract`, `password`.
    /// On HTTP 200 the cookie set becomes the new session. Any other
    /// status fails with [`Error::Authentication`] and leaves the client
    /// in [`SessionState::AuthFailed`]. No retry happens here.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let mut slot = self.lock_session().await;
        self.login_locked(&mut slot).await
    }

    pub(crate) async fn login_locked(&self, slot: &mut SessionSlot) -> Result<(), Error> {
        let url = self.endpoint(LOGIN_PATH)?;
        let credentials = self.credentials();

        debug!(contract = %credentials.username, "logging in at {}", url);

        let form = [
            ("next", LOGIN_REDIRECT),
            ("contract", credentials.username.as_str()),
            ("password", credentials.password.expose_secret()),
        ];

        let resp = self.http().post(url).form(&form).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "authentication failed");
            slot.state = SessionState::AuthFailed {
                status: status.as_u16(),
            };
            return Err(Error::Authentication {
                status: status.as_u16(),
            });
        }

        if self.cookie_header().is_none() {
            warn!("login accepted but no session cookie was set");
        }

        slot.generation += 1;
        slot.state = SessionState::Authenticated;
        debug!(generation = slot.generation, "authentication successful, cookies saved");
        Ok(())
    }
}
