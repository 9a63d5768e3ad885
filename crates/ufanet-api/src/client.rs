// Session-authenticated HTTP client
//
// Wraps `reqwest::Client` with Ufanet URL construction, the session
// state machine, and the re-login-and-retry-once policy. Endpoint
// modules (login, doorphones) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// How many times a request is replayed after the server reports 401.
const MAX_SESSION_RETRIES: u32 = 1;

/// Observable state of the web session.
///
/// `Unauthenticated` → (login 200) → `Authenticated` → (401) →
/// `Unauthenticated`. A rejected login moves to `AuthFailed`, which is
/// only left by an explicit [`SessionClient::authenticate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    AuthFailed { status: u16 },
}

/// Session bookkeeping guarded by the client's mutex.
pub(crate) struct SessionSlot {
    pub(crate) state: SessionState,
    /// Bumped on every successful login so that concurrent callers who
    /// saw the same 401 only invalidate (and re-login) once.
    pub(crate) generation: u64,
}

/// HTTP client for the Ufanet personal-account API.
///
/// Owns the credentials and the cookie jar that holds the session
/// cookies. Authenticate-then-act sequences are serialized through an
/// async mutex around the session state.
pub struct SessionClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    session: Mutex<SessionSlot>,
    cookie_jar: Option<Arc<Jar>>,
}

impl SessionClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the session lives in cookies). `base_url` is the
    /// site root, normally [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            session: Mutex::new(SessionSlot {
                state: SessionState::Unauthenticated,
                generation: 0,
            }),
            cookie_jar,
        })
    }

    /// The site base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The contract number this client logs in with.
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Current session state.
    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state
    }

    /// The `Cookie` header value the jar holds for the base URL
    /// (e.g. `"sessionid=abc"`), if any.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    pub(crate) async fn lock_session(&self) -> MutexGuard<'_, SessionSlot> {
        self.session.lock().await
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an absolute API path, keeping any path
    /// prefix present on the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Session handling ─────────────────────────────────────────────

    /// Log in if no session exists. Returns the session generation the
    /// caller is about to use.
    async fn ensure_session(&self) -> Result<u64, Error> {
        let mut slot = self.session.lock().await;
        match slot.state {
            SessionState::Authenticated => Ok(slot.generation),
            SessionState::AuthFailed { status } => Err(Error::Authentication { status }),
            SessionState::Unauthenticated => {
                self.login_locked(&mut slot).await?;
                Ok(slot.generation)
            }
        }
    }

    /// Drop the session the caller used, unless someone already replaced it.
    async fn invalidate(&self, generation: u64) {
        let mut slot = self.session.lock().await;
        if slot.generation == generation && slot.state == SessionState::Authenticated {
            debug!(generation, "invalidating session");
            slot.state = SessionState::Unauthenticated;
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET, re-authenticating and replaying it at
    /// most [`MAX_SESSION_RETRIES`] times on HTTP 401.
    pub(crate) async fn get_with_session(&self, url: &Url) -> Result<reqwest::Response, Error> {
        let mut retries = 0;
        loop {
            let generation = self.ensure_session().await?;

            debug!("GET {}", url);
            let resp = self.http.get(url.clone()).send().await?;
            if resp.status() != StatusCode::UNAUTHORIZED {
                return Ok(resp);
            }

            self.invalidate(generation).await;
            if retries >= MAX_SESSION_RETRIES {
                warn!(path = url.path(), retries, "session rejected after re-authentication");
                return Err(Error::TransientAuth { retries });
            }
            warn!(path = url.path(), "session expired, re-authenticating");
            retries += 1;
        }
    }

    /// Require HTTP 200 and deserialize the JSON body.
    pub(crate) async fn parse_json<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::Remote {
                endpoint: resp.url().path().to_owned(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(Error::MalformedResponse {
                message: e.to_string(),
                body,
            }),
        }
    }
}
