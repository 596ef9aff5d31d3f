//! Per-request view of the cookie-backed session.
//!
//! Session transport and expiry belong to `tower-sessions`; this module only
//! knows the two keys the service keeps in it.

use axum::async_trait;
use axum::extract::FromRequestParts;
use http::request::Parts;
use http::StatusCode;
use tower_sessions::Session;

pub use tower_sessions::session::Error as SessionError;

const USERNAME_KEY: &str = "username";
const FLASH_KEY: &str = "flash";

/// Everything a handler needs from the session for one request.
///
/// The username is read once at extraction; flash messages are read lazily
/// because taking them mutates the session.
#[derive(Debug, Clone)]
pub struct RequestContext {
    session: Session,
    username: Option<String>,
}

/// Data every rendered page carries into the base layout.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub flashes: Vec<String>,
    pub username: Option<String>,
}

impl RequestContext {
    pub async fn load(session: Session) -> Result<Self, SessionError> {
        let username = session
            .get::<String>(USERNAME_KEY)
            .await?
            .filter(|username| !username.is_empty());
        Ok(Self { session, username })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Queue a one-shot message for the next rendered page.
    pub async fn flash(&self, message: impl Into<String>) -> Result<(), SessionError> {
        let mut flashes = self
            .session
            .get::<Vec<String>>(FLASH_KEY)
            .await?
            .unwrap_or_default();
        flashes.push(message.into());
        self.session.insert(FLASH_KEY, flashes).await
    }

    /// Drain the pending messages. A second call in the same or a later
    /// request returns nothing until something new is flashed.
    pub async fn take_flashes(&self) -> Result<Vec<String>, SessionError> {
        Ok(self
            .session
            .remove::<Vec<String>>(FLASH_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Flashes plus signed-in user, consuming the flashes.
    pub async fn page(&self) -> Result<PageContext, SessionError> {
        Ok(PageContext {
            flashes: self.take_flashes().await?,
            username: self.username.clone(),
        })
    }

    pub(crate) async fn set_username(&self, username: &str) -> Result<(), SessionError> {
        self.session.cycle_id().await?;
        self.session.insert(USERNAME_KEY, username.to_string()).await
    }

    pub(crate) async fn clear_username(&self) -> Result<(), SessionError> {
        self.session.remove::<String>(USERNAME_KEY).await?;
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        RequestContext::load(session).await.map_err(|e| {
            tracing::error!("failed to load session: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to load session")
        })
    }
}
