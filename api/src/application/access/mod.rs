use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::session_repository::SessionRepository;
use crate::application::ports::token_codec::TokenCodec;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::viewer::Viewer;

/// Raw credential material lifted off a request. Each resolver reads only
/// the field belonging to its mode.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub authorization: Option<String>,
    pub session: Option<String>,
}

/// Turns request credentials into a viewer.
///
/// Resolution never fails: a bad token, an unknown user or a storage hiccup
/// all end up as an unauthenticated outcome.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, credentials: &Credentials) -> Option<Viewer>;
}

/// Accepts `"<scheme> <token>"` as well as a bare token.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let token = match value.split_once(' ') {
        Some((_, rest)) => rest.trim(),
        None => value.trim_end(),
    };
    if token.is_empty() { None } else { Some(token) }
}

pub struct TokenCredentialResolver {
    codec: Arc<dyn TokenCodec>,
    users: Arc<dyn UserRepository>,
}

impl TokenCredentialResolver {
    pub fn new(codec: Arc<dyn TokenCodec>, users: Arc<dyn UserRepository>) -> Self {
        Self { codec, users }
    }
}

#[async_trait]
impl CredentialResolver for TokenCredentialResolver {
    async fn resolve(&self, credentials: &Credentials) -> Option<Viewer> {
        let token = credentials.authorization.as_deref().and_then(token_from_header)?;
        let viewer_id = match self.codec.decode(token) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "viewer_token_rejected");
                return None;
            }
        };
        match self.users.find_by_id(viewer_id).await {
            Ok(Some(user)) => Some(user.into_viewer()),
            Ok(None) => {
                tracing::debug!(%viewer_id, "viewer_not_found");
                None
            }
            Err(e) => {
                tracing::debug!(%viewer_id, error = ?e, "viewer_lookup_failed");
                None
            }
        }
    }
}

pub struct SessionCredentialResolver {
    sessions: Arc<dyn SessionRepository>,
}

impl SessionCredentialResolver {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl CredentialResolver for SessionCredentialResolver {
    async fn resolve(&self, credentials: &Credentials) -> Option<Viewer> {
        let handle = credentials
            .session
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty());
        let user = match handle {
            Some(h) => match self.sessions.find_user(h).await {
                Ok(user) => user,
                Err(e) => {
                    tracing::debug!(error = ?e, "session_lookup_failed");
                    None
                }
            },
            None => None,
        };
        Some(match user {
            Some(u) => u.into_viewer(),
            None => Viewer::anonymous(),
        })
    }
}
