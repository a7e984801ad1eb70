use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use model::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utility::id::Id;

use crate::{ApiError, ApiResult};

/// Payload of the token issued by the stakeholders service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    claims: Claims,
}

impl Session {
    pub fn new<S: Into<String>>(token: S, claims: Claims) -> Self {
        Self {
            token: token.into(),
            claims,
        }
    }

    /// Reads the claims of a JWT. The signature is left to the server.
    pub fn decode<S: Into<String>>(token: S) -> ApiResult<Self> {
        let token = token.into();
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| ApiError::InvalidToken("expected three segments".to_owned()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|why| ApiError::InvalidToken(why.to_string()))?;
        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|why| ApiError::InvalidToken(why.to_string()))?;
        Ok(Self { token, claims })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn username(&self) -> &str {
        &self.claims.sub
    }

    pub fn role(&self) -> Option<UserRole> {
        self.claims.role.as_deref().and_then(|role| role.parse().ok())
    }

    pub fn user_id(&self) -> Option<Id<User>> {
        self.claims.id.map(Id::new)
    }

    /// A token without `exp` never expires on the client side.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.claims.exp.is_some_and(|exp| exp <= now.timestamp())
    }
}

/// Shared identity of the logged in user. Populated at login, cleared at
/// logout; cloned into every collaborator that needs to know who is
/// calling.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    pub async fn login<S: Into<String>>(&self, token: S) -> ApiResult<Session> {
        let session = Session::decode(token)?;
        log::info!("logged in as '{}'", session.username());
        *self.inner.write().await = Some(session.clone());
        Ok(session)
    }

    pub async fn logout(&self) {
        if let Some(session) = self.inner.write().await.take() {
            log::info!("logged out '{}'", session.username());
        }
    }

    pub async fn get(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn current(&self) -> ApiResult<Session> {
        self.get().await.ok_or(ApiError::Unauthenticated)
    }

    pub async fn username(&self) -> ApiResult<String> {
        self.current()
            .await
            .map(|session| session.username().to_owned())
    }
}
