use std::error;
use std::fmt;
use std::sync::Arc;

pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod executions;
pub mod key_points;
pub mod locations;
pub mod profiles;
pub mod reviews;
pub mod session;
pub mod tours;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use session::{Session, SessionContext};

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        message: Option<String>,
    },
    NotFound {
        url: String,
        message: Option<String>,
    },
    Unauthenticated,
    InvalidToken(String),
    InvalidInput(String),
}

impl ApiError {
    /// The text shown to a user: the backend's own message when it sent
    /// one, the error description otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidResponse {
                message: Some(message),
                ..
            }
            | ApiError::NotFound {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl error::Error for ApiError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ApiError::RequestError(source) => Some(source.as_ref()),
            ApiError::JsonError(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(why) => write!(f, "Backend not reachable: {}", why),
            ApiError::JsonError(why) => write!(f, "Unexpected response body: {}", why),
            ApiError::InvalidResponse {
                status_code,
                url,
                message,
            } => match message {
                Some(text) => write!(f, "{} answered {}: {}", url, status_code, text),
                None => write!(f, "{} answered {}", url, status_code),
            },
            ApiError::NotFound { url, .. } => write!(f, "Not found: {}", url),
            ApiError::Unauthenticated => write!(f, "Not logged in."),
            ApiError::InvalidToken(why) => write!(f, "Invalid token: {}", why),
            ApiError::InvalidInput(why) => write!(f, "Invalid input: {}", why),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(source: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(source))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(source: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(source))
    }
}

impl From<model::review::ReviewError> for ApiError {
    fn from(source: model::review::ReviewError) -> Self {
        ApiError::InvalidInput(source.to_string())
    }
}

impl From<model::user::RegistrationError> for ApiError {
    fn from(source: model::user::RegistrationError) -> Self {
        ApiError::InvalidInput(source.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

pub fn not_found_to_none<T>(result: ApiResult<T>) -> ApiResult<Option<T>> {
    if let Err(ApiError::NotFound { .. }) = result {
        Ok(None)
    } else {
        result.map(Some)
    }
}
