use model::user::RegisterRequest;
use serde::{Deserialize, Serialize};

use crate::{client::ApiClient, session::Session, ApiResult};

const LOGIN: &str = "stakeholders/auth/login";
const REGISTER: &str = "stakeholders/auth/register";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl ApiClient {
    /// Exchanges credentials for a token and stores it in the session
    /// context shared by this client.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let request = LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        let response: LoginResponse = self.post(LOGIN, &request).await?;
        self.session().login(response.token).await
    }

    /// Creates an account. The session is left untouched; log in afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.post_status(REGISTER, request).await?;
        log::info!("registered '{}' as {}", request.username(), request.role());
        Ok(())
    }

    pub async fn logout(&self) {
        self.session().logout().await
    }
}
