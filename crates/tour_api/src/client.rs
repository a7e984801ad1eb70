use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{config::ApiConfig, session::SessionContext, ApiError, ApiResult};

/// Error body used by the backend services.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// HTTP client for the tours and stakeholders services. Resource specific
/// calls live in the sibling modules as further `impl` blocks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SessionContext) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    async fn request(&self, method: Method, endpoint: &str) -> (RequestBuilder, String) {
        let url = self.config.url(endpoint);
        log::debug!("Requesting {} '{}'.", method, url);
        let mut builder = self.http.request(method, &url);
        if let Some(session) = self.session.get().await {
            builder = builder.bearer_auth(session.token());
        }
        (builder, url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let (builder, url) = self.request(Method::GET, endpoint).await;
        Self::parse(builder.send().await?, url).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let (builder, url) = self.request(Method::POST, endpoint).await;
        Self::parse(builder.json(body).send().await?, url).await
    }

    /// Posts `body` and only checks the status; the answer is not read.
    pub(crate) async fn post_status<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<()> {
        let (builder, url) = self.request(Method::POST, endpoint).await;
        let response = builder.json(body).send().await?;
        Self::check(response, url).await.map(|_| ())
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let (builder, url) = self.request(Method::PUT, endpoint).await;
        Self::parse(builder.json(body).send().await?, url).await
    }

    pub(crate) async fn put_query<Q: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> ApiResult<T> {
        let (builder, url) = self.request(Method::PUT, endpoint).await;
        let response = builder
            .query(query)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::parse(response, url).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> ApiResult<()> {
        let (builder, url) = self.request(Method::DELETE, endpoint).await;
        let response = builder.send().await?;
        Self::check(response, url).await.map(|_| ())
    }

    async fn parse<T: DeserializeOwned>(response: Response, url: String) -> ApiResult<T> {
        let response = Self::check(response, url).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn check(response: Response, url: String) -> ApiResult<Response> {
        let status_code = response.status();
        if status_code.is_success() {
            return Ok(response);
        }
        let message = match response.text().await {
            Ok(text) => error_message(&text),
            Err(_) => None,
        };
        log::debug!("'{}' answered {}: {:?}", url, status_code, message);
        match status_code {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { url, message }),
            status_code => Err(ApiError::InvalidResponse {
                status_code,
                url,
                message,
            }),
        }
    }
}

fn error_message(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => body.error.or(body.message),
        Err(_) => Some(text.to_owned()),
    }
}
