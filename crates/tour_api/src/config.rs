use std::{env, time::Duration};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Root of the gateway, e.g. `http://localhost:8080/api`. Resource
    /// paths such as `tours/keypoints` are appended to it.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads `TOURS_API_URL` and `TOURS_API_TIMEOUT_SECS`, falling back to
    /// the defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let base_url = env::var("TOURS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let timeout = match env::var("TOURS_API_TIMEOUT_SECS") {
            Ok(value) => match value.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    log::warn!("ignoring invalid TOURS_API_TIMEOUT_SECS '{}'", value);
                    DEFAULT_TIMEOUT
                }
            },
            Err(_) => DEFAULT_TIMEOUT,
        };
        Self { base_url, timeout }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
