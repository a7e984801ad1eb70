use std::{env, time::Duration};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Pause between the end of one location round-trip and the start of
    /// the next.
    pub poll_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl TrackerConfig {
    /// Reads `TOURIST_POLL_INTERVAL_SECS`; zero and unparsable values fall
    /// back to the default.
    pub fn from_env() -> Self {
        let poll_interval = env::var("TOURIST_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        Self { poll_interval }
    }
}
