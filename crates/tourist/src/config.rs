use std::env;

use model::tour::Tour;
use utility::id::Id;

#[derive(Debug, Clone, PartialEq)]
pub struct TouristConfig {
    pub username: String,
    pub password: String,
    /// Tour to start when the tourist has no active execution.
    pub tour_id: Option<Id<Tour>>,
}

impl TouristConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `None` when a credential is missing or `TOURIST_TOUR_ID` is set but
    /// not a number.
    fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup("TOURIST_USERNAME")?;
        let password = lookup("TOURIST_PASSWORD")?;
        let tour_id = match lookup("TOURIST_TOUR_ID") {
            Some(value) => Some(value.parse().ok()?),
            None => None,
        };
        Some(Self {
            username,
            password,
            tour_id,
        })
    }
}
