use model::location::{TouristLocation, TouristLocationUpdate};

use crate::{client::ApiClient, not_found_to_none, ApiResult};

const LOCATIONS: &str = "tours/tourist-location";

impl ApiClient {
    /// The simulated position of `username`, `None` if none was set yet.
    pub async fn current_location(&self, username: &str) -> ApiResult<Option<TouristLocation>> {
        not_found_to_none(self.get(&format!("{LOCATIONS}/current/{username}")).await)
    }

    pub async fn update_location(
        &self,
        update: &TouristLocationUpdate,
    ) -> ApiResult<TouristLocation> {
        self.post(&format!("{LOCATIONS}/update"), update).await
    }
}
