use model::{
    tour::Tour,
    tour_execution::{LocationUpdate, StartExecutionRequest, TourExecution},
};
use utility::{geo::Coordinates, id::Id};

use crate::{client::ApiClient, not_found_to_none, ApiError, ApiResult};

const EXECUTIONS: &str = "tours/tour-execution";

impl ApiClient {
    pub async fn start_execution(
        &self,
        tour_id: Id<Tour>,
        initial_position: Coordinates,
    ) -> ApiResult<TourExecution> {
        if !initial_position.is_valid() {
            return Err(ApiError::InvalidInput(format!(
                "invalid start position {:?}",
                initial_position
            )));
        }
        let body = StartExecutionRequest {
            tour_id,
            initial_latitude: initial_position.latitude,
            initial_longitude: initial_position.longitude,
        };
        self.post(&format!("{EXECUTIONS}/start"), &body).await
    }

    /// The caller's active execution, `None` if there is none.
    pub async fn active_execution(&self) -> ApiResult<Option<TourExecution>> {
        not_found_to_none(self.get(&format!("{EXECUTIONS}/active")).await)
    }

    /// Submits the tourist's position. The server may mark key points as
    /// completed and flip the status in response.
    pub async fn update_execution_location(
        &self,
        id: Id<TourExecution>,
        update: LocationUpdate,
    ) -> ApiResult<TourExecution> {
        self.put(&format!("{EXECUTIONS}/{id}/update-location"), &update)
            .await
    }

    pub async fn complete_execution(&self, id: Id<TourExecution>) -> ApiResult<TourExecution> {
        self.put(&format!("{EXECUTIONS}/{id}/complete"), &serde_json::json!({}))
            .await
    }

    pub async fn abandon_execution(&self, id: Id<TourExecution>) -> ApiResult<TourExecution> {
        self.put(&format!("{EXECUTIONS}/{id}/abandon"), &serde_json::json!({}))
            .await
    }
}
