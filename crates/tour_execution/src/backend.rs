use async_trait::async_trait;
use model::{
    key_point::KeyPoint,
    location::TouristLocation,
    tour::Tour,
    tour_execution::{LocationUpdate, TourExecution},
};
use tour_api::{ApiClient, ApiResult};
use utility::id::Id;

/// The remote operations the tracking flow depends on.
#[async_trait]
pub trait TrackingBackend: Send + Sync {
    async fn active_execution(&self) -> ApiResult<Option<TourExecution>>;

    async fn current_location(&self, username: &str) -> ApiResult<Option<TouristLocation>>;

    async fn submit_location(
        &self,
        id: Id<TourExecution>,
        update: LocationUpdate,
    ) -> ApiResult<TourExecution>;

    async fn complete(&self, id: Id<TourExecution>) -> ApiResult<TourExecution>;

    async fn abandon(&self, id: Id<TourExecution>) -> ApiResult<TourExecution>;

    async fn key_points_by_tour(&self, tour_id: Id<Tour>) -> ApiResult<Vec<KeyPoint>>;
}

#[async_trait]
impl TrackingBackend for ApiClient {
    async fn active_execution(&self) -> ApiResult<Option<TourExecution>> {
        ApiClient::active_execution(self).await
    }

    async fn current_location(&self, username: &str) -> ApiResult<Option<TouristLocation>> {
        ApiClient::current_location(self, username).await
    }

    async fn submit_location(
        &self,
        id: Id<TourExecution>,
        update: LocationUpdate,
    ) -> ApiResult<TourExecution> {
        self.update_execution_location(id, update).await
    }

    async fn complete(&self, id: Id<TourExecution>) -> ApiResult<TourExecution> {
        self.complete_execution(id).await
    }

    async fn abandon(&self, id: Id<TourExecution>) -> ApiResult<TourExecution> {
        self.abandon_execution(id).await
    }

    async fn key_points_by_tour(&self, tour_id: Id<Tour>) -> ApiResult<Vec<KeyPoint>> {
        ApiClient::key_points_by_tour(self, tour_id).await
    }
}
