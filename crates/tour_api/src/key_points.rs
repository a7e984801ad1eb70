use model::{
    key_point::{CreateKeyPointRequest, KeyPoint},
    tour::Tour,
    Count,
};
use utility::id::Id;

use crate::{client::ApiClient, ApiError, ApiResult};

const KEY_POINTS: &str = "tours/keypoints";

fn validate(request: &CreateKeyPointRequest) -> ApiResult<()> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("key point name is empty".to_owned()));
    }
    if !request.position().is_valid() {
        return Err(ApiError::InvalidInput(format!(
            "invalid key point position {}, {}",
            request.latitude, request.longitude
        )));
    }
    Ok(())
}

impl ApiClient {
    pub async fn create_key_point(&self, request: &CreateKeyPointRequest) -> ApiResult<KeyPoint> {
        validate(request)?;
        self.post(KEY_POINTS, request).await
    }

    /// Key points of all tours authored by the caller.
    pub async fn key_points(&self) -> ApiResult<Vec<KeyPoint>> {
        self.get(KEY_POINTS).await
    }

    /// Key points of a tour, in tour order.
    pub async fn key_points_by_tour(&self, tour_id: Id<Tour>) -> ApiResult<Vec<KeyPoint>> {
        self.get(&format!("{KEY_POINTS}/tour/{tour_id}")).await
    }

    pub async fn key_point(&self, id: Id<KeyPoint>) -> ApiResult<KeyPoint> {
        self.get(&format!("{KEY_POINTS}/{id}")).await
    }

    pub async fn update_key_point(
        &self,
        id: Id<KeyPoint>,
        request: &CreateKeyPointRequest,
    ) -> ApiResult<KeyPoint> {
        validate(request)?;
        self.put(&format!("{KEY_POINTS}/{id}"), request).await
    }

    pub async fn delete_key_point(&self, id: Id<KeyPoint>) -> ApiResult<()> {
        self.delete(&format!("{KEY_POINTS}/{id}")).await
    }

    pub async fn key_point_count_by_tour(&self, tour_id: Id<Tour>) -> ApiResult<u64> {
        let count: Count = self.get(&format!("{KEY_POINTS}/tour/{tour_id}/count")).await?;
        Ok(count.count)
    }

    pub async fn key_point_count(&self) -> ApiResult<u64> {
        let count: Count = self.get(&format!("{KEY_POINTS}/count")).await?;
        Ok(count.count)
    }

    pub async fn first_key_point(&self, tour_id: Id<Tour>) -> ApiResult<KeyPoint> {
        self.get(&format!("{KEY_POINTS}/tour/{tour_id}/first")).await
    }
}
