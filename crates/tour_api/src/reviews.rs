use model::{
    review::{CreateReviewRequest, Review},
    tour::Tour,
};
use utility::id::Id;

use crate::{client::ApiClient, ApiResult};

const REVIEWS: &str = "tours/reviews";

impl ApiClient {
    pub async fn submit_review(&self, request: &CreateReviewRequest) -> ApiResult<Review> {
        log::info!("submitting review for tour {}", request.tour_id());
        self.post(REVIEWS, request).await
    }

    pub async fn reviews_for_tour(&self, tour_id: Id<Tour>) -> ApiResult<Vec<Review>> {
        self.get(&format!("{REVIEWS}/tour/{tour_id}")).await
    }
}
