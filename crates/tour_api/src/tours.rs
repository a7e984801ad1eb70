use model::tour::{CreateTourRequest, Difficulty, Tour, TourStats, TourStatus};
use utility::id::Id;

use crate::{client::ApiClient, ApiError, ApiResult};

const TOURS: &str = "tours";

fn validate(request: &CreateTourRequest) -> ApiResult<()> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("tour name is empty".to_owned()));
    }
    Ok(())
}

impl ApiClient {
    pub async fn create_tour(&self, request: &CreateTourRequest) -> ApiResult<Tour> {
        validate(request)?;
        self.post(TOURS, request).await
    }

    /// Tours authored by the caller.
    pub async fn tours(&self) -> ApiResult<Vec<Tour>> {
        self.get(TOURS).await
    }

    pub async fn tour(&self, id: Id<Tour>) -> ApiResult<Tour> {
        self.get(&format!("{TOURS}/{id}")).await
    }

    pub async fn tours_by_status(&self, status: TourStatus) -> ApiResult<Vec<Tour>> {
        self.get(&format!("{TOURS}/status/{status}")).await
    }

    pub async fn tours_by_difficulty(&self, difficulty: Difficulty) -> ApiResult<Vec<Tour>> {
        self.get(&format!("{TOURS}/difficulty/{difficulty}")).await
    }

    pub async fn tours_by_tag(&self, tag: &str) -> ApiResult<Vec<Tour>> {
        self.get(&format!("{TOURS}/tag/{tag}")).await
    }

    /// The tour service takes updates as query parameters.
    pub async fn update_tour(&self, id: Id<Tour>, request: &CreateTourRequest) -> ApiResult<Tour> {
        validate(request)?;
        let difficulty = request.difficulty.to_string();
        let query = [
            ("naziv", request.name.as_str()),
            ("opis", request.description.as_str()),
            ("tagovi", request.tags.as_deref().unwrap_or_default()),
            ("tezina", difficulty.as_str()),
        ];
        self.put_query(&format!("{TOURS}/{id}"), &query).await
    }

    pub async fn delete_tour(&self, id: Id<Tour>) -> ApiResult<()> {
        self.delete(&format!("{TOURS}/{id}")).await
    }

    pub async fn tour_stats(&self) -> ApiResult<TourStats> {
        self.get(&format!("{TOURS}/stats")).await
    }

    pub async fn publish_tour(&self, id: Id<Tour>) -> ApiResult<Tour> {
        self.put(&format!("{TOURS}/{id}/publish"), &serde_json::json!({}))
            .await
    }

    pub async fn archive_tour(&self, id: Id<Tour>) -> ApiResult<Tour> {
        self.put(&format!("{TOURS}/{id}/archive"), &serde_json::json!({}))
            .await
    }

    pub async fn activate_tour(&self, id: Id<Tour>) -> ApiResult<Tour> {
        self.put(&format!("{TOURS}/{id}/activate"), &serde_json::json!({}))
            .await
    }
}
