use model::{
    profile::{ProfileUpdate, UserProfile},
    user::User,
};
use utility::id::Id;

use crate::{client::ApiClient, ApiResult};

const PROFILES: &str = "stakeholders/users/profile";

impl ApiClient {
    pub async fn profile(&self, user_id: Id<User>) -> ApiResult<UserProfile> {
        self.get(&format!("{PROFILES}/{user_id}")).await
    }

    /// Creates the profile if the user has none yet, replaces it otherwise.
    pub async fn save_profile(
        &self,
        user_id: Id<User>,
        profile: &UserProfile,
    ) -> ApiResult<UserProfile> {
        self.post(&format!("{PROFILES}/{user_id}"), &ProfileUpdate::from(profile))
            .await
    }

    /// Profile of the logged in user.
    pub async fn own_profile(&self) -> ApiResult<UserProfile> {
        let session = self.session().current().await?;
        let user_id = session
            .user_id()
            .ok_or_else(|| crate::ApiError::InvalidToken("token carries no user id".to_owned()))?;
        self.profile(user_id).await
    }
}
