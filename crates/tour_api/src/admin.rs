use model::user::{User, UserRole};
use utility::id::Id;

use crate::{client::ApiClient, ApiResult};

const USERS: &str = "stakeholders/users";

impl ApiClient {
    pub async fn users(&self) -> ApiResult<Vec<User>> {
        self.get(USERS).await
    }

    pub async fn user(&self, id: Id<User>) -> ApiResult<User> {
        self.get(&format!("{USERS}/{id}")).await
    }

    pub async fn user_by_username(&self, username: &str) -> ApiResult<User> {
        self.get(&format!("{USERS}/username/{username}")).await
    }

    pub async fn block_user(&self, id: Id<User>) -> ApiResult<User> {
        self.put(&format!("{USERS}/{id}/block"), &serde_json::json!({}))
            .await
    }

    pub async fn unblock_user(&self, id: Id<User>) -> ApiResult<User> {
        self.put(&format!("{USERS}/{id}/unblock"), &serde_json::json!({}))
            .await
    }

    pub async fn users_by_role(&self, role: UserRole) -> ApiResult<Vec<User>> {
        self.get(&format!("{USERS}/role/{role}")).await
    }

    pub async fn blocked_users(&self) -> ApiResult<Vec<User>> {
        self.get(&format!("{USERS}/blocked")).await
    }

    pub async fn active_users(&self) -> ApiResult<Vec<User>> {
        self.get(&format!("{USERS}/active")).await
    }
}
