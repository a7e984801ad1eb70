use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Option<Id<UserProfile>>,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub motto: String,
}

impl HasId for UserProfile {
    type IdType = i64;
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// The writable part of a profile, as sent on create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: Option<String>,
    pub biography: String,
    pub motto: String,
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            profile_picture: profile.profile_picture.clone(),
            biography: profile.biography.clone(),
            motto: profile.motto.clone(),
        }
    }
}
