use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::{
    geo::Coordinates,
    id::{HasId, Id},
};

use crate::{tour::Tour, WithDistance};

/// A waypoint of a tour.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPoint {
    pub id: Id<KeyPoint>,
    #[serde(rename = "naziv")]
    pub name: String,
    #[serde(rename = "opis", default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "slikaUrl", default)]
    pub image_url: Option<String>,
    pub tour_id: Id<Tour>,
    #[serde(deserialize_with = "utility::serde::date_time::deserialize_utc")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "utility::serde::date_time::deserialize_utc_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for KeyPoint {
    type IdType = i64;
}

impl KeyPoint {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn with_distance_to(self, position: &Coordinates) -> WithDistance<Self> {
        let distance = position.distance_km(&self.position());
        WithDistance::new(distance, self)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyPointRequest {
    #[serde(rename = "naziv")]
    pub name: String,
    #[serde(rename = "opis")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "slikaUrl")]
    pub image_url: Option<String>,
    pub tour_id: Id<Tour>,
}

impl CreateKeyPointRequest {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}
