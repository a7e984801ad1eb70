use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::{
    geo::Coordinates,
    id::{HasId, Id},
};

use crate::{key_point::KeyPoint, tour::Tour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Started,
    Completed,
    Abandoned,
}

impl ExecutionStatus {
    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Started)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Started => "active",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "STARTED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Abandoned => write!(f, "ABANDONED"),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourExecution {
    pub id: Option<Id<TourExecution>>,
    pub tour_id: Id<Tour>,
    pub tourist_username: String,
    pub status: ExecutionStatus,
    #[serde(deserialize_with = "utility::serde::date_time::deserialize_utc")]
    pub start_time: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "utility::serde::date_time::deserialize_utc_option"
    )]
    pub end_time: Option<DateTime<Utc>>,
    pub current_latitude: f64,
    pub current_longitude: f64,
    #[serde(deserialize_with = "utility::serde::date_time::deserialize_utc")]
    pub last_activity_time: DateTime<Utc>,
    #[serde(default)]
    pub completed_key_points: Vec<Id<KeyPoint>>,
}

impl HasId for TourExecution {
    type IdType = i64;
}

impl TourExecution {
    pub fn is_active(&self) -> bool {
        self.status == ExecutionStatus::Started
    }

    pub fn is_key_point_completed(&self, key_point: &Id<KeyPoint>) -> bool {
        self.completed_key_points.contains(key_point)
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.current_latitude, self.current_longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExecutionRequest {
    pub tour_id: Id<Tour>,
    pub initial_latitude: f64,
    pub initial_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for LocationUpdate {
    fn from(value: Coordinates) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}
