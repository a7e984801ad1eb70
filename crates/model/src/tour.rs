use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{review::Review, user::User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "EASY"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Hard => write!(f, "HARD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TourStatus {
    Draft,
    Published,
    Archived,
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::Published => write!(f, "PUBLISHED"),
            Self::Archived => write!(f, "ARCHIVED"),
        }
    }
}

/// Means of transport a published tour states a duration for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Transport {
    #[serde(rename = "PESKE")]
    Walking,
    #[serde(rename = "BICIKL")]
    Bicycle,
    #[serde(rename = "AUTOMOBIL")]
    Car,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: Id<Tour>,
    #[serde(rename = "naziv")]
    pub name: String,
    #[serde(rename = "opis", default)]
    pub description: String,
    #[serde(rename = "tagovi", default)]
    pub tags: Option<String>,
    #[serde(rename = "tezina")]
    pub difficulty: Difficulty,
    pub status: TourStatus,
    #[serde(rename = "cijena", default)]
    pub price: f64,
    #[serde(rename = "recenzijaId", default)]
    pub review_id: Option<Id<Review>>,
    #[serde(rename = "autorId")]
    pub author_id: Id<User>,
    #[serde(deserialize_with = "utility::serde::date_time::deserialize_utc")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "utility::serde::date_time::deserialize_utc_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Length of the tour in kilometers.
    #[serde(rename = "duzina", default)]
    pub length_km: Option<f64>,
    #[serde(
        rename = "vremeObjave",
        default,
        deserialize_with = "utility::serde::date_time::deserialize_utc_option"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "vremeArhiviranja",
        default,
        deserialize_with = "utility::serde::date_time::deserialize_utc_option"
    )]
    pub archived_at: Option<DateTime<Utc>>,
    /// Minutes needed per means of transport.
    #[serde(rename = "prevozi", default)]
    pub transport_times: Option<BTreeMap<Transport, u32>>,
}

impl HasId for Tour {
    type IdType = i64;
}

impl Tour {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    pub fn formatted_length(&self) -> String {
        match self.length_km {
            Some(length) if length > 0.0 => format!("{:.2} km", length),
            _ => "unknown".to_owned(),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTourRequest {
    #[serde(rename = "naziv")]
    pub name: String,
    #[serde(rename = "opis")]
    pub description: String,
    #[serde(rename = "tagovi")]
    pub tags: Option<String>,
    #[serde(rename = "tezina")]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStats {
    pub total_tours: u64,
    pub draft_tours: u64,
    pub published_tours: u64,
    pub archived_tours: u64,
}
