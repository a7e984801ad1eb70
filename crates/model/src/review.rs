use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::tour::Tour;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id<Review>,
    pub rating: u8,
    pub comment: String,
    pub tourist_name: String,
    pub tour_id: Id<Tour>,
    pub date_visited: NaiveDate,
    #[serde(deserialize_with = "utility::serde::date_time::deserialize_utc")]
    pub date_posted: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl HasId for Review {
    type IdType = i64;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewError {
    RatingOutOfRange(u8),
    VisitInFuture(NaiveDate),
}

impl std::error::Error for ReviewError {}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RatingOutOfRange(rating) => write!(
                f,
                "rating {} is outside of {}..={}",
                rating, MIN_RATING, MAX_RATING
            ),
            Self::VisitInFuture(date) => write!(f, "visit date {} lies in the future", date),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    rating: u8,
    comment: String,
    tourist_name: String,
    tour_id: Id<Tour>,
    /// Serialized as `YYYY-MM-DD`.
    date_visited: NaiveDate,
    images: Option<Vec<String>>,
}

impl CreateReviewRequest {
    pub fn new<S: Into<String>, N: Into<String>>(
        tour_id: Id<Tour>,
        tourist_name: N,
        rating: u8,
        comment: S,
        date_visited: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }
        if date_visited > today {
            return Err(ReviewError::VisitInFuture(date_visited));
        }
        Ok(Self {
            rating,
            comment: comment.into(),
            tourist_name: tourist_name.into(),
            tour_id,
            date_visited,
            images: None,
        })
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = if images.is_empty() { None } else { Some(images) };
        self
    }

    pub fn tour_id(&self) -> Id<Tour> {
        self.tour_id
    }
}
