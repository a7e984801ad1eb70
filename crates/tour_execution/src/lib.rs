use std::error;
use std::fmt;

use model::tour_execution::{ExecutionStatus, TourExecution};
use tour_api::ApiError;
use utility::id::Id;

pub mod backend;
pub mod config;
pub mod markers;
pub mod observer;
pub mod tracker;

pub use backend::TrackingBackend;
pub use config::TrackerConfig;
pub use markers::{Markers, WaypointMarker, WaypointState};
pub use observer::{Observer, TrackingEvent};
pub use tracker::{Tracker, TrackingHandle};

#[derive(Debug, Clone)]
pub enum TrackingError {
    MissingExecutionId,
    NotFound(Id<TourExecution>),
    NotActive(ExecutionStatus),
    /// The flow was stopped before the request could be applied.
    Ended,
    Api(ApiError),
}

impl error::Error for TrackingError {}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackingError::MissingExecutionId => write!(f, "No tour execution id given."),
            TrackingError::NotFound(id) => write!(
                f,
                "No active tour execution {} found for the current user.",
                id
            ),
            TrackingError::NotActive(status) => {
                write!(f, "The tour execution is {}.", status.label())
            }
            TrackingError::Ended => write!(f, "Tracking has already ended."),
            TrackingError::Api(why) => write!(f, "{}", why.user_message()),
        }
    }
}

impl From<ApiError> for TrackingError {
    fn from(e: ApiError) -> Self {
        TrackingError::Api(e)
    }
}

pub type TrackingResult<T> = Result<T, TrackingError>;
