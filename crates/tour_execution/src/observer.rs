use model::{
    key_point::KeyPoint,
    tour_execution::{ExecutionStatus, TourExecution},
};
use tokio::sync::mpsc;

/// What the tracking flow reports to its host. The host decides how to
/// present it: alerts, map redraws, navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    WaypointsLoaded(Vec<KeyPoint>),
    PollingStarted,
    /// The location service had no position for the tourist; the tick was
    /// skipped.
    PositionUnavailable,
    ExecutionUpdated(TourExecution),
    /// A location round-trip failed. Polling goes on.
    UpdateFailed(String),
    /// Completing or abandoning failed. The user may retry.
    CommandFailed(String),
    /// The execution could not be loaded; the flow did not start.
    LoadFailed(String),
    Finished(ExecutionStatus),
    NavigateToTourList,
    PollingStopped,
}

impl TrackingEvent {
    /// Text to put in front of the user, for the events that warrant it.
    pub fn user_notice(&self) -> Option<String> {
        match self {
            TrackingEvent::Finished(ExecutionStatus::Completed) => {
                Some("The tour is completed!".to_owned())
            }
            TrackingEvent::Finished(ExecutionStatus::Abandoned) => {
                Some("The tour was abandoned.".to_owned())
            }
            TrackingEvent::Finished(ExecutionStatus::Started) => None,
            TrackingEvent::UpdateFailed(why) => {
                Some(format!("Could not update the location: {}", why))
            }
            TrackingEvent::CommandFailed(why) => Some(format!("Request failed: {}", why)),
            TrackingEvent::LoadFailed(why) => {
                Some(format!("Could not load the tour execution: {}", why))
            }
            _ => None,
        }
    }
}

pub trait Observer: Send + Sync {
    fn notify(&self, event: TrackingEvent);
}

impl Observer for mpsc::UnboundedSender<TrackingEvent> {
    fn notify(&self, event: TrackingEvent) {
        if self.send(event).is_err() {
            log::debug!("tracking observer is gone, dropping event");
        }
    }
}
