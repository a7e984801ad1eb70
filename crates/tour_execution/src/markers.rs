use indexmap::IndexMap;
use model::{key_point::KeyPoint, tour_execution::TourExecution, WithDistance};
use utility::id::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointState {
    Completed,
    Pending,
}

#[derive(Debug, Clone)]
pub struct WaypointMarker {
    pub state: WaypointState,
    /// Distance is measured from the tourist's last known position.
    pub key_point: WithDistance<KeyPoint>,
}

impl WaypointMarker {
    pub fn is_completed(&self) -> bool {
        self.state == WaypointState::Completed
    }
}

/// Map markers for the waypoints of a tour, in tour order, keyed by
/// waypoint id so a host can restyle single markers after an update.
#[derive(Debug, Clone, Default)]
pub struct Markers {
    by_id: IndexMap<Id<KeyPoint>, WaypointMarker>,
}

impl Markers {
    pub fn classify(waypoints: &[KeyPoint], execution: &TourExecution) -> Self {
        let position = execution.position();
        let by_id = waypoints
            .iter()
            .map(|key_point| {
                let state = if execution.is_key_point_completed(&key_point.id) {
                    WaypointState::Completed
                } else {
                    WaypointState::Pending
                };
                let marker = WaypointMarker {
                    state,
                    key_point: key_point.clone().with_distance_to(&position),
                };
                (key_point.id, marker)
            })
            .collect();
        Self { by_id }
    }

    pub fn get(&self, id: &Id<KeyPoint>) -> Option<&WaypointMarker> {
        self.by_id.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaypointMarker> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.iter().filter(|marker| marker.is_completed()).count()
    }

    /// The closest waypoint not yet reached.
    pub fn next_pending(&self) -> Option<&WaypointMarker> {
        self.iter()
            .filter(|marker| !marker.is_completed())
            .min_by(|a, b| a.key_point.distance_km.total_cmp(&b.key_point.distance_km))
    }
}
