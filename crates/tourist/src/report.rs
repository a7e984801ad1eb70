use tour_execution::{Markers, Observer, TrackingEvent};
use utility::id::IdWrapper;

/// Writes tracking events to the log and user notices to stdout.
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&self, event: TrackingEvent) {
        if let Some(notice) = event.user_notice() {
            println!("{}", notice);
        }
        match event {
            TrackingEvent::WaypointsLoaded(waypoints) => {
                log::info!("tour has {} key points", waypoints.len());
                for key_point in waypoints {
                    log::debug!(
                        "key point {} '{}' at {}, {}",
                        key_point.id,
                        key_point.name,
                        key_point.latitude,
                        key_point.longitude
                    );
                }
            }
            TrackingEvent::PollingStarted => log::info!("tracking started"),
            TrackingEvent::PositionUnavailable => {
                log::warn!("no simulated position yet, set one in the simulator")
            }
            TrackingEvent::ExecutionUpdated(execution) => log::info!(
                "at {:.5}, {:.5}; completed key points {:?}",
                execution.current_latitude,
                execution.current_longitude,
                execution.completed_key_points.as_slice().raw()
            ),
            TrackingEvent::UpdateFailed(why) => log::warn!("update failed: {}", why),
            TrackingEvent::CommandFailed(why) => log::error!("command failed: {}", why),
            TrackingEvent::LoadFailed(why) => log::error!("load failed: {}", why),
            TrackingEvent::Finished(status) => log::info!("execution is {}", status),
            TrackingEvent::NavigateToTourList => log::debug!("leaving tour execution"),
            TrackingEvent::PollingStopped => log::info!("tracking stopped"),
        }
    }
}

pub fn summary(markers: &Markers) -> String {
    let mut text = format!(
        "{} of {} key points completed",
        markers.completed_count(),
        markers.len()
    );
    if let Some(next) = markers.next_pending() {
        text.push_str(&format!(
            ", next: '{}' in {:.2} km",
            next.key_point.content.name, next.key_point.distance_km
        ));
    }
    text
}
