use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use model::{
    key_point::KeyPoint,
    location::TouristLocation,
    tour::Tour,
    tour_execution::{ExecutionStatus, LocationUpdate, TourExecution},
};
use tokio::{
    sync::mpsc,
    time::{sleep, timeout},
};
use tour_api::{
    session::{Claims, Session},
    ApiError, ApiResult, SessionContext,
};
use tour_execution::{
    Observer, Tracker, TrackerConfig, TrackingBackend, TrackingError, TrackingEvent,
    TrackingHandle, WaypointState,
};
use utility::{geo::Coordinates, id::Id};

const INTERVAL: Duration = Duration::from_secs(10);

fn execution(id: i64, status: ExecutionStatus) -> TourExecution {
    TourExecution {
        id: Some(Id::new(id)),
        tour_id: Id::new(7),
        tourist_username: "ana".to_owned(),
        status,
        start_time: Utc::now(),
        end_time: None,
        current_latitude: 44.78,
        current_longitude: 20.44,
        last_activity_time: Utc::now(),
        completed_key_points: Vec::new(),
    }
}

fn key_point(id: i64, latitude: f64, longitude: f64) -> KeyPoint {
    KeyPoint {
        id: Id::new(id),
        name: format!("kp-{id}"),
        description: String::new(),
        latitude,
        longitude,
        image_url: None,
        tour_id: Id::new(7),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn rejected(message: &str) -> ApiError {
    ApiError::InvalidResponse {
        status_code: reqwest::StatusCode::BAD_REQUEST,
        url: "http://backend/tours/tour-execution".to_owned(),
        message: Some(message.to_owned()),
    }
}

enum Reply {
    Status(ExecutionStatus),
    Complete(Vec<i64>),
    Fail(&'static str),
}

/// Scripted in-memory backend. Location replies are consumed one per tick;
/// once the script runs out every update echoes a STARTED execution.
struct FakeBackend {
    active: Mutex<Option<TourExecution>>,
    positions: Mutex<VecDeque<Option<Coordinates>>>,
    replies: Mutex<VecDeque<Reply>>,
    commands: Mutex<VecDeque<Result<ExecutionStatus, &'static str>>>,
    key_points: Mutex<Option<Vec<KeyPoint>>>,
    submitted: Mutex<Vec<(Id<TourExecution>, LocationUpdate)>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeBackend {
    fn new(active: Option<TourExecution>) -> Self {
        Self {
            active: Mutex::new(active),
            positions: Mutex::new(VecDeque::new()),
            replies: Mutex::new(VecDeque::new()),
            commands: Mutex::new(VecDeque::new()),
            key_points: Mutex::new(Some(vec![
                key_point(1, 44.81, 20.45),
                key_point(2, 44.82, 20.47),
            ])),
            submitted: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn reply(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn position(&self, position: Option<Coordinates>) {
        self.positions.lock().unwrap().push_back(position);
    }

    fn command(&self, result: Result<ExecutionStatus, &'static str>) {
        self.commands.lock().unwrap().push_back(result);
    }

    fn submitted(&self) -> Vec<(Id<TourExecution>, LocationUpdate)> {
        self.submitted.lock().unwrap().clone()
    }

    async fn round_trip(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn base(&self) -> TourExecution {
        self.active
            .lock()
            .unwrap()
            .clone()
            .expect("no execution configured")
    }
}

#[async_trait]
impl TrackingBackend for FakeBackend {
    async fn active_execution(&self) -> ApiResult<Option<TourExecution>> {
        Ok(self.active.lock().unwrap().clone())
    }

    async fn current_location(&self, username: &str) -> ApiResult<Option<TouristLocation>> {
        assert_eq!(username, "ana");
        let position = self
            .positions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Some(Coordinates::new(44.80, 20.46)));
        Ok(position.map(|position| TouristLocation {
            id: Id::new(1),
            username: username.to_owned(),
            latitude: position.latitude,
            longitude: position.longitude,
        }))
    }

    async fn submit_location(
        &self,
        id: Id<TourExecution>,
        update: LocationUpdate,
    ) -> ApiResult<TourExecution> {
        self.submitted.lock().unwrap().push((id, update));
        self.round_trip().await;
        let mut execution = self.base();
        execution.current_latitude = update.latitude;
        execution.current_longitude = update.longitude;
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            None => Ok(execution),
            Some(Reply::Status(status)) => {
                execution.status = status;
                Ok(execution)
            }
            Some(Reply::Complete(key_points)) => {
                execution.completed_key_points = key_points.into_iter().map(Id::new).collect();
                Ok(execution)
            }
            Some(Reply::Fail(message)) => Err(rejected(message)),
        }
    }

    async fn complete(&self, _id: Id<TourExecution>) -> ApiResult<TourExecution> {
        self.finish().await
    }

    async fn abandon(&self, _id: Id<TourExecution>) -> ApiResult<TourExecution> {
        self.finish().await
    }

    async fn key_points_by_tour(&self, tour_id: Id<Tour>) -> ApiResult<Vec<KeyPoint>> {
        assert_eq!(tour_id, Id::new(7));
        self.key_points
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| rejected("key point service unavailable"))
    }
}

impl FakeBackend {
    async fn finish(&self) -> ApiResult<TourExecution> {
        self.round_trip().await;
        let result = self
            .commands
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ExecutionStatus::Completed));
        match result {
            Ok(status) => {
                let mut execution = self.base();
                execution.status = status;
                Ok(execution)
            }
            Err(message) => Err(rejected(message)),
        }
    }
}

fn session() -> SessionContext {
    SessionContext::with_session(Session::new(
        "token",
        Claims {
            sub: "ana".to_owned(),
            role: Some("TOURIST".to_owned()),
            exp: None,
            iat: None,
            id: Some(9),
        },
    ))
}

struct Harness {
    backend: Arc<FakeBackend>,
    tracker: Tracker<FakeBackend>,
    events: mpsc::UnboundedReceiver<TrackingEvent>,
}

impl Harness {
    fn new(backend: FakeBackend) -> Self {
        let backend = Arc::new(backend);
        let (tx, events) = mpsc::unbounded_channel();
        let observer: Arc<dyn Observer> = Arc::new(tx);
        let tracker = Tracker::new(
            backend.clone(),
            session(),
            observer,
            TrackerConfig {
                poll_interval: INTERVAL,
            },
        );
        Self {
            backend,
            tracker,
            events,
        }
    }

    async fn begin(&self, id: i64) -> TrackingHandle<FakeBackend> {
        self.tracker.begin(Some(Id::new(id))).await.unwrap()
    }

    fn events(&mut self) -> Vec<TrackingEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

fn is_update(event: &TrackingEvent) -> bool {
    matches!(event, TrackingEvent::ExecutionUpdated(_))
}

#[tokio::test(start_paused = true)]
async fn first_tick_submits_simulated_position() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    let handle = harness.begin(42).await;

    let events = harness.events();
    assert!(matches!(&events[0], TrackingEvent::WaypointsLoaded(waypoints) if waypoints.len() == 2));
    assert_eq!(events[1], TrackingEvent::PollingStarted);
    assert!(harness.backend.submitted().is_empty());

    sleep(INTERVAL + Duration::from_millis(1)).await;

    assert_eq!(
        harness.backend.submitted(),
        vec![(
            Id::new(42),
            LocationUpdate {
                latitude: 44.80,
                longitude: 20.46
            }
        )]
    );
    let execution = handle.execution().await;
    assert_eq!(execution.current_latitude, 44.80);
    assert_eq!(execution.current_longitude, 20.46);
    assert!(harness.events().iter().any(is_update));
    assert!(handle.is_running());
    handle.end();
}

#[tokio::test(start_paused = true)]
async fn missing_id_leaves_without_loading() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    let result = harness.tracker.begin(None).await;
    assert!(matches!(result, Err(TrackingError::MissingExecutionId)));

    let events = harness.events();
    assert!(matches!(events[0], TrackingEvent::LoadFailed(_)));
    assert_eq!(events[1], TrackingEvent::NavigateToTourList);
}

#[tokio::test(start_paused = true)]
async fn other_users_execution_is_not_tracked() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        41,
        ExecutionStatus::Started,
    ))));
    let result = harness.tracker.begin(Some(Id::new(42))).await;
    assert!(matches!(result, Err(TrackingError::NotFound(id)) if id == Id::new(42)));
    assert_eq!(
        harness.events().last(),
        Some(&TrackingEvent::NavigateToTourList)
    );

    let mut harness = Harness::new(FakeBackend::new(None));
    assert!(harness.tracker.begin(Some(Id::new(42))).await.is_err());
    assert!(matches!(harness.events()[0], TrackingEvent::LoadFailed(_)));
}

#[tokio::test(start_paused = true)]
async fn finished_execution_never_sends_updates() {
    for status in [ExecutionStatus::Completed, ExecutionStatus::Abandoned] {
        let mut harness = Harness::new(FakeBackend::new(Some(execution(42, status))));
        let result = harness.tracker.begin(Some(Id::new(42))).await;
        assert!(matches!(result, Err(TrackingError::NotActive(s)) if s == status));

        sleep(INTERVAL * 5).await;

        assert!(harness.backend.submitted().is_empty());
        assert_eq!(
            harness.events(),
            vec![
                TrackingEvent::Finished(status),
                TrackingEvent::NavigateToTourList
            ]
        );
    }
}

#[tokio::test(start_paused = true)]
async fn completion_stops_the_timer() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    harness.backend.reply(Reply::Complete(vec![1]));
    harness.backend.reply(Reply::Status(ExecutionStatus::Completed));
    let handle = harness.begin(42).await;
    harness.events();

    sleep(INTERVAL * 2 + Duration::from_millis(1)).await;
    assert_eq!(harness.backend.submitted().len(), 2);
    assert!(!handle.is_running());

    sleep(INTERVAL * 6).await;
    assert_eq!(harness.backend.submitted().len(), 2);

    let events = harness.events();
    let tail: Vec<_> = events.iter().filter(|event| !is_update(event)).collect();
    assert_eq!(
        tail,
        vec![
            &TrackingEvent::Finished(ExecutionStatus::Completed),
            &TrackingEvent::NavigateToTourList,
            &TrackingEvent::PollingStopped
        ]
    );
    assert_eq!(handle.execution().await.status, ExecutionStatus::Completed);
    handle.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn failed_update_keeps_state_and_polling() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    harness.backend.reply(Reply::Fail("Tour execution is locked"));
    let handle = harness.begin(42).await;
    let before = handle.execution().await;
    harness.events();

    sleep(INTERVAL + Duration::from_millis(1)).await;
    assert_eq!(handle.execution().await, before);
    assert_eq!(
        handle.last_error().await.as_deref(),
        Some("Tour execution is locked")
    );
    assert_eq!(
        harness.events(),
        vec![TrackingEvent::UpdateFailed(
            "Tour execution is locked".to_owned()
        )]
    );

    sleep(INTERVAL).await;
    assert_eq!(harness.backend.submitted().len(), 2);
    assert!(handle.is_running());
    assert!(handle.last_error().await.is_none());
    handle.end();
}

#[tokio::test(start_paused = true)]
async fn missing_position_skips_the_tick() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    harness.backend.position(None);
    let handle = harness.begin(42).await;
    harness.events();

    sleep(INTERVAL + Duration::from_millis(1)).await;
    assert!(harness.backend.submitted().is_empty());
    assert_eq!(harness.events(), vec![TrackingEvent::PositionUnavailable]);

    sleep(INTERVAL).await;
    assert_eq!(harness.backend.submitted().len(), 1);
    handle.end();
}

#[tokio::test(start_paused = true)]
async fn waypoint_failure_is_not_fatal() {
    let backend = FakeBackend::new(Some(execution(42, ExecutionStatus::Started)));
    *backend.key_points.lock().unwrap() = None;
    let mut harness = Harness::new(backend);

    let handle = harness.begin(42).await;
    assert!(handle.waypoints().await.is_empty());
    assert_eq!(
        harness.events(),
        vec![
            TrackingEvent::WaypointsLoaded(Vec::new()),
            TrackingEvent::PollingStarted
        ]
    );

    sleep(INTERVAL + Duration::from_millis(1)).await;
    assert_eq!(harness.backend.submitted().len(), 1);
    handle.end();
}

#[tokio::test(start_paused = true)]
async fn end_is_idempotent() {
    let harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    let handle = harness.begin(42).await;

    handle.end();
    handle.end();
    assert!(!handle.is_running());
    handle.stopped().await;
    handle.stopped().await;

    sleep(INTERVAL * 3).await;
    assert!(harness.backend.submitted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_polling() {
    let harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    drop(harness.begin(42).await);

    sleep(INTERVAL * 3).await;
    assert!(harness.backend.submitted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_updates_never_overlap() {
    let mut harness = Harness::new(
        FakeBackend::new(Some(execution(42, ExecutionStatus::Started)))
            .with_latency(Duration::from_secs(25)),
    );
    let handle = harness.begin(42).await;

    sleep(Duration::from_secs(100)).await;

    // every round-trip takes 25s followed by a 10s pause
    assert_eq!(harness.backend.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(harness.backend.submitted().len(), 3);
    assert_eq!(harness.events().iter().filter(|e| is_update(e)).count(), 2);
    handle.end();
}

#[tokio::test(start_paused = true)]
async fn response_after_end_is_discarded() {
    let mut harness = Harness::new(
        FakeBackend::new(Some(execution(42, ExecutionStatus::Started)))
            .with_latency(Duration::from_secs(5)),
    );
    harness.backend.reply(Reply::Status(ExecutionStatus::Completed));
    let handle = harness.begin(42).await;
    let before = handle.execution().await;
    harness.events();

    // the first update is in flight between 10s and 15s
    sleep(Duration::from_secs(12)).await;
    assert_eq!(harness.backend.submitted().len(), 1);
    handle.end();

    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.execution().await, before);
    assert_eq!(harness.events(), vec![TrackingEvent::PollingStopped]);
}

#[tokio::test(start_paused = true)]
async fn failed_command_can_be_retried() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    harness
        .backend
        .command(Err("Not all key points are completed"));
    harness.backend.command(Ok(ExecutionStatus::Abandoned));
    let handle = harness.begin(42).await;
    harness.events();

    let result = handle.complete().await;
    assert!(matches!(result, Err(TrackingError::Api(_))));
    assert_eq!(
        harness.events(),
        vec![TrackingEvent::CommandFailed(
            "Not all key points are completed".to_owned()
        )]
    );
    assert!(handle.is_running());

    sleep(INTERVAL + Duration::from_millis(1)).await;
    assert_eq!(harness.backend.submitted().len(), 1);

    let execution = handle.abandon().await.unwrap();
    assert_eq!(execution.status, ExecutionStatus::Abandoned);
    assert!(!handle.is_running());
    handle.stopped().await;

    let events = harness.events();
    let tail: Vec<_> = events.iter().filter(|event| !is_update(event)).collect();
    assert_eq!(
        tail,
        vec![
            &TrackingEvent::Finished(ExecutionStatus::Abandoned),
            &TrackingEvent::NavigateToTourList,
            &TrackingEvent::PollingStopped
        ]
    );
    assert!(matches!(handle.complete().await, Err(TrackingError::Ended)));
}

#[tokio::test(start_paused = true)]
async fn markers_follow_completed_key_points() {
    let harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    harness.backend.reply(Reply::Complete(vec![1]));
    let handle = harness.begin(42).await;

    let markers = handle.markers().await;
    assert_eq!(markers.completed_count(), 0);

    sleep(INTERVAL + Duration::from_millis(1)).await;
    let markers = handle.markers().await;
    assert_eq!(
        markers.get(&Id::new(1)).unwrap().state,
        WaypointState::Completed
    );
    assert_eq!(
        markers.get(&Id::new(2)).unwrap().state,
        WaypointState::Pending
    );
    assert_eq!(
        markers.next_pending().unwrap().key_point.content.id,
        Id::new(2)
    );
    handle.end();
}

#[tokio::test(start_paused = true)]
async fn abandoned_wait_for_stop_does_not_detach_the_loop() {
    let mut harness = Harness::new(FakeBackend::new(Some(execution(
        42,
        ExecutionStatus::Started,
    ))));
    let handle = harness.begin(42).await;
    harness.events();

    assert!(timeout(Duration::from_secs(1), handle.stopped())
        .await
        .is_err());
    assert!(handle.is_running());

    handle.end();
    handle.stopped().await;
    assert_eq!(harness.events(), vec![TrackingEvent::PollingStopped]);

    // a later call returns at once
    handle.stopped().await;
}
