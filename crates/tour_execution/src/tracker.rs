use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};

use futures::FutureExt;
use model::{
    key_point::KeyPoint,
    tour_execution::{LocationUpdate, TourExecution},
};
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
    time::sleep,
};
use tokio_util::sync::CancellationToken;
use tour_api::SessionContext;
use utility::id::Id;

use crate::{
    backend::TrackingBackend,
    config::TrackerConfig,
    markers::Markers,
    observer::{Observer, TrackingEvent},
    TrackingError, TrackingResult,
};

#[derive(Clone, Copy)]
enum Continuation {
    Continue,
    Exit,
}

#[derive(Clone, Copy, Debug)]
enum Command {
    Complete,
    Abandon,
}

/// Starts tracking flows for tour executions.
pub struct Tracker<B: TrackingBackend> {
    backend: Arc<B>,
    session: SessionContext,
    observer: Arc<dyn Observer>,
    config: TrackerConfig,
}

impl<B> Tracker<B>
where
    B: TrackingBackend + 'static,
{
    pub fn new(
        backend: Arc<B>,
        session: SessionContext,
        observer: Arc<dyn Observer>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            backend,
            session,
            observer,
            config,
        }
    }

    /// Loads the execution and, if it is still running, starts polling the
    /// tourist's position. Any other outcome is reported to the observer,
    /// followed by a request to go back to the tour list.
    pub async fn begin(
        &self,
        execution_id: Option<Id<TourExecution>>,
    ) -> TrackingResult<TrackingHandle<B>> {
        let Some(execution_id) = execution_id else {
            return Err(self.leave(TrackingError::MissingExecutionId));
        };

        let execution = match self.backend.active_execution().await {
            Ok(Some(execution)) if execution.id == Some(execution_id) => execution,
            Ok(_) => return Err(self.leave(TrackingError::NotFound(execution_id))),
            Err(why) => return Err(self.leave(TrackingError::Api(why))),
        };
        log::info!(
            "loaded tour execution {} of tour {} ({})",
            execution_id,
            execution.tour_id,
            execution.status
        );

        if !execution.is_active() {
            self.observer.notify(TrackingEvent::Finished(execution.status));
            self.observer.notify(TrackingEvent::NavigateToTourList);
            return Err(TrackingError::NotActive(execution.status));
        }

        let waypoints = match self.backend.key_points_by_tour(execution.tour_id).await {
            Ok(waypoints) => waypoints,
            Err(why) => {
                log::error!(
                    "could not load key points of tour {}: {}",
                    execution.tour_id,
                    why
                );
                Vec::new()
            }
        };
        self.observer
            .notify(TrackingEvent::WaypointsLoaded(waypoints.clone()));

        let shared = Arc::new(Shared {
            backend: self.backend.clone(),
            session: self.session.clone(),
            observer: self.observer.clone(),
            execution_id,
            state: RwLock::new(TrackingState {
                execution,
                waypoints,
                last_error: None,
            }),
            in_flight: Mutex::new(()),
            token: CancellationToken::new(),
        });
        let task = tokio::spawn(poll(shared.clone(), self.config.poll_interval));
        log::info!(
            "polling location every {:?} for execution {}",
            self.config.poll_interval,
            execution_id
        );
        self.observer.notify(TrackingEvent::PollingStarted);

        Ok(TrackingHandle {
            shared,
            task: Mutex::new(Some(task)),
        })
    }

    fn leave(&self, error: TrackingError) -> TrackingError {
        log::error!("tour execution could not be loaded: {}", error);
        self.observer
            .notify(TrackingEvent::LoadFailed(error.to_string()));
        self.observer.notify(TrackingEvent::NavigateToTourList);
        error
    }
}

struct TrackingState {
    execution: TourExecution,
    waypoints: Vec<KeyPoint>,
    last_error: Option<String>,
}

struct Shared<B: TrackingBackend> {
    backend: Arc<B>,
    session: SessionContext,
    observer: Arc<dyn Observer>,
    execution_id: Id<TourExecution>,
    state: RwLock<TrackingState>,
    /// Held for the whole round-trip of a tick or a command.
    in_flight: Mutex<()>,
    token: CancellationToken,
}

impl<B: TrackingBackend> Shared<B> {
    async fn tick(&self) -> Continuation {
        let _in_flight = self.in_flight.lock().await;
        if self.token.is_cancelled() {
            return Continuation::Exit;
        }

        let username = match self.session.username().await {
            Ok(username) => username,
            Err(why) => {
                self.update_failed(why.user_message()).await;
                return Continuation::Continue;
            }
        };

        let position = match self.backend.current_location(&username).await {
            Ok(Some(location)) => location.position(),
            Ok(None) => {
                log::warn!("no simulated position for '{}', skipping", username);
                self.observer.notify(TrackingEvent::PositionUnavailable);
                return Continuation::Continue;
            }
            Err(why) => {
                if self.token.is_cancelled() {
                    return Continuation::Exit;
                }
                self.update_failed(why.user_message()).await;
                return Continuation::Continue;
            }
        };
        if self.token.is_cancelled() {
            return Continuation::Exit;
        }

        log::debug!(
            "sending location {}, {} for execution {}",
            position.latitude,
            position.longitude,
            self.execution_id
        );
        let result = self
            .backend
            .submit_location(self.execution_id, LocationUpdate::from(position))
            .await;
        if self.token.is_cancelled() {
            log::debug!("discarding location response after tracking ended");
            return Continuation::Exit;
        }

        match result {
            Ok(execution) => self.apply(execution).await,
            Err(why) => {
                self.update_failed(why.user_message()).await;
                Continuation::Continue
            }
        }
    }

    async fn apply(&self, execution: TourExecution) -> Continuation {
        let status = execution.status;
        {
            let mut state = self.state.write().await;
            state.execution = execution.clone();
            state.last_error = None;
        }
        self.observer
            .notify(TrackingEvent::ExecutionUpdated(execution));

        if status.is_terminal() {
            self.token.cancel();
            log::info!("tour execution {} is {}", self.execution_id, status);
            self.observer.notify(TrackingEvent::Finished(status));
            self.observer.notify(TrackingEvent::NavigateToTourList);
            Continuation::Exit
        } else {
            Continuation::Continue
        }
    }

    async fn update_failed(&self, message: String) {
        log::error!(
            "location update for execution {} failed: {}",
            self.execution_id,
            message
        );
        self.state.write().await.last_error = Some(message.clone());
        self.observer.notify(TrackingEvent::UpdateFailed(message));
    }

    async fn command(&self, command: Command) -> TrackingResult<TourExecution> {
        let _in_flight = self.in_flight.lock().await;
        if self.token.is_cancelled() {
            return Err(TrackingError::Ended);
        }

        log::info!("{:?} tour execution {}", command, self.execution_id);
        let result = match command {
            Command::Complete => self.backend.complete(self.execution_id).await,
            Command::Abandon => self.backend.abandon(self.execution_id).await,
        };
        if self.token.is_cancelled() {
            log::debug!("discarding {:?} response after tracking ended", command);
            return result.map_err(TrackingError::Api);
        }

        match result {
            Ok(execution) => {
                // a STARTED answer keeps polling
                self.apply(execution.clone()).await;
                Ok(execution)
            }
            Err(why) => {
                let message = why.user_message();
                log::error!("{:?} failed: {}", command, message);
                self.state.write().await.last_error = Some(message.clone());
                self.observer.notify(TrackingEvent::CommandFailed(message));
                Err(TrackingError::Api(why))
            }
        }
    }
}

/// Runs ticks back to back: the pause starts only after the previous
/// round-trip resolved, so at most one update is in flight.
async fn poll<B>(shared: Arc<Shared<B>>, interval: Duration)
where
    B: TrackingBackend + 'static,
{
    loop {
        tokio::select! {
            _ = shared.token.cancelled() => break,
            _ = sleep(interval) => {}
        }

        let tick = AssertUnwindSafe(shared.tick()).catch_unwind();
        let result = tokio::select! {
            _ = shared.token.cancelled() => break,
            result = tick => result,
        };

        match result {
            Ok(Continuation::Continue) => {}
            Ok(Continuation::Exit) => break,
            Err(why) => {
                log::error!("location tick paniced: {:?}", why);
                shared
                    .update_failed("internal error while updating the location".to_owned())
                    .await;
            }
        }
    }
    log::info!("stopped location updates for execution {}", shared.execution_id);
    shared.observer.notify(TrackingEvent::PollingStopped);
}

/// A running tracking flow. Dropping the handle ends it.
pub struct TrackingHandle<B: TrackingBackend> {
    shared: Arc<Shared<B>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<B: TrackingBackend> TrackingHandle<B> {
    pub fn execution_id(&self) -> Id<TourExecution> {
        self.shared.execution_id
    }

    /// Last execution state confirmed by the server.
    pub async fn execution(&self) -> TourExecution {
        self.shared.state.read().await.execution.clone()
    }

    pub async fn waypoints(&self) -> Vec<KeyPoint> {
        self.shared.state.read().await.waypoints.clone()
    }

    pub async fn markers(&self) -> Markers {
        let state = self.shared.state.read().await;
        Markers::classify(&state.waypoints, &state.execution)
    }

    pub async fn last_error(&self) -> Option<String> {
        self.shared.state.read().await.last_error.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.shared.token.is_cancelled()
    }

    pub async fn complete(&self) -> TrackingResult<TourExecution> {
        self.shared.command(Command::Complete).await
    }

    pub async fn abandon(&self) -> TrackingResult<TourExecution> {
        self.shared.command(Command::Abandon).await
    }

    /// Stops polling. Responses still in flight are discarded. Calling it
    /// again has no effect.
    pub fn end(&self) {
        self.shared.token.cancel();
    }

    /// Resolves once the polling loop has exited. Dropping the future early
    /// leaves the task in place for the next call.
    pub async fn stopped(&self) {
        let mut task = self.task.lock().await;
        if let Some(running) = task.as_mut() {
            if let Err(why) = running.await {
                log::error!("polling task failed: {}", why);
            }
            *task = None;
        }
    }
}

impl<B: TrackingBackend> Drop for TrackingHandle<B> {
    fn drop(&mut self) {
        self.shared.token.cancel();
    }
}
