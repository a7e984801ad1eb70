use std::sync::Arc;

use config::TouristConfig;
use report::LogObserver;
use tour_api::{ApiClient, ApiConfig, ApiError, SessionContext};
use tour_execution::{Tracker, TrackerConfig, TrackingResult};

mod config;
mod report;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = TouristConfig::from_env().expect(
        "expected TOURIST_USERNAME, TOURIST_PASSWORD and a numeric TOURIST_TOUR_ID if set.",
    );
    let session = SessionContext::new();
    let client = ApiClient::new(ApiConfig::from_env(), session.clone())
        .expect("could not build http client.");

    if let Err(why) = run(config, Arc::new(client), session).await {
        log::error!("{}", why);
        std::process::exit(1);
    }
}

async fn run(
    config: TouristConfig,
    client: Arc<ApiClient>,
    session: SessionContext,
) -> TrackingResult<()> {
    client.login(&config.username, &config.password).await?;

    let execution = match client.active_execution().await? {
        Some(execution) => execution,
        None => match config.tour_id {
            Some(tour_id) => {
                let position = client
                    .current_location(&config.username)
                    .await?
                    .map(|location| location.position())
                    .ok_or_else(|| {
                        ApiError::InvalidInput(
                            "set a simulated position before starting a tour".to_owned(),
                        )
                    })?;
                log::info!("starting tour {}", tour_id);
                client.start_execution(tour_id, position).await?
            }
            None => {
                println!("No active tour execution.");
                client.logout().await;
                return Ok(());
            }
        },
    };

    let tracker = Tracker::new(
        client.clone(),
        session,
        Arc::new(LogObserver),
        TrackerConfig::from_env(),
    );
    let handle = tracker.begin(execution.id).await?;

    tokio::select! {
        _ = handle.stopped() => {}
        _ = tokio::signal::ctrl_c() => {
            log::info!("interrupted");
            handle.end();
        }
    }
    handle.stopped().await;

    println!("{}", report::summary(&handle.markers().await));
    client.logout().await;
    Ok(())
}
