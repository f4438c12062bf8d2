//! One-second tick source driving the session

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// Background task that advances the session once per second
pub async fn tick_source_task(state: Arc<AppState>) {
    info!("Starting tick source task");

    let mut interval = interval(Duration::from_secs(1));
    // A late tick still counts as exactly one second; never burst to catch up
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        if let Err(e) = state.on_tick() {
            error!("Failed to advance session: {}", e);
        }
    }
}
