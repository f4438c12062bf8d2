//! Phase event logging task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::{AppState, PhaseEvent};

/// Background task that logs every phase event published by the session
pub async fn event_logger_task(state: Arc<AppState>) {
    let mut events = state.subscribe();

    loop {
        match events.recv().await {
            Ok(event) => {
                let remaining = state
                    .get_snapshot()
                    .map(|s| s.remaining_display)
                    .unwrap_or_default();
                info!("{} (remaining {})", describe(event), remaining);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event logger lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn describe(event: PhaseEvent) -> &'static str {
    match event {
        PhaseEvent::Started => "Focus phase started",
        PhaseEvent::FocusExpired => "Break phase started",
        PhaseEvent::BreakExpired => "Focus phase resumed",
        PhaseEvent::BreakRestarted => "Break restarted after acknowledgement",
        PhaseEvent::Stopped => "Timer stopped",
    }
}
