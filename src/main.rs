//! Focus Loop - a focus/break interval timer
//!
//! This is the main entry point for the focus-loop daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_loop::{
    config::Config,
    state::{AppState, SessionController},
    api::{create_router, serve_until_shutdown},
    services::AlertNotifier,
    tasks::{event_logger_task, tick_source_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_loop={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-loop v{}", env!("CARGO_PKG_VERSION"));

    let timer_config = config.timer_configuration()?;
    info!("Configuration: host={}, port={}, focus={}s, break={}s",
          config.host, config.port, timer_config.focus_seconds(), timer_config.break_seconds());

    // Create the session and application state
    let notifier = AlertNotifier::new(config.alert_config());
    let session = SessionController::new(timer_config, Box::new(notifier));
    let state = Arc::new(AppState::new(config.port, config.host.clone(), session));

    // Start the background tasks
    let logger_state = Arc::clone(&state);
    tokio::spawn(async move {
        event_logger_task(logger_state).await;
    });

    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_source_task(tick_state).await;
    });

    if config.autostart {
        state.start()?;
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                - Start a focus phase");
    info!("  POST /stop                 - Stop the timer");
    info!("  POST /acknowledge          - Dismiss the focus alert and restart the break");
    info!("  POST /config/focus-minutes - Set focus duration in minutes");
    info!("  POST /config/focus         - Set focus duration in hours and minutes");
    info!("  POST /config/break-seconds - Set break duration in seconds");
    info!("  GET  /status               - Current phase, remaining time and progress");
    info!("  GET  /health               - Health check");

    // Serve until a shutdown signal arrives
    serve_until_shutdown(listener, app, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}
