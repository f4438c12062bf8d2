//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::{future::Future, sync::Arc};
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/acknowledge", post(acknowledge_handler))
        .route("/config/focus-minutes", post(focus_minutes_handler))
        .route("/config/focus", post(focus_hours_minutes_handler))
        .route("/config/break-seconds", post(break_seconds_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router until `shutdown` completes.
///
/// A shutdown future that fails (signal registration, for instance) is
/// returned as an error so the process exits non-zero.
pub async fn serve_until_shutdown<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = shutdown => {
            result.context("failed to listen for shutdown signals")?;
            info!("Shutdown signal received");
        }
    }
    Ok(())
}
