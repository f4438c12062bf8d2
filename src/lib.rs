//! Focus Loop - a focus/break interval timer
//!
//! This library provides a tick-driven focus/break countdown engine, the
//! session controller that configures it and raises the focus alert, and the
//! daemon pieces (tick source, notifier, HTTP API) that host it.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{NotifyError, SessionError};
pub use state::{AppState, Configuration, EngineState, SessionController, TimerEngine};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
