//! State management module
//!
//! This module contains the timer engine, its configuration, the session
//! controller wrapping both, and the shared application state.

pub mod configuration;
pub mod engine;
pub mod session;
pub mod app_state;

// Re-export main types
pub use configuration::Configuration;
pub use engine::{EngineEvent, EngineState, TimerEngine};
pub use session::{format_mmss, PhaseEvent, SessionController, SessionSnapshot};
pub use app_state::AppState;
