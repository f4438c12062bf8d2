//! Error types for the session core and the notification sink

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported synchronously by the engine and the session controller.
///
/// None of these leave the session in a different state than before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("a session is already running; stop it first")]
    AlreadyRunning,

    #[error("no focus alert is waiting to be acknowledged")]
    NoPendingAlert,

    #[error("session state lock poisoned")]
    StatePoisoned,
}

/// Failures while delivering a focus-expired notification. Logged, never fatal.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("alert sound not found: {}", .0.display())]
    SoundMissing(PathBuf),

    #[error("alert sound playback failed: {0}")]
    Playback(String),

    #[error("desktop notification failed: {0}")]
    Desktop(String),
}
