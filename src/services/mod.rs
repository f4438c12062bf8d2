//! External collaborator module
//!
//! This module contains the notification sink that alerts the user when a
//! focus phase expires.

pub mod notifier;

// Re-export main types
pub use notifier::{AlertConfig, AlertNotifier, NotificationSink};
