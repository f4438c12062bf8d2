//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod tick_source;
pub mod event_logger;

// Re-export main functions
pub use tick_source::tick_source_task;
pub use event_logger::event_logger_task;
