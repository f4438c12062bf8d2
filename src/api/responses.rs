//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::SessionSnapshot;

/// API response structure for session-changing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: Option<SessionSnapshot>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: Option<SessionSnapshot>) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Create a successful response carrying the updated session
    pub fn ok(message: String, session: SessionSnapshot) -> Self {
        Self::new("ok".to_string(), message, Some(session))
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self::new("error".to_string(), message, None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusMinutesRequest {
    pub minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusHoursMinutesRequest {
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakSecondsRequest {
    pub seconds: u32,
}

/// Status response with session and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
