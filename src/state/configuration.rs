//! Focus and break duration configuration

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Allowed focus duration in seconds (one minute up to just under a day)
pub const FOCUS_SECONDS_RANGE: RangeInclusive<u32> = 60..=86_399;
/// Allowed break duration in seconds
pub const BREAK_SECONDS_RANGE: RangeInclusive<u32> = 10..=3_599;

pub const DEFAULT_FOCUS_SECONDS: u32 = 20 * 60;
pub const DEFAULT_BREAK_SECONDS: u32 = 20;

/// Validated durations for both phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    focus_seconds: u32,
    break_seconds: u32,
}

impl Configuration {
    /// Build a configuration, validating both durations
    pub fn new(focus_seconds: u32, break_seconds: u32) -> Result<Self, SessionError> {
        Ok(Self {
            focus_seconds: validate_focus(focus_seconds)?,
            break_seconds: validate_break(break_seconds)?,
        })
    }

    pub fn focus_seconds(&self) -> u32 {
        self.focus_seconds
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_seconds
    }

    /// Set the focus duration from a whole number of minutes
    pub fn set_focus_minutes(&mut self, minutes: u32) -> Result<(), SessionError> {
        let seconds = minutes.checked_mul(60).ok_or_else(|| {
            SessionError::InvalidConfiguration(format!("focus of {} minutes is too long", minutes))
        })?;
        self.focus_seconds = validate_focus(seconds)?;
        Ok(())
    }

    /// Set the focus duration from an hours/minutes pair, as picked on a clock wheel
    pub fn set_focus_hours_minutes(&mut self, hours: u32, minutes: u32) -> Result<(), SessionError> {
        if hours > 23 {
            return Err(SessionError::InvalidConfiguration(format!(
                "hours must be between 0 and 23, got {}",
                hours
            )));
        }
        if minutes > 59 {
            return Err(SessionError::InvalidConfiguration(format!(
                "minutes must be between 0 and 59, got {}",
                minutes
            )));
        }
        self.focus_seconds = validate_focus(hours * 3600 + minutes * 60)?;
        Ok(())
    }

    pub fn set_break_seconds(&mut self, seconds: u32) -> Result<(), SessionError> {
        self.break_seconds = validate_break(seconds)?;
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            focus_seconds: DEFAULT_FOCUS_SECONDS,
            break_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

fn validate_focus(seconds: u32) -> Result<u32, SessionError> {
    if FOCUS_SECONDS_RANGE.contains(&seconds) {
        Ok(seconds)
    } else {
        Err(SessionError::InvalidConfiguration(format!(
            "focus duration must be between {} and {} seconds, got {}",
            FOCUS_SECONDS_RANGE.start(),
            FOCUS_SECONDS_RANGE.end(),
            seconds
        )))
    }
}

fn validate_break(seconds: u32) -> Result<u32, SessionError> {
    if BREAK_SECONDS_RANGE.contains(&seconds) {
        Ok(seconds)
    } else {
        Err(SessionError::InvalidConfiguration(format!(
            "break duration must be between {} and {} seconds, got {}",
            BREAK_SECONDS_RANGE.start(),
            BREAK_SECONDS_RANGE.end(),
            seconds
        )))
    }
}
