//! Session controller: configuration lifecycle, engine orchestration and
//! focus-expiry notification

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    configuration::Configuration,
    engine::{EngineEvent, EngineState, TimerEngine},
};
use crate::{error::SessionError, services::NotificationSink};

/// Events published to session listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEvent {
    Started,
    FocusExpired,
    BreakExpired,
    BreakRestarted,
    Stopped,
}

impl From<EngineEvent> for PhaseEvent {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::FocusExpired => PhaseEvent::FocusExpired,
            EngineEvent::BreakExpired => PhaseEvent::BreakExpired,
        }
    }
}

/// Consistent view of the session for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: EngineState,
    pub remaining_seconds: Option<u32>,
    pub remaining_display: String,
    pub progress: f64,
    pub focus_seconds: u32,
    pub break_seconds: u32,
    pub alert_pending: bool,
    pub completed_focus_phases: u64,
}

/// Owns the engine and its configuration, and raises the focus alert
pub struct SessionController {
    engine: TimerEngine,
    config: Configuration,
    notifier: Box<dyn NotificationSink>,
    alert_pending: bool,
}

impl SessionController {
    pub fn new(config: Configuration, notifier: Box<dyn NotificationSink>) -> Self {
        Self {
            engine: TimerEngine::new(),
            config,
            notifier,
            alert_pending: false,
        }
    }

    pub fn set_focus_minutes(&mut self, minutes: u32) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.config.set_focus_minutes(minutes)?;
        info!("Focus duration set to {}s", self.config.focus_seconds());
        Ok(())
    }

    pub fn set_focus_hours_minutes(&mut self, hours: u32, minutes: u32) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.config.set_focus_hours_minutes(hours, minutes)?;
        info!("Focus duration set to {}s", self.config.focus_seconds());
        Ok(())
    }

    pub fn set_break_seconds(&mut self, seconds: u32) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.config.set_break_seconds(seconds)?;
        info!("Break duration set to {}s", self.config.break_seconds());
        Ok(())
    }

    /// Start a focus phase with the current configuration
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.engine
            .start(self.config.focus_seconds(), self.config.break_seconds())?;
        info!(
            "Session started: focus={}s, break={}s",
            self.config.focus_seconds(),
            self.config.break_seconds()
        );
        Ok(())
    }

    /// Stop the session. Returns whether a running session was stopped.
    pub fn stop(&mut self) -> bool {
        let was_running = self.engine.state().is_running();
        self.engine.stop();
        self.alert_pending = false;
        if was_running {
            info!("Session stopped");
        }
        was_running
    }

    /// Advance one second. A focus expiry notifies the sink exactly once.
    pub fn on_tick(&mut self) -> Option<PhaseEvent> {
        let event = self.engine.tick()?;
        match event {
            EngineEvent::FocusExpired => {
                info!("Focus phase expired, starting break");
                self.alert_pending = true;
                if let Err(e) = self.notifier.focus_expired() {
                    warn!("Failed to deliver focus alert: {}", e);
                }
            }
            EngineEvent::BreakExpired => {
                debug!("Break phase expired, resuming focus");
                if self.alert_pending {
                    debug!("Dropping unacknowledged focus alert");
                    self.alert_pending = false;
                }
            }
        }
        Some(event.into())
    }

    /// Dismiss the pending focus alert and restart the break from its full length.
    ///
    /// Returns whether the break was restarted. An alert only stays pending
    /// for the break that followed its focus expiry.
    pub fn acknowledge_alert(&mut self) -> Result<bool, SessionError> {
        if !self.alert_pending {
            return Err(SessionError::NoPendingAlert);
        }
        self.alert_pending = false;
        let restarted = self.engine.restart_break();
        if restarted {
            info!("Focus alert acknowledged, break restarted");
        } else {
            debug!("Focus alert acknowledged outside a break");
        }
        Ok(restarted)
    }

    /// Remaining time as `MM:SS`; minutes are not capped at 59.
    ///
    /// While idle this shows the configured focus duration.
    pub fn remaining_display(&self) -> String {
        let seconds = self
            .engine
            .remaining_seconds()
            .unwrap_or(self.config.focus_seconds());
        format_mmss(seconds)
    }

    pub fn progress(&self) -> f64 {
        self.engine.progress()
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.engine.remaining_seconds()
    }

    pub fn configuration(&self) -> Configuration {
        self.config
    }

    pub fn alert_pending(&self) -> bool {
        self.alert_pending
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.engine.state(),
            remaining_seconds: self.engine.remaining_seconds(),
            remaining_display: self.remaining_display(),
            progress: self.engine.progress(),
            focus_seconds: self.config.focus_seconds(),
            break_seconds: self.config.break_seconds(),
            alert_pending: self.alert_pending,
            completed_focus_phases: self.engine.completed_focus_phases(),
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.engine.state().is_running() {
            return Err(SessionError::InvalidConfiguration(
                "configuration can only change while the timer is idle".to_string(),
            ));
        }
        Ok(())
    }
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
