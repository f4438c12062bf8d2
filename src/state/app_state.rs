//! Shared application state owning the single timer session

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{error, warn};

use super::{PhaseEvent, SessionController, SessionSnapshot};
use crate::error::SessionError;

/// Main application state shared by the tick task and the HTTP handlers
pub struct AppState {
    /// The one and only session; every read and write takes this lock
    pub session: Arc<Mutex<SessionController>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Phase events for any number of listeners
    pub event_tx: broadcast::Sender<PhaseEvent>,
    /// Latest snapshot, published after every completed mutation
    pub snapshot_tx: watch::Sender<SessionSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl AppState {
    /// Create a new AppState around a session controller
    pub fn new(port: u16, host: String, session: SessionController) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        Self {
            session: Arc::new(Mutex::new(session)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply an operation to the session, then publish the resulting snapshot.
    ///
    /// The snapshot is taken under the same lock as the mutation, so readers
    /// never see a half-applied transition.
    pub fn update_session<F, T>(&self, action: &str, updater: F) -> Result<(T, SessionSnapshot), SessionError>
    where
        F: FnOnce(&mut SessionController) -> Result<T, SessionError>,
    {
        let mut session = self.session.lock()
            .map_err(|_| SessionError::StatePoisoned)?;

        let value = updater(&mut session)?;
        let snapshot = session.snapshot();
        drop(session); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish_snapshot(snapshot.clone());
        Ok((value, snapshot))
    }

    pub fn start(&self) -> Result<SessionSnapshot, SessionError> {
        let (_, snapshot) = self.update_session("start", |session| session.start())?;
        self.publish_event(PhaseEvent::Started);
        Ok(snapshot)
    }

    pub fn stop(&self) -> Result<SessionSnapshot, SessionError> {
        let (stopped, snapshot) = self.update_session("stop", |session| Ok(session.stop()))?;
        if stopped {
            self.publish_event(PhaseEvent::Stopped);
        }
        Ok(snapshot)
    }

    /// Acknowledge the focus alert. Returns whether the break was restarted.
    pub fn acknowledge(&self) -> Result<(bool, SessionSnapshot), SessionError> {
        let (restarted, snapshot) =
            self.update_session("acknowledge", |session| session.acknowledge_alert())?;
        if restarted {
            self.publish_event(PhaseEvent::BreakRestarted);
        }
        Ok((restarted, snapshot))
    }

    pub fn set_focus_minutes(&self, minutes: u32) -> Result<SessionSnapshot, SessionError> {
        self.update_session("focus-minutes", |session| session.set_focus_minutes(minutes))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn set_focus_hours_minutes(&self, hours: u32, minutes: u32) -> Result<SessionSnapshot, SessionError> {
        self.update_session("focus", |session| session.set_focus_hours_minutes(hours, minutes))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn set_break_seconds(&self, seconds: u32) -> Result<SessionSnapshot, SessionError> {
        self.update_session("break-seconds", |session| session.set_break_seconds(seconds))
            .map(|(_, snapshot)| snapshot)
    }

    /// Advance the session by one second. Does not count as a user action.
    pub fn on_tick(&self) -> Result<Option<PhaseEvent>, SessionError> {
        let mut session = self.session.lock()
            .map_err(|_| SessionError::StatePoisoned)?;

        let event = session.on_tick();
        let snapshot = session.snapshot();
        drop(session);

        self.publish_snapshot(snapshot);
        if let Some(event) = event {
            self.publish_event(event);
        }
        Ok(event)
    }

    /// Get a consistent snapshot of the session
    pub fn get_snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.session.lock()
            .map(|session| session.snapshot())
            .map_err(|_| SessionError::StatePoisoned)
    }

    /// Subscribe to phase events
    pub fn subscribe(&self) -> broadcast::Receiver<PhaseEvent> {
        self.event_tx.subscribe()
    }

    /// Watch the latest snapshot
    pub fn watch_snapshot(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn publish_snapshot(&self, snapshot: SessionSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            error!("Failed to publish session snapshot: {}", e);
        }
    }

    fn publish_event(&self, event: PhaseEvent) {
        // No receivers is normal when nothing is listening
        if self.event_tx.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.event_tx.send(event) {
            warn!("Failed to send phase event {:?}: {}", event, e);
        }
    }
}
