//! Focus/break countdown state machine driven by discrete ticks

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Phase the engine is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    RunningFocus,
    RunningBreak,
}

impl EngineState {
    pub fn is_running(&self) -> bool {
        !matches!(self, EngineState::Idle)
    }
}

/// Phase transition produced by a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Focus countdown reached zero; the break phase has begun
    FocusExpired,
    /// Break countdown reached zero; a new focus phase has begun
    BreakExpired,
}

/// Countdown engine. Each `tick` represents exactly one elapsed second.
///
/// The remaining time never rests at zero: the tick that reaches zero also
/// switches to the other phase and reloads its full duration.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: EngineState,
    remaining_seconds: u32,
    focus_seconds: u32,
    break_seconds: u32,
    completed_focus_phases: u64,
}

impl TimerEngine {
    /// Create an idle engine
    pub fn new() -> Self {
        Self {
            state: EngineState::Idle,
            remaining_seconds: 0,
            focus_seconds: 0,
            break_seconds: 0,
            completed_focus_phases: 0,
        }
    }

    /// Begin a focus phase. The durations stay frozen until `stop`.
    pub fn start(&mut self, focus_seconds: u32, break_seconds: u32) -> Result<(), SessionError> {
        if self.state.is_running() {
            return Err(SessionError::AlreadyRunning);
        }
        if focus_seconds == 0 || break_seconds == 0 {
            return Err(SessionError::InvalidConfiguration(
                "phase durations must be greater than zero".to_string(),
            ));
        }

        self.focus_seconds = focus_seconds;
        self.break_seconds = break_seconds;
        self.remaining_seconds = focus_seconds;
        self.completed_focus_phases = 0;
        self.state = EngineState::RunningFocus;
        Ok(())
    }

    /// Advance by one second, firing at most one phase transition
    pub fn tick(&mut self) -> Option<EngineEvent> {
        if !self.state.is_running() {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        match self.state {
            EngineState::RunningFocus => {
                self.state = EngineState::RunningBreak;
                self.remaining_seconds = self.break_seconds;
                self.completed_focus_phases += 1;
                Some(EngineEvent::FocusExpired)
            }
            EngineState::RunningBreak => {
                self.state = EngineState::RunningFocus;
                self.remaining_seconds = self.focus_seconds;
                Some(EngineEvent::BreakExpired)
            }
            EngineState::Idle => None,
        }
    }

    /// Return to idle, discarding the remaining time
    pub fn stop(&mut self) {
        self.state = EngineState::Idle;
        self.remaining_seconds = 0;
    }

    /// Reload the break countdown to its full duration.
    ///
    /// Returns false if the engine is not in a break phase.
    pub fn restart_break(&mut self) -> bool {
        if self.state != EngineState::RunningBreak {
            return false;
        }
        self.remaining_seconds = self.break_seconds;
        true
    }

    /// Remaining fraction of the active phase, 0.0 when idle
    pub fn progress(&self) -> f64 {
        match self.active_duration() {
            Some(total) => f64::from(self.remaining_seconds) / f64::from(total),
            None => 0.0,
        }
    }

    /// Full duration of the phase currently running
    pub fn active_duration(&self) -> Option<u32> {
        match self.state {
            EngineState::Idle => None,
            EngineState::RunningFocus => Some(self.focus_seconds),
            EngineState::RunningBreak => Some(self.break_seconds),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Remaining seconds, only meaningful while running
    pub fn remaining_seconds(&self) -> Option<u32> {
        if self.state.is_running() {
            Some(self.remaining_seconds)
        } else {
            None
        }
    }

    /// Focus phases completed since the last `start`
    pub fn completed_focus_phases(&self) -> u64 {
        self.completed_focus_phases
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(focus: u32, brk: u32) -> TimerEngine {
        let mut engine = TimerEngine::new();
        engine.start(focus, brk).unwrap();
        engine
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = TimerEngine::new();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.remaining_seconds(), None);
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.remaining_seconds(), None);
    }

    #[test]
    fn test_start_enters_focus() {
        let engine = started(1500, 300);
        assert_eq!(engine.state(), EngineState::RunningFocus);
        assert_eq!(engine.remaining_seconds(), Some(1500));
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut engine = started(60, 10);
        engine.tick();
        assert_eq!(engine.start(120, 20), Err(SessionError::AlreadyRunning));
        assert_eq!(engine.remaining_seconds(), Some(59));
    }

    #[test]
    fn test_start_rejects_zero_durations() {
        let mut engine = TimerEngine::new();
        assert!(matches!(
            engine.start(0, 10),
            Err(SessionError::InvalidConfiguration(_))
        ));
        assert!(engine.start(10, 0).is_err());
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_five_three_scenario() {
        let mut engine = started(5, 3);
        let mut events = Vec::new();

        for _ in 0..5 {
            events.extend(engine.tick());
        }
        assert_eq!(engine.state(), EngineState::RunningBreak);
        assert_eq!(engine.remaining_seconds(), Some(3));
        assert_eq!(events, vec![EngineEvent::FocusExpired]);

        events.clear();
        for _ in 0..3 {
            events.extend(engine.tick());
        }
        assert_eq!(engine.state(), EngineState::RunningFocus);
        assert_eq!(engine.remaining_seconds(), Some(5));
        assert_eq!(events, vec![EngineEvent::BreakExpired]);
    }

    #[test]
    fn test_focus_expiry_for_many_durations() {
        for focus in [1, 2, 7, 60, 1500] {
            for brk in [1, 10, 300] {
                let mut engine = started(focus, brk);
                let expiries = (0..focus)
                    .filter_map(|_| engine.tick())
                    .filter(|e| *e == EngineEvent::FocusExpired)
                    .count();
                assert_eq!(expiries, 1);
                assert_eq!(engine.state(), EngineState::RunningBreak);
                assert_eq!(engine.remaining_seconds(), Some(brk));
            }
        }
    }

    #[test]
    fn test_full_cycle_returns_to_focus() {
        for (focus, brk) in [(1, 1), (3, 2), (60, 10), (90, 45)] {
            let mut engine = started(focus, brk);
            for _ in 0..(focus + brk) {
                engine.tick();
            }
            assert_eq!(engine.state(), EngineState::RunningFocus);
            assert_eq!(engine.remaining_seconds(), Some(focus));

            for _ in 0..(focus + brk) {
                engine.tick();
            }
            assert_eq!(engine.state(), EngineState::RunningFocus);
            assert_eq!(engine.remaining_seconds(), Some(focus));
            assert_eq!(engine.completed_focus_phases(), 2);
        }
    }

    #[test]
    fn test_remaining_never_rests_at_zero() {
        let mut engine = started(4, 2);
        for _ in 0..50 {
            engine.tick();
            assert!(engine.remaining_seconds().unwrap() > 0);
            assert!(engine.remaining_seconds().unwrap() <= engine.active_duration().unwrap());
        }
    }

    #[test]
    fn test_progress_monotonic_then_resets() {
        let mut engine = started(10, 4);
        let mut last = engine.progress();
        for _ in 0..9 {
            engine.tick();
            let current = engine.progress();
            assert!(current <= last);
            assert!((0.0..=1.0).contains(&current));
            last = current;
        }
        assert!((last - 0.1).abs() < 1e-9);

        assert_eq!(engine.tick(), Some(EngineEvent::FocusExpired));
        assert_eq!(engine.progress(), 1.0);

        engine.tick();
        assert!((engine.progress() - 0.75).abs() < 1e-9);

        engine.tick();
        engine.tick();
        assert_eq!(engine.tick(), Some(EngineEvent::BreakExpired));
        assert_eq!(engine.state(), EngineState::RunningFocus);
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn test_stop_from_focus_and_break() {
        let mut engine = started(5, 3);
        engine.tick();
        engine.stop();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining_seconds(), None);

        let mut engine = started(2, 3);
        engine.tick();
        engine.tick();
        assert_eq!(engine.state(), EngineState::RunningBreak);
        engine.stop();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_stop_does_not_preserve_remaining() {
        let mut engine = started(10, 5);
        engine.tick();
        engine.tick();
        engine.stop();
        engine.start(10, 5).unwrap();
        assert_eq!(engine.remaining_seconds(), Some(10));
    }

    #[test]
    fn test_restart_break() {
        let mut engine = started(2, 5);
        assert!(!engine.restart_break());

        engine.tick();
        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining_seconds(), Some(4));
        assert!(engine.restart_break());
        assert_eq!(engine.remaining_seconds(), Some(5));
    }
}
