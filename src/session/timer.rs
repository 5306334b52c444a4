use super::{duration::SessionDuration, pattern::BreathingPattern, phase::Phase};
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;
use tracing::{debug, info};

/// What to do with the time that goes past a phase boundary within a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub enum OvershootPolicy {
    /// Start the next phase from zero, dropping the excess.
    #[default]
    Discard,

    /// Start the next phase with the excess already elapsed.
    Carry,
}

/// Whether a session is going on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

/// The mutable state of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SessionState {
    phase: Phase,
    phase_elapsed: Duration,
    total_elapsed: Duration,
    breaths: u32,
    status: SessionStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Inhale,
            phase_elapsed: Duration::ZERO,
            total_elapsed: Duration::ZERO,
            breaths: 0,
            status: SessionStatus::Idle,
        }
    }
}

/// What a session achieved by the time it ran out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub pattern: String,
    pub breaths: u32,
    #[serde(serialize_with = "as_secs")]
    pub elapsed: Duration,
}

/// The effects of a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The phases entered during this tick, in order.
    pub entered: Vec<Phase>,
    /// How many breaths were completed during this tick.
    pub breaths_completed: u32,
    /// Set when this tick ran the session out.
    pub completed: Option<SessionSummary>,
}

/// A read-only view of the session for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub pattern: String,
    pub phase: Phase,
    #[serde(serialize_with = "as_secs")]
    pub phase_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub phase_duration: Duration,
    #[serde(serialize_with = "as_secs")]
    pub total_elapsed: Duration,
    #[serde(serialize_with = "as_secs")]
    pub session_limit: Duration,
    pub breaths: u32,
    pub status: SessionStatus,
    pub progress: f64,
}

impl SessionSnapshot {
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// The whole seconds left in the current phase, rounded up.
    pub fn remaining_secs(&self) -> u64 {
        let remaining = self.phase_duration.saturating_sub(self.phase_elapsed);
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
    }
}

/// The breathing phase state machine.
///
/// The timer does not keep time by itself: it is advanced by whoever owns it through
/// [PhaseTimer::tick], normally a fixed-interval driver.
#[derive(Clone, Debug)]
pub struct PhaseTimer {
    pattern: BreathingPattern,
    session: SessionDuration,
    overshoot: OvershootPolicy,
    state: SessionState,
}

impl PhaseTimer {
    pub fn new(pattern: BreathingPattern, session: SessionDuration, overshoot: OvershootPolicy) -> Self {
        Self { pattern, session, overshoot, state: Default::default() }
    }

    pub fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    pub fn session_duration(&self) -> SessionDuration {
        self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn breaths(&self) -> u32 {
        self.state.breaths
    }

    /// Begin a new session, or resume a paused one.
    ///
    /// Returns whether the timer's status changed.
    pub fn start(&mut self) -> bool {
        match self.state.status {
            SessionStatus::Idle => {
                self.state = SessionState { status: SessionStatus::Running, ..Default::default() };
                info!(pattern = self.pattern.name(), minutes = self.session.minutes(), "session started");
                true
            }
            SessionStatus::Paused => {
                self.state.status = SessionStatus::Running;
                info!(elapsed = ?self.state.total_elapsed, "session resumed");
                true
            }
            SessionStatus::Running => false,
        }
    }

    /// Freeze the session where it is.
    pub fn pause(&mut self) -> bool {
        if self.state.status != SessionStatus::Running {
            return false;
        }
        self.state.status = SessionStatus::Paused;
        info!(elapsed = ?self.state.total_elapsed, breaths = self.state.breaths, "session paused");
        true
    }

    /// End the session and clear every counter.
    pub fn stop(&mut self) {
        if self.state.status != SessionStatus::Idle {
            info!(elapsed = ?self.state.total_elapsed, breaths = self.state.breaths, "session stopped");
        }
        self.state = SessionState::default();
    }

    /// Switch to another pattern. Any ongoing session is stopped.
    pub fn set_pattern(&mut self, pattern: BreathingPattern) {
        self.stop();
        info!(pattern = pattern.name(), "pattern selected");
        self.pattern = pattern;
    }

    /// Change the session length. This is checked against the elapsed time on the next tick.
    pub fn set_session_duration(&mut self, session: SessionDuration) {
        info!(minutes = session.minutes(), "session length selected");
        self.session = session;
    }

    /// Advance the session by `delta`.
    ///
    /// This does nothing unless the session is running.
    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.state.status != SessionStatus::Running {
            return outcome;
        }
        self.state.phase_elapsed += delta;
        self.state.total_elapsed += delta;

        while self.state.phase_elapsed >= self.current_phase_duration() {
            let excess = self.state.phase_elapsed - self.current_phase_duration();
            let current = self.state.phase;
            let next = self.pattern.next_phase(current);
            if current.completes_breath(next) {
                self.state.breaths += 1;
                outcome.breaths_completed += 1;
            }
            self.state.phase = next;
            outcome.entered.push(next);
            debug!(phase = %next, breaths = self.state.breaths, "phase entered");

            match self.overshoot {
                OvershootPolicy::Discard => {
                    self.state.phase_elapsed = Duration::ZERO;
                    break;
                }
                OvershootPolicy::Carry => self.state.phase_elapsed = excess,
            }
        }

        if self.state.total_elapsed >= self.session.as_duration() {
            let summary = SessionSummary {
                pattern: self.pattern.name().to_string(),
                breaths: self.state.breaths,
                elapsed: self.state.total_elapsed,
            };
            info!(breaths = summary.breaths, elapsed = ?summary.elapsed, "session completed");
            self.state = SessionState::default();
            outcome.completed = Some(summary);
        }
        outcome
    }

    /// The fraction of the current phase that has elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let duration = self.current_phase_duration();
        if duration.is_zero() {
            return 0.0;
        }
        (self.state.phase_elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            pattern: self.pattern.name().to_string(),
            phase: self.state.phase,
            phase_elapsed: self.state.phase_elapsed,
            phase_duration: self.current_phase_duration(),
            total_elapsed: self.state.total_elapsed,
            session_limit: self.session.as_duration(),
            breaths: self.state.breaths,
            status: self.state.status,
            progress: self.progress(),
        }
    }

    fn current_phase_duration(&self) -> Duration {
        self.pattern.duration_of(self.state.phase)
    }
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
