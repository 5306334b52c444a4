//! The breathing session model: patterns, phases and the timer that moves between them.

mod duration;
mod pattern;
mod phase;
mod stats;
mod timer;

pub use duration::{InvalidSessionDuration, SESSION_MINUTES, SessionDuration};
pub use pattern::{BreathingPattern, MIN_PHASE_DURATION, PatternCatalog, PatternError, PhaseDurations};
pub use phase::Phase;
pub use stats::{SessionStats, format_clock};
pub use timer::{OvershootPolicy, PhaseTimer, SessionSnapshot, SessionStatus, SessionSummary, TickOutcome};
