use crate::{
    config::Settings,
    session::{Phase, PhaseTimer, SessionStatus, SessionSummary, format_clock},
};
use serde::Serialize;
use std::{fmt, time::Duration};

/// Something that happened during a simulated session.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    Phase {
        #[serde(serialize_with = "as_secs")]
        at: Duration,
        phase: Phase,
        breaths: u32,
    },
    Completed {
        #[serde(serialize_with = "as_secs")]
        at: Duration,
        breaths: u32,
    },
}

/// The result of running a session without a terminal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Timeline {
    pub pattern: String,
    pub events: Vec<TimelineEvent>,
    pub breaths: u32,
    #[serde(serialize_with = "as_secs")]
    pub elapsed: Duration,
    pub completed: bool,
}

/// Run a session against simulated time, one tick at a time, for at most `limit`.
///
/// The session stops on its own once its length is reached, so a `limit` longer than that just
/// covers the whole session.
pub fn simulate(settings: &Settings, limit: Duration) -> Timeline {
    let mut timer = PhaseTimer::new(settings.pattern.clone(), settings.session, settings.overshoot);
    let tick = settings.tick_interval;
    timer.start();

    let mut events = vec![TimelineEvent::Phase { at: Duration::ZERO, phase: timer.phase(), breaths: 0 }];
    let mut now = Duration::ZERO;
    let mut summary: Option<SessionSummary> = None;
    let mut breaths = 0;
    while now + tick <= limit && timer.status() == SessionStatus::Running {
        now += tick;
        let outcome = timer.tick(tick);
        breaths += outcome.breaths_completed;
        if let Some(completed) = outcome.completed {
            events.push(TimelineEvent::Completed { at: now, breaths: completed.breaths });
            summary = Some(completed);
            break;
        }
        for phase in outcome.entered {
            events.push(TimelineEvent::Phase { at: now, phase, breaths });
        }
    }
    let (breaths, completed) = match &summary {
        Some(summary) => (summary.breaths, true),
        None => (timer.breaths(), false),
    };
    Timeline { pattern: settings.pattern.name().to_string(), events, breaths, elapsed: now, completed }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.pattern)?;
        for event in &self.events {
            match event {
                TimelineEvent::Phase { at, phase, breaths } => {
                    writeln!(f, "{:>6}  {:<18} breaths: {breaths}", format_clock(*at), phase.label())?
                }
                TimelineEvent::Completed { at, breaths } => {
                    writeln!(f, "{:>6}  session complete   breaths: {breaths}", format_clock(*at))?
                }
            };
        }
        write!(f, "{} breaths in {}", self.breaths, format_clock(self.elapsed))
    }
}

fn as_secs<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
