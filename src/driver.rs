use crate::session::{
    BreathingPattern, PhaseTimer, SessionDuration, SessionSnapshot, SessionStatus, TickOutcome,
};
use std::time::{Duration, Instant};
use tracing::trace;

/// The state of a ticker after being polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TickerState {
    /// A tick is due and the next one has been scheduled.
    Fired,

    /// Nothing to do yet.
    Pending,

    /// The ticker is not scheduled.
    Disarmed,
}

/// A fixed-interval schedule that holds at most one pending deadline.
#[derive(Debug)]
pub(crate) struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule the first tick one interval from `now`, replacing any pending one.
    pub(crate) fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub(crate) fn disarm(&mut self) {
        self.next_due = None;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub(crate) fn poll(&mut self, now: Instant) -> TickerState {
        let Some(due) = self.next_due else {
            return TickerState::Disarmed;
        };
        if now < due {
            return TickerState::Pending;
        }
        let next = due + self.interval;
        // Missed intervals are dropped rather than delivered in a burst.
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        TickerState::Fired
    }

    /// How long until the next tick is due, if one is scheduled.
    pub(crate) fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Drives a [PhaseTimer] off a single fixed-interval schedule.
///
/// Every command updates the timer and the schedule together, so once [SessionDriver::stop] or
/// [SessionDriver::pause] return no further tick reaches the timer.
#[derive(Debug)]
pub struct SessionDriver {
    timer: PhaseTimer,
    ticker: Ticker,
}

impl SessionDriver {
    pub fn new(timer: PhaseTimer, interval: Duration) -> Self {
        Self { timer, ticker: Ticker::new(interval) }
    }

    pub fn start(&mut self, now: Instant) {
        if self.timer.start() {
            self.ticker.arm(now);
        }
    }

    pub fn pause(&mut self) {
        self.timer.pause();
        self.ticker.disarm();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
        self.ticker.disarm();
    }

    /// Start when idle or paused, pause when running.
    pub fn toggle(&mut self, now: Instant) {
        match self.timer.status() {
            SessionStatus::Running => self.pause(),
            SessionStatus::Idle | SessionStatus::Paused => self.start(now),
        }
    }

    pub fn select_pattern(&mut self, pattern: BreathingPattern) {
        self.timer.set_pattern(pattern);
        self.ticker.disarm();
    }

    pub fn select_session_duration(&mut self, session: SessionDuration) {
        self.timer.set_session_duration(session);
    }

    /// Deliver a tick to the timer if one is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        match self.ticker.poll(now) {
            TickerState::Fired => {
                trace!("tick");
                let outcome = self.timer.tick(self.ticker.interval());
                if outcome.completed.is_some() {
                    self.ticker.disarm();
                }
                Some(outcome)
            }
            TickerState::Pending | TickerState::Disarmed => None,
        }
    }

    /// How long the caller can wait before the next tick is due.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    pub fn is_scheduled(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.timer.snapshot()
    }
}
