use serde::Serialize;
use std::{fmt, time::Duration};

/// The session lengths the user can pick from, in minutes.
pub const SESSION_MINUTES: [u32; 6] = [1, 2, 5, 10, 15, 20];

const DEFAULT_MINUTES: u32 = 5;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unsupported session length {0} minutes, expected one of {SESSION_MINUTES:?}")]
pub struct InvalidSessionDuration(pub u32);

/// How long a session lasts before it stops on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u32")]
pub struct SessionDuration(u32);

impl SessionDuration {
    pub fn from_minutes(minutes: u32) -> Result<Self, InvalidSessionDuration> {
        if SESSION_MINUTES.contains(&minutes) { Ok(Self(minutes)) } else { Err(InvalidSessionDuration(minutes)) }
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0) * 60)
    }

    /// All the selectable durations, shortest first.
    pub fn choices() -> impl Iterator<Item = SessionDuration> {
        SESSION_MINUTES.into_iter().map(SessionDuration)
    }

    /// The next longer choice, staying put at the longest one.
    pub fn longer(&self) -> Self {
        Self::choices().find(|d| d > self).unwrap_or(*self)
    }

    /// The next shorter choice, staying put at the shortest one.
    pub fn shorter(&self) -> Self {
        Self::choices().filter(|d| d < self).last().unwrap_or(*self)
    }
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self(DEFAULT_MINUTES)
    }
}

impl From<SessionDuration> for u32 {
    fn from(duration: SessionDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}
