use super::timer::SessionSnapshot;
use std::time::Duration;

/// Session statistics as shown below the orb.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionStats {
    pub elapsed: String,
    pub breaths: u32,
    /// How much of the session has gone by, as a percentage capped at 100.
    pub progress_percent: f64,
}

impl From<&SessionSnapshot> for SessionStats {
    fn from(snapshot: &SessionSnapshot) -> Self {
        let limit = snapshot.session_limit.as_secs_f64();
        let progress_percent =
            if limit > 0.0 { (snapshot.total_elapsed.as_secs_f64() / limit * 100.0).min(100.0) } else { 0.0 };
        Self { elapsed: format_clock(snapshot.total_elapsed), breaths: snapshot.breaths, progress_percent }
    }
}

/// Format a duration as `m:ss`.
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Phase, SessionStatus};
    use rstest::rstest;

    #[rstest]
    #[case(0, "0:00")]
    #[case(9_900, "0:09")]
    #[case(61_000, "1:01")]
    #[case(1_199_999, "19:59")]
    fn clock(#[case] millis: u64, #[case] expected: &str) {
        assert_eq!(format_clock(Duration::from_millis(millis)), expected);
    }

    #[test]
    fn stats_from_snapshot() {
        let snapshot = SessionSnapshot {
            pattern: "Box Breathing".into(),
            phase: Phase::Exhale,
            phase_elapsed: Duration::from_secs(1),
            phase_duration: Duration::from_secs(4),
            total_elapsed: Duration::from_secs(90),
            session_limit: Duration::from_secs(120),
            breaths: 5,
            status: SessionStatus::Running,
            progress: 0.25,
        };
        let stats = SessionStats::from(&snapshot);
        assert_eq!(stats.elapsed, "1:30");
        assert_eq!(stats.breaths, 5);
        assert!((stats.progress_percent - 75.0).abs() < 1e-9);
    }
}
