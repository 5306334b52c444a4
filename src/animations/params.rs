use crate::session::{Phase, SessionSnapshot};
use serde::Serialize;

const MIN_SCALE: f64 = 1.0;
const MAX_SCALE: f64 = 1.8;
const MIN_OPACITY: f64 = 0.7;
const MAX_OPACITY: f64 = 1.0;
const DEGREES_PER_PHASE: f64 = 90.0;

/// The visual parameters derived from where the session is within the breathing cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnimationParams {
    pub scale: f64,
    pub opacity: f64,
    /// Rotation in degrees, in `[0, 360]`.
    pub rotation: f64,
}

impl AnimationParams {
    /// The parameters used while no session is running.
    pub const IDLE: AnimationParams = AnimationParams { scale: MIN_SCALE, opacity: MIN_OPACITY, rotation: 0.0 };

    /// Compute the parameters for `phase` given how far into it we are.
    ///
    /// `progress` is clamped to `[0, 1]` so a late tick can't push values past their range.
    pub fn derive(phase: Phase, progress: f64, running: bool) -> Self {
        if !running {
            return Self::IDLE;
        }
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        Self { scale: scale(phase, progress), opacity: opacity(phase, progress), rotation: rotation(phase, progress) }
    }

    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self::derive(snapshot.phase, snapshot.progress, snapshot.is_running())
    }
}

fn scale(phase: Phase, progress: f64) -> f64 {
    let range = MAX_SCALE - MIN_SCALE;
    match phase {
        Phase::Inhale => MIN_SCALE + range * progress,
        Phase::Hold => MAX_SCALE,
        Phase::Exhale => MAX_SCALE - range * progress,
        Phase::HoldAfterExhale => MIN_SCALE,
    }
}

fn opacity(phase: Phase, progress: f64) -> f64 {
    let range = MAX_OPACITY - MIN_OPACITY;
    match phase {
        Phase::Inhale => MIN_OPACITY + range * progress,
        Phase::Hold => MAX_OPACITY,
        Phase::Exhale => MAX_OPACITY - range * progress,
        Phase::HoldAfterExhale => MIN_OPACITY,
    }
}

fn rotation(phase: Phase, progress: f64) -> f64 {
    (f64::from(phase.ordinal()) + progress) * DEGREES_PER_PHASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[rstest]
    #[case::inhale_start(Phase::Inhale, 0.0, 1.0)]
    #[case::inhale_mid(Phase::Inhale, 0.5, 1.4)]
    #[case::inhale_end(Phase::Inhale, 1.0, 1.8)]
    #[case::hold(Phase::Hold, 0.3, 1.8)]
    #[case::exhale_start(Phase::Exhale, 0.0, 1.8)]
    #[case::exhale_end(Phase::Exhale, 1.0, 1.0)]
    #[case::hold_after(Phase::HoldAfterExhale, 0.7, 1.0)]
    fn scales(#[case] phase: Phase, #[case] progress: f64, #[case] expected: f64) {
        assert_close(AnimationParams::derive(phase, progress, true).scale, expected);
    }

    #[rstest]
    #[case::inhale_start(Phase::Inhale, 0.0, 0.7)]
    #[case::inhale_end(Phase::Inhale, 1.0, 1.0)]
    #[case::hold(Phase::Hold, 0.5, 1.0)]
    #[case::exhale_mid(Phase::Exhale, 0.5, 0.85)]
    #[case::hold_after(Phase::HoldAfterExhale, 0.5, 0.7)]
    fn opacities(#[case] phase: Phase, #[case] progress: f64, #[case] expected: f64) {
        assert_close(AnimationParams::derive(phase, progress, true).opacity, expected);
    }

    #[rstest]
    #[case::inhale(Phase::Inhale, 0.5, 45.0)]
    #[case::hold(Phase::Hold, 0.0, 90.0)]
    #[case::exhale(Phase::Exhale, 1.0, 270.0)]
    #[case::hold_after(Phase::HoldAfterExhale, 1.0, 360.0)]
    fn rotations(#[case] phase: Phase, #[case] progress: f64, #[case] expected: f64) {
        assert_close(AnimationParams::derive(phase, progress, true).rotation, expected);
    }

    #[test]
    fn continuous_across_boundaries() {
        let boundaries = [
            (Phase::Inhale, Phase::Hold),
            (Phase::Hold, Phase::Exhale),
            (Phase::Exhale, Phase::HoldAfterExhale),
            (Phase::HoldAfterExhale, Phase::Inhale),
        ];
        for (from, to) in boundaries {
            let end = AnimationParams::derive(from, 1.0, true);
            let start = AnimationParams::derive(to, 0.0, true);
            assert_close(end.scale, start.scale);
            assert_close(end.opacity, start.opacity);
            assert_close(end.rotation % 360.0, start.rotation);
        }
    }

    #[rstest]
    #[case::overshoot(1.3, 1.8)]
    #[case::negative(-0.5, 1.0)]
    #[case::nan(f64::NAN, 1.0)]
    fn progress_is_clamped(#[case] progress: f64, #[case] expected: f64) {
        assert_close(AnimationParams::derive(Phase::Inhale, progress, true).scale, expected);
    }

    #[test]
    fn idle_values() {
        for phase in [Phase::Inhale, Phase::Hold, Phase::Exhale] {
            assert_eq!(AnimationParams::derive(phase, 0.5, false), AnimationParams::IDLE);
        }
        assert_eq!(AnimationParams::IDLE, AnimationParams { scale: 1.0, opacity: 0.7, rotation: 0.0 });
    }
}
