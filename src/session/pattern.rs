use super::phase::Phase;
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Duration;

/// The shortest a non-zero phase may last.
pub const MIN_PHASE_DURATION: Duration = Duration::from_millis(100);

/// The built-in patterns, in the order they are offered to the user.
static BUILTIN_PATTERNS: Lazy<Vec<BreathingPattern>> = Lazy::new(|| {
    vec![
        BreathingPattern::builtin("Calm Breathing", "Simple 4-4 breathing for relaxation", [4, 0, 4, 0]),
        BreathingPattern::builtin("Box Breathing", "Navy SEAL technique for focus and calm", [4, 4, 4, 4]),
        BreathingPattern::builtin("4-7-8 Breathing", "Dr. Weil's technique for better sleep", [4, 7, 8, 0]),
        BreathingPattern::builtin("Energizing Breath", "Quick breathing for energy boost", [3, 0, 3, 0]),
    ]
});

/// Errors found while validating breathing patterns.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PatternError {
    #[error("pattern name cannot be empty")]
    EmptyName,

    #[error("pattern '{pattern}' has an invalid {phase} duration: {value}")]
    InvalidDuration { pattern: String, phase: Phase, value: f64 },

    #[error("pattern '{pattern}' needs a non-zero {phase} duration")]
    ZeroDuration { pattern: String, phase: Phase },

    #[error("pattern '{pattern}' has a {phase} duration of {duration:?}, the minimum is {MIN_PHASE_DURATION:?}")]
    TooShort { pattern: String, phase: Phase, duration: Duration },

    #[error("pattern '{0}' is defined more than once")]
    Duplicate(String),

    #[error("unknown pattern '{0}'")]
    Unknown(String),
}

/// The length of each phase of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PhaseDurations {
    pub inhale: Duration,
    pub hold: Duration,
    pub exhale: Duration,
    pub hold_after_exhale: Duration,
}

impl PhaseDurations {
    /// Build durations out of whole seconds.
    pub fn from_secs(inhale: u64, hold: u64, exhale: u64, hold_after_exhale: u64) -> Self {
        Self {
            inhale: Duration::from_secs(inhale),
            hold: Duration::from_secs(hold),
            exhale: Duration::from_secs(exhale),
            hold_after_exhale: Duration::from_secs(hold_after_exhale),
        }
    }

    fn get(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::Hold => self.hold,
            Phase::Exhale => self.exhale,
            Phase::HoldAfterExhale => self.hold_after_exhale,
        }
    }
}

/// A named breathing pattern.
///
/// Patterns are validated on construction and never change afterwards, so the timer can rely on
/// inhale and exhale always lasting a non-zero amount of time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BreathingPattern {
    name: String,
    description: String,
    durations: PhaseDurations,
}

impl BreathingPattern {
    /// Construct a pattern, validating its durations.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        durations: PhaseDurations,
    ) -> Result<Self, PatternError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(PatternError::EmptyName);
        }
        for phase in [Phase::Inhale, Phase::Exhale] {
            if durations.get(phase).is_zero() {
                return Err(PatternError::ZeroDuration { pattern: name, phase });
            }
        }
        for phase in [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::HoldAfterExhale] {
            let duration = durations.get(phase);
            if !duration.is_zero() && duration < MIN_PHASE_DURATION {
                return Err(PatternError::TooShort { pattern: name, phase, duration });
            }
        }
        Ok(Self { name, description: description.into(), durations })
    }

    /// Construct a pattern out of durations expressed in (possibly fractional) seconds.
    pub fn from_seconds(
        name: impl Into<String>,
        description: impl Into<String>,
        seconds: [f64; 4],
    ) -> Result<Self, PatternError> {
        let name = name.into();
        let phases = [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::HoldAfterExhale];
        let mut parsed = [Duration::ZERO; 4];
        for ((phase, value), slot) in phases.into_iter().zip(seconds).zip(parsed.iter_mut()) {
            *slot = Duration::try_from_secs_f64(value)
                .map_err(|_| PatternError::InvalidDuration { pattern: name.clone(), phase, value })?;
        }
        let [inhale, hold, exhale, hold_after_exhale] = parsed;
        Self::new(name, description, PhaseDurations { inhale, hold, exhale, hold_after_exhale })
    }

    fn builtin(name: &str, description: &str, seconds: [u64; 4]) -> Self {
        let [inhale, hold, exhale, hold_after_exhale] = seconds;
        Self {
            name: name.to_string(),
            description: description.to_string(),
            durations: PhaseDurations::from_secs(inhale, hold, exhale, hold_after_exhale),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// The slug this pattern can be referred to by, e.g. `box-breathing`.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// How long the given phase lasts in this pattern.
    pub fn duration_of(&self, phase: Phase) -> Duration {
        self.durations.get(phase)
    }

    /// The phase that follows `phase`, skipping holds that last zero seconds.
    pub fn next_phase(&self, phase: Phase) -> Phase {
        match phase {
            Phase::Inhale if self.durations.hold.is_zero() => Phase::Exhale,
            Phase::Inhale => Phase::Hold,
            Phase::Hold => Phase::Exhale,
            Phase::Exhale if self.durations.hold_after_exhale.is_zero() => Phase::Inhale,
            Phase::Exhale => Phase::HoldAfterExhale,
            Phase::HoldAfterExhale => Phase::Inhale,
        }
    }

    /// The length of one full breath.
    pub fn cycle_duration(&self) -> Duration {
        let d = &self.durations;
        d.inhale + d.hold + d.exhale + d.hold_after_exhale
    }

    /// A compact description of the timings, e.g. `4s in • 7s hold • 8s out`.
    pub fn summary(&self) -> String {
        let d = &self.durations;
        let mut parts = vec![format!("{} in", format_seconds(d.inhale))];
        if !d.hold.is_zero() {
            parts.push(format!("{} hold", format_seconds(d.hold)));
        }
        parts.push(format!("{} out", format_seconds(d.exhale)));
        if !d.hold_after_exhale.is_zero() {
            parts.push(format!("{} hold", format_seconds(d.hold_after_exhale)));
        }
        parts.into_iter().join(" • ")
    }
}

/// The set of patterns the user can choose from.
#[derive(Clone, Debug)]
pub struct PatternCatalog {
    patterns: Vec<BreathingPattern>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self { patterns: BUILTIN_PATTERNS.clone() }
    }
}

impl PatternCatalog {
    /// Add user defined patterns after the built-in ones.
    pub fn extend<I>(&mut self, patterns: I) -> Result<(), PatternError>
    where
        I: IntoIterator<Item = BreathingPattern>,
    {
        for pattern in patterns {
            let slug = pattern.slug();
            if self.patterns.iter().any(|p| p.slug() == slug) {
                return Err(PatternError::Duplicate(pattern.name));
            }
            self.patterns.push(pattern);
        }
        Ok(())
    }

    /// Find a pattern by its exact name or by its slug.
    pub fn find(&self, name: &str) -> Result<&BreathingPattern, PatternError> {
        let slug = slugify(name);
        self.patterns
            .iter()
            .find(|p| p.name == name)
            .or_else(|| self.patterns.iter().find(|p| p.slug() == slug))
            .ok_or_else(|| PatternError::Unknown(name.to_string()))
    }

    pub fn position(&self, pattern: &BreathingPattern) -> Option<usize> {
        self.patterns.iter().position(|p| p.name == pattern.name)
    }

    pub fn get(&self, index: usize) -> Option<&BreathingPattern> {
        self.patterns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreathingPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The pattern selected when nothing else is configured.
    pub fn default_pattern(&self) -> &BreathingPattern {
        &self.patterns[0]
    }
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.to_lowercase())
        .join("-")
}

fn format_seconds(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs.fract() == 0.0 { format!("{secs:.0}s") } else { format!("{secs}s") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pattern(seconds: [u64; 4]) -> BreathingPattern {
        let [a, b, c, d] = seconds;
        BreathingPattern::new("test", "", PhaseDurations::from_secs(a, b, c, d)).expect("invalid pattern")
    }

    #[test]
    fn builtin_catalog() {
        let catalog = PatternCatalog::default();
        let names: Vec<_> = catalog.iter().map(BreathingPattern::name).collect();
        assert_eq!(names, vec!["Calm Breathing", "Box Breathing", "4-7-8 Breathing", "Energizing Breath"]);
        assert_eq!(catalog.default_pattern().name(), "Calm Breathing");
        let relax = catalog.find("4-7-8 Breathing").expect("not found");
        assert_eq!(*relax.durations(), PhaseDurations::from_secs(4, 7, 8, 0));
    }

    #[rstest]
    #[case::exact("Box Breathing", "Box Breathing")]
    #[case::slug("box-breathing", "Box Breathing")]
    #[case::loose_slug("Energizing  breath", "Energizing Breath")]
    #[case::digits("4-7-8-breathing", "4-7-8 Breathing")]
    fn lookup(#[case] query: &str, #[case] expected: &str) {
        let catalog = PatternCatalog::default();
        assert_eq!(catalog.find(query).expect("not found").name(), expected);
    }

    #[test]
    fn unknown_lookup() {
        let catalog = PatternCatalog::default();
        assert_eq!(catalog.find("nope").unwrap_err(), PatternError::Unknown("nope".into()));
    }

    #[rstest]
    #[case::full_box([4, 4, 4, 4], Phase::Inhale, Phase::Hold)]
    #[case::skip_hold([4, 0, 4, 0], Phase::Inhale, Phase::Exhale)]
    #[case::hold_to_exhale([4, 7, 8, 0], Phase::Hold, Phase::Exhale)]
    #[case::exhale_to_hold([4, 4, 4, 4], Phase::Exhale, Phase::HoldAfterExhale)]
    #[case::skip_hold_after([4, 7, 8, 0], Phase::Exhale, Phase::Inhale)]
    #[case::wrap([4, 4, 4, 4], Phase::HoldAfterExhale, Phase::Inhale)]
    fn transitions(#[case] seconds: [u64; 4], #[case] from: Phase, #[case] to: Phase) {
        assert_eq!(pattern(seconds).next_phase(from), to);
    }

    #[rstest]
    #[case::inhale([0.0, 1.0, 4.0, 0.0], Phase::Inhale)]
    #[case::exhale([4.0, 1.0, 0.0, 0.0], Phase::Exhale)]
    #[case::all_zero([0.0, 0.0, 0.0, 0.0], Phase::Inhale)]
    fn zero_durations_rejected(#[case] seconds: [f64; 4], #[case] phase: Phase) {
        let err = BreathingPattern::from_seconds("bad", "", seconds).unwrap_err();
        assert_eq!(err, PatternError::ZeroDuration { pattern: "bad".into(), phase });
    }

    #[rstest]
    #[case::negative([4.0, -1.0, 4.0, 0.0], Phase::Hold)]
    #[case::nan([4.0, 0.0, f64::NAN, 0.0], Phase::Exhale)]
    #[case::infinite([4.0, 0.0, 4.0, f64::INFINITY], Phase::HoldAfterExhale)]
    fn invalid_durations_rejected(#[case] seconds: [f64; 4], #[case] phase: Phase) {
        let err = BreathingPattern::from_seconds("bad", "", seconds).unwrap_err();
        assert!(matches!(err, PatternError::InvalidDuration { phase: p, .. } if p == phase), "{err}");
    }

    #[rstest]
    #[case::nanosecond_inhale([0.000000001, 0.0, 4.0, 0.0], Phase::Inhale, Duration::from_nanos(1))]
    #[case::tiny_exhale([4.0, 0.0, 0.001, 0.0], Phase::Exhale, Duration::from_millis(1))]
    #[case::tiny_hold([4.0, 0.05, 4.0, 0.0], Phase::Hold, Duration::from_millis(50))]
    fn too_short_durations_rejected(#[case] seconds: [f64; 4], #[case] phase: Phase, #[case] duration: Duration) {
        let err = BreathingPattern::from_seconds("bad", "", seconds).unwrap_err();
        assert_eq!(err, PatternError::TooShort { pattern: "bad".into(), phase, duration });
    }

    #[test]
    fn shortest_phase_accepted() {
        let pattern = BreathingPattern::from_seconds("quick", "", [0.1, 0.0, 0.1, 0.0]).expect("invalid");
        assert_eq!(pattern.cycle_duration(), Duration::from_millis(200));
    }

    #[test]
    fn empty_name_rejected() {
        let err = BreathingPattern::from_seconds("  ", "", [4.0, 0.0, 4.0, 0.0]).unwrap_err();
        assert_eq!(err, PatternError::EmptyName);
    }

    #[test]
    fn fractional_seconds() {
        let pattern = BreathingPattern::from_seconds("Coherent", "", [5.5, 0.0, 5.5, 0.0]).expect("invalid");
        assert_eq!(pattern.duration_of(Phase::Inhale), Duration::from_millis(5500));
        assert_eq!(pattern.cycle_duration(), Duration::from_secs(11));
        assert_eq!(pattern.summary(), "5.5s in • 5.5s out");
    }

    #[rstest]
    #[case::calm([4, 0, 4, 0], "4s in • 4s out")]
    #[case::relax([4, 7, 8, 0], "4s in • 7s hold • 8s out")]
    #[case::boxed([4, 4, 4, 4], "4s in • 4s hold • 4s out • 4s hold")]
    fn summaries(#[case] seconds: [u64; 4], #[case] expected: &str) {
        assert_eq!(pattern(seconds).summary(), expected);
    }

    #[test]
    fn duplicates_rejected() {
        let mut catalog = PatternCatalog::default();
        let copy = BreathingPattern::from_seconds("box breathing", "", [1.0, 0.0, 1.0, 0.0]).expect("invalid");
        assert_eq!(catalog.extend([copy]).unwrap_err(), PatternError::Duplicate("box breathing".into()));

        let custom = BreathingPattern::from_seconds("Coherent", "", [5.5, 0.0, 5.5, 0.0]).expect("invalid");
        catalog.extend([custom]).expect("extend failed");
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.position(catalog.find("coherent").expect("not found")), Some(4));
    }
}
