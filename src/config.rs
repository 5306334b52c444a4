use crate::{
    animations::SceneOptions,
    render::{Color, InvalidColor},
    session::{
        BreathingPattern, InvalidSessionDuration, OvershootPolicy, PatternCatalog, PatternError, SessionDuration,
    },
};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
const MAX_TICK_INTERVAL_MS: u64 = 1000;
const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
const DEFAULT_BACKGROUND: &str = "0f172a";

/// The contents of the configuration file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct Config {
    /// What a session uses when nothing else is chosen.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub visuals: VisualsConfig,

    /// Extra patterns offered next to the built-in ones.
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

impl Config {
    /// Load the configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigError::NotFound(path.into())),
            Err(e) => return Err(ConfigError::Io(path.into(), e)),
        };
        Self::parse(&contents)
    }

    /// Load the configuration from `path` if given, otherwise from the default location.
    ///
    /// An explicit path must exist, a missing file in the default location means all defaults apply.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) => match Self::load(&path) {
                    Err(ConfigError::NotFound(_)) => Ok(Self::default()),
                    other => other,
                },
                None => Ok(Self::default()),
            },
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        // an empty file deserializes to null
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Validate everything and turn it into the settings the application runs with.
    pub fn resolve(self, overrides: &Overrides) -> Result<Settings, ConfigError> {
        let mut catalog = PatternCatalog::default();
        let custom: Vec<_> = self.patterns.into_iter().map(PatternConfig::build).collect::<Result<_, _>>()?;
        catalog.extend(custom)?;

        let pattern_name = overrides.pattern.as_deref().or(self.defaults.pattern.as_deref());
        let pattern = match pattern_name {
            Some(name) => catalog.find(name)?.clone(),
            None => catalog.default_pattern().clone(),
        };
        let minutes = overrides.minutes.or(self.defaults.session_minutes);
        let session = match minutes {
            Some(minutes) => SessionDuration::from_minutes(minutes)?,
            None => SessionDuration::default(),
        };

        let tick_interval = self.timer.tick_interval_ms;
        if tick_interval == 0 || tick_interval > MAX_TICK_INTERVAL_MS {
            return Err(ConfigError::TickInterval(tick_interval));
        }
        if self.visuals.frame_interval_ms == 0 {
            return Err(ConfigError::FrameInterval);
        }
        let background = Color::from_hex(&self.visuals.background)?;

        Ok(Settings {
            catalog,
            pattern,
            session,
            tick_interval: Duration::from_millis(tick_interval),
            overshoot: self.timer.overshoot,
            frame_interval: Duration::from_millis(self.visuals.frame_interval_ms),
            scene: SceneOptions {
                ambient: self.visuals.ambient,
                shapes: self.visuals.shapes,
                particles: self.visuals.particles,
                background,
            },
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct DefaultsConfig {
    /// The name or slug of the pattern selected on startup.
    #[serde(default)]
    pub pattern: Option<String>,

    /// The session length in minutes.
    #[serde(default)]
    pub session_minutes: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct TimerConfig {
    /// How often the session advances, in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// What to do with time left over when a phase ends in the middle of a tick.
    #[serde(default)]
    pub overshoot: OvershootPolicy,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { tick_interval_ms: DEFAULT_TICK_INTERVAL_MS, overshoot: Default::default() }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct VisualsConfig {
    /// Whether to draw the drifting background glow.
    #[serde(default = "default_true")]
    pub ambient: bool,

    /// Whether to draw the rotating outlines around the orb.
    #[serde(default = "default_true")]
    pub shapes: bool,

    /// Whether to draw particles.
    #[serde(default = "default_true")]
    pub particles: bool,

    /// How often the screen is redrawn, in milliseconds.
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,

    /// The base background color as a hex string.
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            ambient: true,
            shapes: true,
            particles: true,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            background: default_background(),
        }
    }
}

/// A user defined breathing pattern. Durations are in seconds.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct PatternConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub inhale: f64,

    #[serde(default)]
    pub hold: f64,

    pub exhale: f64,

    #[serde(default)]
    pub hold_after_exhale: f64,
}

impl PatternConfig {
    fn build(self) -> Result<BreathingPattern, PatternError> {
        BreathingPattern::from_seconds(
            self.name,
            self.description,
            [self.inhale, self.hold, self.exhale, self.hold_after_exhale],
        )
    }
}

/// Values passed on the command line that take precedence over the configuration file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub pattern: Option<String>,
    pub minutes: Option<u32>,
}

/// Everything the application needs to run, after validation.
#[derive(Clone, Debug)]
pub struct Settings {
    pub catalog: PatternCatalog,
    pub pattern: BreathingPattern,
    pub session: SessionDuration,
    pub tick_interval: Duration,
    pub overshoot: OvershootPolicy,
    pub frame_interval: Duration,
    pub scene: SceneOptions,
}

/// The path the configuration is loaded from when none is given.
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "breathwork")?;
    Some(dirs.config_dir().join("config.yaml"))
}

fn default_true() -> bool {
    true
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_frame_interval() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.into()
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    NotFound(PathBuf),

    #[error("reading config file {0}: {1}")]
    Io(PathBuf, io::Error),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    SessionDuration(#[from] InvalidSessionDuration),

    #[error("tick interval must be between 1 and {MAX_TICK_INTERVAL_MS} milliseconds, got {0}")]
    TickInterval(u64),

    #[error("frame interval must be greater than zero")]
    FrameInterval,

    #[error("invalid background color: {0}")]
    Background(#[from] InvalidColor),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn resolve(contents: &str) -> Result<Settings, ConfigError> {
        Config::parse(contents)?.resolve(&Overrides::default())
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = resolve("").expect("resolve failed");
        assert_eq!(settings.pattern.name(), "Calm Breathing");
        assert_eq!(settings.session.minutes(), 5);
        assert_eq!(settings.tick_interval, Duration::from_millis(100));
        assert_eq!(settings.overshoot, OvershootPolicy::Discard);
        assert_eq!(settings.frame_interval, Duration::from_millis(33));
        assert_eq!(settings.catalog.len(), 4);
        assert_eq!(settings.scene.background, Color::new(0x0f, 0x17, 0x2a));
        assert!(settings.scene.ambient && settings.scene.shapes && settings.scene.particles);
    }

    #[test]
    fn full_config() {
        let contents = r"
defaults:
  pattern: Triangle
  session_minutes: 10
timer:
  tick_interval_ms: 50
  overshoot: carry
visuals:
  particles: false
  background: '#000000'
patterns:
  - name: Triangle
    description: Three equal sides
    inhale: 4
    hold: 4
    exhale: 4
  - name: Quick
    inhale: 1.5
    exhale: 2.5
";
        let settings = resolve(contents).expect("resolve failed");
        assert_eq!(settings.pattern.name(), "Triangle");
        assert_eq!(settings.pattern.summary(), "4s in • 4s hold • 4s out");
        assert_eq!(settings.session.minutes(), 10);
        assert_eq!(settings.tick_interval, Duration::from_millis(50));
        assert_eq!(settings.overshoot, OvershootPolicy::Carry);
        assert!(!settings.scene.particles);
        assert_eq!(settings.scene.background, Color::BLACK);
        assert_eq!(settings.catalog.len(), 6);
        let quick = settings.catalog.find("quick").expect("not found");
        assert_eq!(quick.cycle_duration(), Duration::from_secs(4));
    }

    #[test]
    fn overrides_win() {
        let contents = "defaults:\n  pattern: calm-breathing\n  session_minutes: 10\n";
        let overrides = Overrides { pattern: Some("Box Breathing".into()), minutes: Some(1) };
        let settings = Config::parse(contents).expect("parse failed").resolve(&overrides).expect("resolve failed");
        assert_eq!(settings.pattern.name(), "Box Breathing");
        assert_eq!(settings.session.minutes(), 1);
    }

    #[rstest]
    #[case::unknown_key("colour: red\n")]
    #[case::unknown_nested_key("timer:\n  speed: 2\n")]
    #[case::bad_overshoot("timer:\n  overshoot: keep\n")]
    fn rejects_malformed(#[case] contents: &str) {
        assert!(matches!(Config::parse(contents), Err(ConfigError::Yaml(_))));
    }

    #[rstest]
    #[case::zero_tick("timer:\n  tick_interval_ms: 0\n")]
    #[case::slow_tick("timer:\n  tick_interval_ms: 1001\n")]
    #[case::zero_frame("visuals:\n  frame_interval_ms: 0\n")]
    #[case::minutes("defaults:\n  session_minutes: 3\n")]
    #[case::unknown_pattern("defaults:\n  pattern: nope\n")]
    #[case::bad_background("visuals:\n  background: blue\n")]
    #[case::duplicate("patterns:\n  - name: Box Breathing\n    inhale: 1\n    exhale: 1\n")]
    #[case::zero_exhale("patterns:\n  - name: Odd\n    inhale: 1\n    exhale: 0\n")]
    #[case::nanosecond_phases("patterns:\n  - {name: Tiny, inhale: 0.000000001, exhale: 0.000000001}\n")]
    #[case::negative_hold("patterns:\n  - name: Odd\n    inhale: 1\n    hold: -1\n    exhale: 1\n")]
    fn rejects_invalid(#[case] contents: &str) {
        assert!(resolve(contents).is_err());
    }

    #[test]
    fn tiny_phases_are_a_pattern_error() {
        let contents = "patterns:\n  - name: Tiny\n    inhale: 0.01\n    exhale: 4\n";
        let err = resolve(contents).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern(PatternError::TooShort { .. })), "{err}");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "defaults:\n  session_minutes: 15").expect("write failed");
        let config = Config::load_or_default(Some(file.path())).expect("load failed");
        assert_eq!(config.defaults.session_minutes, Some(15));
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.yaml");
        assert!(matches!(Config::load_or_default(Some(&path)), Err(ConfigError::NotFound(_))));
    }
}
