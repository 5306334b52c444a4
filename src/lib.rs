//! A terminal breathing exercise: a phase timer that walks through inhale, hold and exhale, and the
//! visuals that follow it.

pub mod animations;
pub mod app;
pub mod config;
pub mod driver;
pub mod logging;
pub mod render;
pub mod session;
pub(crate) mod settings;
pub mod simulate;

pub use crate::{
    animations::AnimationParams,
    app::App,
    config::{Config, ConfigError, Overrides, Settings},
    driver::SessionDriver,
    session::{
        BreathingPattern, OvershootPolicy, PatternCatalog, Phase, PhaseTimer, SessionDuration, SessionSnapshot,
        SessionStatus,
    },
};
