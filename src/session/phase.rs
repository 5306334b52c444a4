use serde::Serialize;
use strum::{Display, EnumIter};

/// A single step of the breathing cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[strum(to_string = "inhale")]
    Inhale,

    #[strum(to_string = "hold")]
    Hold,

    #[strum(to_string = "exhale")]
    Exhale,

    #[strum(to_string = "hold after exhale")]
    HoldAfterExhale,
}

impl Phase {
    /// The text shown to the user while this phase is active.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::Hold | Self::HoldAfterExhale => "Hold",
            Self::Exhale => "Breathe Out",
        }
    }

    /// The index of this phase within the cycle, used to allot rotation.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Inhale => 0,
            Self::Hold => 1,
            Self::Exhale => 2,
            Self::HoldAfterExhale => 3,
        }
    }

    /// Whether leaving this phase towards `next` closes a breath.
    pub(crate) fn completes_breath(&self, next: Phase) -> bool {
        matches!(self, Self::Exhale | Self::HoldAfterExhale) && next == Self::Inhale
    }
}
