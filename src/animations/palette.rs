use crate::{render::Color, session::Phase};

/// A radial tint laid over the background, positioned in fractions of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Tint {
    pub color: Color,
    pub alpha: f32,
    pub center: (f32, f32),
}

/// The colors used to draw a phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PhasePalette {
    /// Accent colors for particles and shapes.
    pub accents: [Color; 4],
    /// The three stops of the orb's conic gradient.
    pub gradient: [Color; 3],
    /// Radial tints for the ambient background.
    pub tints: [Tint; 2],
}

impl PhasePalette {
    pub(crate) fn accent(&self, index: usize) -> Color {
        self.accents[index % self.accents.len()]
    }

    /// Sample the orb's conic gradient at `angle` degrees, wrapping back to the first stop.
    pub(crate) fn conic(&self, angle: f32) -> Color {
        let position = angle.rem_euclid(360.0) / 120.0;
        let index = position.floor() as usize % 3;
        let next = (index + 1) % 3;
        self.gradient[index].mix(self.gradient[next], position.fract())
    }
}

const fn tint(r: u8, g: u8, b: u8, alpha: f32, center: (f32, f32)) -> Tint {
    Tint { color: Color::new(r, g, b), alpha, center }
}

const INHALE: PhasePalette = PhasePalette {
    accents: [
        Color::new(0x3b, 0x82, 0xf6),
        Color::new(0x06, 0xb6, 0xd4),
        Color::new(0x0e, 0xa5, 0xe9),
        Color::new(0x1e, 0x40, 0xaf),
    ],
    gradient: [Color::new(0x3b, 0x82, 0xf6), Color::new(0x06, 0xb6, 0xd4), Color::new(0x0e, 0xa5, 0xe9)],
    tints: [tint(59, 130, 246, 0.3, (0.3, 0.7)), tint(6, 182, 212, 0.2, (0.7, 0.3))],
};

const HOLD: PhasePalette = PhasePalette {
    accents: [
        Color::new(0x8b, 0x5c, 0xf6),
        Color::new(0xec, 0x48, 0x99),
        Color::new(0xd9, 0x46, 0xef),
        Color::new(0x7c, 0x3a, 0xed),
    ],
    gradient: [Color::new(0x8b, 0x5c, 0xf6), Color::new(0xec, 0x48, 0x99), Color::new(0xd9, 0x46, 0xef)],
    tints: [tint(139, 92, 246, 0.3, (0.5, 0.5)), tint(236, 72, 153, 0.2, (0.8, 0.2))],
};

const EXHALE: PhasePalette = PhasePalette {
    accents: [
        Color::new(0x10, 0xb9, 0x81),
        Color::new(0x05, 0x96, 0x69),
        Color::new(0x04, 0x78, 0x57),
        Color::new(0x06, 0x5f, 0x46),
    ],
    gradient: [Color::new(0x10, 0xb9, 0x81), Color::new(0x05, 0x96, 0x69), Color::new(0x04, 0x78, 0x57)],
    tints: [tint(16, 185, 129, 0.3, (0.2, 0.8)), tint(5, 150, 105, 0.2, (0.6, 0.4))],
};

const HOLD_AFTER_EXHALE: PhasePalette = PhasePalette {
    accents: [
        Color::new(0xf5, 0x9e, 0x0b),
        Color::new(0xf9, 0x73, 0x16),
        Color::new(0xea, 0x58, 0x0c),
        Color::new(0xdc, 0x26, 0x26),
    ],
    gradient: [Color::new(0xf5, 0x9e, 0x0b), Color::new(0xf9, 0x73, 0x16), Color::new(0xea, 0x58, 0x0c)],
    tints: [tint(245, 158, 11, 0.3, (0.4, 0.6)), tint(249, 115, 22, 0.2, (0.9, 0.1))],
};

pub(crate) fn palette(phase: Phase) -> &'static PhasePalette {
    match phase {
        Phase::Inhale => &INHALE,
        Phase::Hold => &HOLD,
        Phase::Exhale => &EXHALE,
        Phase::HoldAfterExhale => &HOLD_AFTER_EXHALE,
    }
}
