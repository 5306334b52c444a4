use super::{
    common::{FrameContext, Layer, pulse},
    palette::{PhasePalette, palette},
};
use crate::{
    render::{Canvas, Color},
    session::Phase,
};

const FLOATING_ORBS: usize = 8;
/// How long the background takes to fade into the colors of a new phase.
const FADE_SECONDS: f32 = 2.0;
const IDLE_ORB_OPACITY: f32 = 0.05;

/// A soft blob drifting around the background.
#[derive(Clone, Debug)]
struct FloatingOrb {
    /// Position as a fraction of the canvas.
    center: (f32, f32),
    /// Radius as a fraction of the canvas height.
    radius: f32,
    /// How far the orb wanders away from its center and back.
    drift: (f32, f32),
    period: f32,
    delay: f32,
}

/// The background: per phase radial tints plus floating orbs.
#[derive(Debug)]
pub(crate) struct Ambient {
    base: Color,
    orbs: Vec<FloatingOrb>,
    phase: Phase,
    previous: Phase,
    changed_at: f32,
}

impl Ambient {
    pub(crate) fn new(base: Color, rng: &mut fastrand::Rng) -> Self {
        let orbs = (0..FLOATING_ORBS)
            .map(|i| FloatingOrb {
                center: (rng.f32(), rng.f32()),
                radius: 0.1 + rng.f32() * 0.2,
                drift: (rng.f32() * 0.2 - 0.1, rng.f32() * 0.2 - 0.1),
                period: 8.0 + rng.f32() * 4.0,
                delay: i as f32 * 0.5,
            })
            .collect();
        Self { base, orbs, phase: Phase::Inhale, previous: Phase::Inhale, changed_at: f32::NEG_INFINITY }
    }

    fn fade(&self, clock: f32) -> f32 {
        ((clock - self.changed_at) / FADE_SECONDS).clamp(0.0, 1.0)
    }

    fn tinted(base: Color, palette: &PhasePalette, x: f32, y: f32) -> Color {
        palette.tints.iter().fold(base, |color, tint| {
            let (cx, cy) = tint.center;
            let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            // the tint fades out halfway across the canvas
            let strength = tint.alpha * (1.0 - distance / 0.5).max(0.0);
            color.mix(tint.color, strength)
        })
    }
}

impl Layer for Ambient {
    fn update(&mut self, ctx: &FrameContext) {
        if ctx.snapshot.phase != self.phase {
            self.previous = self.phase;
            self.phase = ctx.snapshot.phase;
            self.changed_at = ctx.clock;
        }
    }

    fn draw(&self, ctx: &FrameContext, canvas: &mut Canvas) {
        let (width, height) = (canvas.width().max(1) as f32, canvas.height().max(1) as f32);
        let fade = self.fade(ctx.clock);
        let current = palette(self.phase);
        let previous = palette(self.previous);
        let running = ctx.is_running();

        let orbs: Vec<_> = self
            .orbs
            .iter()
            .map(|orb| {
                let t = (ctx.clock - orb.delay).max(0.0);
                let wander = pulse(t, orb.period, 0.0, 1.0);
                let center = (orb.center.0 + orb.drift.0 * wander, orb.center.1 + orb.drift.1 * wander);
                let (opacity, scale) = if running {
                    (pulse(t, orb.period, 0.1, 0.3), pulse(t, orb.period, 1.0, 1.2))
                } else {
                    (IDLE_ORB_OPACITY, 0.8)
                };
                (center, orb.radius * scale, opacity)
            })
            .collect();
        let orb_color = previous.accent(0).mix(current.accent(0), fade);

        for row in 0..canvas.height() {
            for col in 0..canvas.width() {
                let x = (col as f32 + 0.5) / width;
                let y = (row as f32 + 0.5) / height;
                let before = Self::tinted(self.base, previous, x, y);
                let after = Self::tinted(self.base, current, x, y);
                let mut color = before.mix(after, fade);
                for &((cx, cy), radius, opacity) in &orbs {
                    // orbs are round on screen, so horizontal distance is shrunk by the aspect ratio
                    let dx = (x - cx) * width / height / 2.0;
                    let distance = (dx.powi(2) + (y - cy).powi(2)).sqrt();
                    let strength = opacity * (1.0 - distance / radius).max(0.0);
                    if strength > 0.0 {
                        color = color.mix(orb_color, strength);
                    }
                }
                canvas.paint_bg(col, row, color);
            }
        }
    }
}
