use super::params::AnimationParams;
use crate::{render::Canvas, session::SessionSnapshot};
use std::f32::consts::TAU;

/// Frame context passed to all layers
#[derive(Debug, Clone)]
pub(crate) struct FrameContext<'a> {
    /// The session being visualized
    pub snapshot: &'a SessionSnapshot,
    /// Scale, opacity and rotation for the current point in the cycle
    pub params: AnimationParams,
    /// Seconds since the app started - drives motion that doesn't follow the breath
    pub clock: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameContext<'_> {
    pub fn is_running(&self) -> bool {
        self.snapshot.is_running()
    }
}

/// Trait for the visual layers a scene is made of
pub(crate) trait Layer {
    /// Advance any internal state, called once per frame before drawing
    fn update(&mut self, _ctx: &FrameContext) {}

    /// Draw the layer on top of whatever the canvas already holds
    fn draw(&self, ctx: &FrameContext, canvas: &mut Canvas);
}

/// Oscillate between `min` and `max` and back once every `period` seconds, starting at `min`.
pub(crate) fn pulse(clock: f32, period: f32, min: f32, max: f32) -> f32 {
    let wave = 0.5 - 0.5 * (clock / period * TAU).cos();
    min + (max - min) * wave
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_shape() {
        assert!((pulse(0.0, 2.0, 1.0, 1.1) - 1.0).abs() < 1e-6);
        assert!((pulse(1.0, 2.0, 1.0, 1.1) - 1.1).abs() < 1e-6);
        assert!((pulse(2.0, 2.0, 1.0, 1.1) - 1.0).abs() < 1e-6);
    }
}
