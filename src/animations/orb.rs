use super::{
    common::{FrameContext, Layer, pulse},
    palette::palette,
};
use crate::render::{Canvas, Color, STAGE_SIZE};

/// Radius of the orb at scale 1, in stage units.
const BASE_RADIUS: f32 = 48.0;
const GLOW_PERIOD: f32 = 2.0;
const RIPPLE_PERIOD: f32 = 3.0;
const RIPPLE_GLYPH: char = '˙';

/// The central orb: a disc swept by a rotating gradient, with a soft glow and a ripple.
#[derive(Debug, Default)]
pub(crate) struct Orb;

impl Orb {
    pub(crate) fn radius(scale: f64) -> f32 {
        BASE_RADIUS * scale as f32
    }

    /// The radius and opacity of the ripple ring `clock` seconds in.
    ///
    /// The ring grows from the orb's edge to three times its radius while fading out.
    pub(crate) fn ripple(radius: f32, clock: f32) -> (f32, f32) {
        let t = clock.rem_euclid(RIPPLE_PERIOD) / RIPPLE_PERIOD;
        (radius * (1.0 + 2.0 * t), 0.6 * (1.0 - t))
    }
}

impl Layer for Orb {
    fn draw(&self, ctx: &FrameContext, canvas: &mut Canvas) {
        let params = ctx.params;
        let palette = palette(ctx.snapshot.phase);
        let radius = Self::radius(params.scale);
        let opacity = params.opacity as f32;
        let glow = opacity * 0.8 * 0.2 * pulse(ctx.clock, GLOW_PERIOD, 1.0, 1.1);
        let (ripple_radius, ripple_opacity) = Self::ripple(radius, ctx.clock);
        let ring_width = canvas.stage_units_per_row() * 0.6;
        let center = STAGE_SIZE / 2.0;

        for row in 0..canvas.height() {
            for col in 0..canvas.width() {
                let (x, y) = canvas.cell_to_stage(col, row);
                let (dx, dy) = (x - center, y - center);
                let distance = (dx * dx + dy * dy).sqrt();
                let under = canvas.get(col, row).and_then(|cell| cell.bg).unwrap_or_default();

                if distance <= radius {
                    let angle = dy.atan2(dx).to_degrees() - params.rotation as f32;
                    let surface = palette.conic(angle);
                    // the glow is brightest at the core and fades towards the rim
                    let lit = surface.mix(Color::WHITE, glow * (1.0 - distance / radius));
                    canvas.paint_bg(col, row, under.mix(lit, opacity));
                } else if (distance - ripple_radius).abs() <= ring_width && ripple_opacity > 0.0 {
                    canvas.put(col, row, RIPPLE_GLYPH, under.mix(Color::WHITE, ripple_opacity * 0.5));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animations::AnimationParams,
        session::{OvershootPolicy, PatternCatalog, PhaseTimer, SessionDuration},
    };
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 48.0, 0.6)]
    #[case(1.5, 96.0, 0.3)]
    #[case(4.5, 96.0, 0.3)]
    fn ripple(#[case] clock: f32, #[case] radius: f32, #[case] opacity: f32) {
        let (r, o) = Orb::ripple(48.0, clock);
        assert!((r - radius).abs() < 1e-3, "{r}");
        assert!((o - opacity).abs() < 1e-3, "{o}");
    }

    fn painted_cells(scale: f64) -> usize {
        let pattern = PatternCatalog::default().default_pattern().clone();
        let snapshot = PhaseTimer::new(pattern, SessionDuration::default(), OvershootPolicy::Discard).snapshot();
        let params = AnimationParams { scale, ..AnimationParams::IDLE };
        // keep the ripple out of the way
        let ctx = FrameContext { snapshot: &snapshot, params, clock: 2.999, delta: 0.0 };
        let mut canvas = Canvas::new(80, 40);
        Orb.draw(&ctx, &mut canvas);
        canvas.rows().flatten().filter(|cell| cell.bg.is_some()).count()
    }

    #[test]
    fn grows_with_scale() {
        let small = painted_cells(1.0);
        let large = painted_cells(1.8);
        assert!(small > 0);
        assert!(large > small * 2, "{small} vs {large}");
    }

    #[test]
    fn center_is_painted() {
        let pattern = PatternCatalog::default().default_pattern().clone();
        let snapshot = PhaseTimer::new(pattern, SessionDuration::default(), OvershootPolicy::Discard).snapshot();
        let ctx = FrameContext { snapshot: &snapshot, params: AnimationParams::IDLE, clock: 0.0, delta: 0.0 };
        let mut canvas = Canvas::new(80, 40);
        Orb.draw(&ctx, &mut canvas);
        assert!(canvas.get(40, 20).and_then(|cell| cell.bg).is_some());
        assert_eq!(canvas.get(0, 0).and_then(|cell| cell.bg), None);
    }
}
