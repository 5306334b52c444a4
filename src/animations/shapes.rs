use super::{
    common::{FrameContext, Layer},
    palette::palette,
};
use crate::render::{Canvas, STAGE_SIZE};

/// Shapes are drawn so faintly that they'd be invisible on a terminal without a boost.
const GLYPH_GAIN: f32 = 3.0;
const OUTLINE_GLYPH: char = '·';

/// A regular polygon, described by where its first vertex sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Polygon {
    pub sides: usize,
    /// Diameter in stage units.
    pub size: f32,
    /// Angle of the first vertex, in degrees.
    pub start_angle: f32,
}

const POLYGONS: [Polygon; 4] = [
    // triangle pointing up
    Polygon { sides: 3, size: 60.0, start_angle: -90.0 },
    Polygon { sides: 6, size: 80.0, start_angle: 0.0 },
    Polygon { sides: 5, size: 100.0, start_angle: -90.0 },
    Polygon { sides: 8, size: 120.0, start_angle: 0.0 },
];

impl Polygon {
    /// The vertices of this polygon in stage coordinates.
    pub(crate) fn vertices(&self, center: (f32, f32), scale: f32, rotation: f32) -> Vec<(f32, f32)> {
        let radius = self.size / 2.0 * scale;
        let step = 360.0 / self.sides as f32;
        (0..self.sides)
            .map(|i| {
                let angle = (self.start_angle + rotation + step * i as f32).to_radians();
                (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
            })
            .collect()
    }
}

/// Nested polygons that grow and turn with the breath.
#[derive(Debug, Default)]
pub(crate) struct Shapes;

impl Layer for Shapes {
    fn draw(&self, ctx: &FrameContext, canvas: &mut Canvas) {
        if !ctx.is_running() {
            return;
        }
        let palette = palette(ctx.snapshot.phase);
        let center = (STAGE_SIZE / 2.0, STAGE_SIZE / 2.0);
        // sample edges finely enough that no cell along them is skipped
        let spacing = canvas.stage_units_per_row() / 4.0;
        let params = ctx.params;

        for (index, polygon) in POLYGONS.iter().enumerate() {
            let i = index as f32;
            let scale = params.scale as f32 * (1.0 + i * 0.1);
            let rotation = params.rotation as f32 + i * 45.0;
            let opacity = params.opacity as f32 * (0.3 - i * 0.05) * GLYPH_GAIN;
            let vertices = polygon.vertices(center, scale, rotation);
            let color = palette.accent(index);

            for (start, end) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
                let length = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
                let steps = (length / spacing).ceil().max(1.0) as usize;
                for step in 0..steps {
                    let t = step as f32 / steps as f32;
                    let x = start.0 + (end.0 - start.0) * t;
                    let y = start.1 + (end.1 - start.1) * t;
                    if let Some((col, row)) = canvas.stage_to_cell(x, y) {
                        let under = canvas.get(col, row).and_then(|cell| cell.bg).unwrap_or_default();
                        canvas.put(col, row, OUTLINE_GLYPH, under.mix(color, opacity));
                    }
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
    #[case::triangle(0, (160.0, 130.0))]
    #[case::hexagon(1, (200.0, 160.0))]
    #[case::pentagon(2, (160.0, 110.0))]
    #[case::octagon(3, (220.0, 160.0))]
    fn first_vertex(#[case] index: usize, #[case] expected: (f32, f32)) {
        let vertices = POLYGONS[index].vertices((160.0, 160.0), 1.0, 0.0);
        assert_eq!(vertices.len(), POLYGONS[index].sides);
        let (x, y) = vertices[0];
        assert!((x - expected.0).abs() < 1e-3 && (y - expected.1).abs() < 1e-3, "{x},{y}");
    }

    #[test]
    fn rotation_and_scale() {
        let vertices = POLYGONS[1].vertices((0.0, 0.0), 2.0, 90.0);
        let (x, y) = vertices[0];
        assert!(x.abs() < 1e-3 && (y - 80.0).abs() < 1e-3, "{x},{y}");
    }

    #[test]
    fn hidden_while_idle() {
        let pattern = PatternCatalog::default().default_pattern().clone();
        let mut timer = PhaseTimer::new(pattern, SessionDuration::default(), OvershootPolicy::Discard);
        let mut canvas = Canvas::new(40, 20);
        let idle = timer.snapshot();
        let ctx = FrameContext { snapshot: &idle, params: AnimationParams::IDLE, clock: 0.0, delta: 0.0 };
        Shapes.draw(&ctx, &mut canvas);
        assert!(canvas.rows().flatten().all(|cell| cell.glyph == ' '));

        timer.start();
        let running = timer.snapshot();
        let params = AnimationParams::from_snapshot(&running);
        let ctx = FrameContext { snapshot: &running, params, clock: 0.0, delta: 0.0 };
        Shapes.draw(&ctx, &mut canvas);
        assert!(canvas.rows().flatten().any(|cell| cell.glyph == OUTLINE_GLYPH));
    }
}
