mod common;
mod palette;
mod params;

// Individual layers
mod ambient;
mod orb;
mod particles;
mod shapes;

pub use params::AnimationParams;
pub(crate) use common::{FrameContext, Layer};

use crate::{
    render::{Canvas, Color},
    session::SessionSnapshot,
};

/// Which optional layers a scene draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOptions {
    pub ambient: bool,
    pub shapes: bool,
    pub particles: bool,
    pub background: Color,
}

/// All the layers that make up the breathing visuals, drawn back to front.
pub(crate) struct Scene {
    layers: Vec<Box<dyn Layer>>,
}

impl Scene {
    pub(crate) fn new(options: SceneOptions, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut layers: Vec<Box<dyn Layer>> = Vec::new();
        if options.ambient {
            layers.push(Box::new(ambient::Ambient::new(options.background, &mut rng)));
        }
        layers.push(Box::new(orb::Orb));
        if options.shapes {
            layers.push(Box::new(shapes::Shapes));
        }
        if options.particles {
            layers.push(Box::new(particles::ParticleField::new(rng.fork())));
        }
        Self { layers }
    }

    /// Advance every layer and draw the frame for `snapshot`.
    pub(crate) fn render(&mut self, snapshot: &SessionSnapshot, clock: f32, delta: f32, canvas: &mut Canvas) {
        let ctx = FrameContext { snapshot, params: AnimationParams::from_snapshot(snapshot), clock, delta };
        for layer in &mut self.layers {
            layer.update(&ctx);
            layer.draw(&ctx, canvas);
        }
    }
}
