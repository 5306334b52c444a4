use super::{
    common::{FrameContext, Layer},
    palette::palette,
};
use crate::{
    render::{Canvas, Color, STAGE_SIZE},
    session::Phase,
};

/// Particles per unit of intensity.
const DENSITY: f64 = 20.0;
/// Motion factors are expressed per 100ms step.
const STEP_SECONDS: f32 = 0.1;
const RADIAL_FACTOR: f32 = 0.02;
const ORBIT_RADIANS: f32 = 0.02;
/// Particles drifting closer than this to the center are respawned.
const MIN_DISTANCE: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Particle {
    pub x: f32,
    pub y: f32,
    /// Between 1 and 5.
    pub size: f32,
    pub color: Color,
}

impl Particle {
    fn glyph(&self) -> char {
        match self.size {
            s if s < 2.0 => '·',
            s if s < 3.0 => '∙',
            s if s < 4.0 => '•',
            _ => '●',
        }
    }
}

/// Particles that stream outwards on the inhale, inwards on the exhale, and orbit during holds.
#[derive(Debug)]
pub(crate) struct ParticleField {
    rng: fastrand::Rng,
    particles: Vec<Particle>,
    phase: Option<Phase>,
}

impl ParticleField {
    pub(crate) fn new(rng: fastrand::Rng) -> Self {
        Self { rng, particles: Vec::new(), phase: None }
    }

    #[cfg(test)]
    pub(crate) fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// How many particles are shown at the given intensity.
    pub(crate) fn target_count(intensity: f64) -> usize {
        (intensity.max(0.0) * DENSITY).floor() as usize
    }

    fn spawn(&mut self, phase: Phase) -> Particle {
        let palette = palette(phase);
        Particle {
            x: self.rng.f32() * STAGE_SIZE,
            y: self.rng.f32() * STAGE_SIZE,
            size: self.rng.f32() * 4.0 + 1.0,
            color: palette.accent(self.rng.usize(..palette.accents.len())),
        }
    }

    /// Match the particle count to the intensity, respawning everything on a phase change.
    fn reconcile(&mut self, phase: Phase, intensity: f64) {
        if self.phase != Some(phase) {
            self.particles.clear();
            self.phase = Some(phase);
        }
        let target = Self::target_count(intensity);
        self.particles.truncate(target);
        while self.particles.len() < target {
            let particle = self.spawn(phase);
            self.particles.push(particle);
        }
    }

    fn advance(&mut self, phase: Phase, intensity: f32, steps: f32) {
        let center = STAGE_SIZE / 2.0;
        for index in 0..self.particles.len() {
            let particle = &mut self.particles[index];
            let (dx, dy) = (particle.x - center, particle.y - center);
            match phase {
                Phase::Inhale => {
                    let factor = 1.0 + RADIAL_FACTOR * intensity * steps;
                    particle.x = center + dx * factor;
                    particle.y = center + dy * factor;
                }
                Phase::Exhale => {
                    let factor = (1.0 - RADIAL_FACTOR * intensity * steps).max(0.0);
                    particle.x = center + dx * factor;
                    particle.y = center + dy * factor;
                }
                Phase::Hold => {
                    let distance = (dx * dx + dy * dy).sqrt();
                    let angle = dy.atan2(dx) + ORBIT_RADIANS * steps;
                    particle.x = center + distance * angle.cos();
                    particle.y = center + distance * angle.sin();
                }
                Phase::HoldAfterExhale => (),
            }

            let (x, y) = (particle.x, particle.y);
            let outside = !(0.0..=STAGE_SIZE).contains(&x) || !(0.0..=STAGE_SIZE).contains(&y);
            let collapsed = ((x - center).powi(2) + (y - center).powi(2)).sqrt() < MIN_DISTANCE;
            if outside || collapsed {
                let fresh = self.spawn(phase);
                self.particles[index] = fresh;
            }
        }
    }
}

impl Layer for ParticleField {
    fn update(&mut self, ctx: &FrameContext) {
        if !ctx.is_running() {
            self.particles.clear();
            self.phase = None;
            return;
        }
        let phase = ctx.snapshot.phase;
        let intensity = ctx.params.scale;
        self.reconcile(phase, intensity);
        self.advance(phase, intensity as f32, ctx.delta / STEP_SECONDS);
    }

    fn draw(&self, _ctx: &FrameContext, canvas: &mut Canvas) {
        for particle in &self.particles {
            if let Some((col, row)) = canvas.stage_to_cell(particle.x, particle.y) {
                canvas.put(col, row, particle.glyph(), particle.color);
            }
        }
    }
}
