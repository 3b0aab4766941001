use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::core::field::FlowField;
use crate::core::rng::Rng;
use crate::renderer::traits::Surface;
use crate::systems::particle::Particle;

/// Orchestrator for one animation context.
///
/// Owns the flow field, the particle population, the frame counter, and
/// the shared scroll-impulse accumulator. The host's scheduler calls
/// `tick` once per display refresh; one call is one unit of simulated
/// time — the engine assumes nothing else about the clock.
pub struct FlowFieldEngine {
    config: EngineConfig,
    width: f32,
    height: f32,
    field: FlowField,
    particles: Vec<Particle>,
    rng: Rng,
    frame: u64,
    /// Pending scroll force, shared by the whole population. Consumed
    /// and decayed once per frame rather than per event, so bursts of
    /// wheel deltas merge into a single decaying push.
    impulse: f32,
}

impl FlowFieldEngine {
    /// Allocate the grid and spawn the initial population.
    pub fn new(width: f32, height: f32, config: EngineConfig, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let field = FlowField::new(width, height, config.field_resolution);
        let mut particles = Vec::with_capacity(config.target_population);
        for _ in 0..config.target_population {
            particles.push(Particle::spawn(&mut rng, width, height, &config));
        }
        log::info!(
            "flow field {}x{} cells, population {}",
            field.cols(),
            field.rows(),
            particles.len()
        );
        Self {
            config,
            width,
            height,
            field,
            particles,
            rng,
            frame: 0,
            impulse: 0.0,
        }
    }

    /// Run one frame to completion: clear, advance the field, distribute
    /// the pending impulse, update and draw the population, then top the
    /// population back up (at half the frame rate).
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        surface.clear();

        self.frame += 1;
        self.field.regenerate(self.frame as f32, self.config.flow_speed);

        if self.impulse != 0.0 {
            let impulse = self.impulse;
            let config = &self.config;
            for p in &mut self.particles {
                p.apply_impulse(impulse, config);
            }
            self.impulse *= self.config.scroll_decay;
            if self.impulse.abs() < self.config.impulse_epsilon {
                self.impulse = 0.0;
            }
        }

        let bounds = Vec2::new(self.width, self.height);
        let field = &self.field;
        let config = &self.config;
        self.particles.retain_mut(|p| p.update(field, bounds, config));

        for p in &self.particles {
            p.draw(surface, &self.config);
        }

        if self.particles.len() < self.config.target_population && self.frame % 2 == 0 {
            self.particles
                .push(Particle::spawn(&mut self.rng, self.width, self.height, &self.config));
        }
    }

    /// Accumulate a raw wheel delta. Consumed on the next tick, so
    /// rapid-fire scroll events land as one smoothed push.
    pub fn add_scroll_impulse(&mut self, delta_y: f32) {
        self.impulse += delta_y * self.config.scroll_scale;
    }

    /// Kick every particle radially away from the viewport center, with
    /// a random magnitude per particle. Immediate; bypasses the
    /// impulse-decay machinery.
    pub fn explode(&mut self) {
        let center = Vec2::new(self.width * 0.5, self.height * 0.5);
        for p in &mut self.particles {
            let offset = p.pos - center;
            let dist = offset.length();
            // Dead-center particles get a zero kick, not a NaN one.
            let dist = if dist > 0.0 { dist } else { 1.0 };
            let magnitude = self.rng.range(self.config.explode_min, self.config.explode_max);
            p.apply_external_force(offset / dist * magnitude);
        }
    }

    // -- Read accessors --

    pub fn population(&self) -> usize {
        self.particles.len()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn impulse(&self) -> f32 {
        self.impulse
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::mock::{RecordingSurface, SurfaceCall};

    fn small_config() -> EngineConfig {
        EngineConfig {
            target_population: 8,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn init_spawns_target_population() {
        let engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        assert_eq!(engine.population(), 8);
        assert_eq!(engine.frame(), 0);
    }

    #[test]
    fn tick_clears_before_drawing() {
        let mut engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        let mut surface = RecordingSurface::default();
        engine.tick(&mut surface);
        assert_eq!(surface.calls.first(), Some(&SurfaceCall::Clear));
    }

    #[test]
    fn impulse_decays_each_tick_then_snaps_to_zero() {
        let mut engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        let mut surface = RecordingSurface::default();

        engine.add_scroll_impulse(120.0);
        let initial = engine.impulse();
        assert!(initial > 0.0);

        engine.tick(&mut surface);
        let decayed = engine.impulse();
        assert!(decayed < initial, "impulse should strictly decrease");
        assert!((decayed - initial * engine.config().scroll_decay).abs() < 1e-6);

        for _ in 0..200 {
            engine.tick(&mut surface);
        }
        assert_eq!(engine.impulse(), 0.0, "impulse should snap to exactly zero");
    }

    #[test]
    fn impulse_reaches_particles() {
        let mut engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        let mut surface = RecordingSurface::default();
        engine.add_scroll_impulse(500.0);
        engine.tick(&mut surface);
        assert!(
            engine.particles().any(|p| p.scroll_vy() != 0.0),
            "scroll impulse should move particle scroll velocities"
        );
    }

    #[test]
    fn respawn_waits_for_even_frames() {
        let mut engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        let mut surface = RecordingSurface::default();
        engine.particles.truncate(3);

        engine.tick(&mut surface); // frame 1, odd
        assert_eq!(engine.population(), 3, "no respawn on an odd frame");

        engine.tick(&mut surface); // frame 2, even
        assert_eq!(engine.population(), 4, "exactly one respawn on an even frame");
    }

    #[test]
    fn population_never_overshoots_target() {
        let mut engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        let mut surface = RecordingSurface::default();
        engine.particles.truncate(1);
        for _ in 0..1000 {
            engine.tick(&mut surface);
            assert!(engine.population() <= 8);
        }
    }

    #[test]
    fn explode_handles_dead_center_particle() {
        let mut engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        for p in &mut engine.particles {
            p.pos = Vec2::new(200.0, 150.0); // exact viewport center
        }
        engine.explode();
        for p in engine.particles() {
            assert!(p.vel().x.is_finite() && p.vel().y.is_finite(), "NaN velocity after explode");
        }
    }

    #[test]
    fn explode_pushes_outward() {
        let mut engine = FlowFieldEngine::new(400.0, 300.0, small_config(), 42);
        for p in &mut engine.particles {
            p.pos = Vec2::new(300.0, 150.0); // right of center
        }
        let before: Vec<Vec2> = engine.particles().map(|p| p.vel()).collect();
        engine.explode();
        for (p, old) in engine.particles().zip(before) {
            let kick = p.vel() - old;
            assert!(kick.x > 0.0, "kick should point away from center, got {:?}", kick);
            let mag = kick.length();
            assert!(
                mag >= engine.config().explode_min && mag <= engine.config().explode_max,
                "kick magnitude {} out of range",
                mag
            );
        }
    }
}
