use glam::Vec2;

use crate::api::config::{EngineConfig, VariantConfig};
use crate::core::field::FlowField;
use crate::core::lut::{fast_cos, fast_sin};
use crate::core::rng::Rng;
use crate::renderer::color::Hsla;
use crate::renderer::traits::Surface;
use crate::systems::trail::Trail;

/// Which parameter bundle a particle was spawned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Normal,
    Accent,
}

/// A glowing point with a decaying trail.
///
/// Owns its kinematic and visual state; advances itself against the
/// shared flow field, decides its own liveness, and renders itself in
/// three layers (glow, trail, core).
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position in logical pixels. Read by the orchestrator (explosion
    /// directions); mutation stays behind the methods below.
    pub pos: Vec2,
    vel: Vec2,
    /// Scroll-driven vertical velocity, damped independently of `vel`
    /// so scroll input biases but never permanently alters the
    /// flow-driven trajectory.
    scroll_vy: f32,
    size: f32,
    /// Inverse-normalized size in [0, 1]: 1 for the variant's smallest
    /// particle, 0 for its largest. Scales scroll response, so bigger
    /// particles carry more inertia.
    size_norm: f32,
    hue: f32,
    base_alpha: f32,
    speed_factor: f32,
    life: f32,
    max_life: f32,
    variant: Variant,
    trail: Trail,
}

impl Particle {
    /// Spawn at a uniform-random position with a small random velocity.
    ///
    /// One Bernoulli roll picks the variant bundle; the squared uniform
    /// size draw favors small particles (square-root-shaped CDF). Eased
    /// size drives opacity and flow responsiveness, so larger particles
    /// are reliably brighter and quicker, not just more likely to be.
    pub fn spawn(rng: &mut Rng, width: f32, height: f32, cfg: &EngineConfig) -> Self {
        let variant = if rng.chance(cfg.accent_probability) {
            Variant::Accent
        } else {
            Variant::Normal
        };
        let vp = match variant {
            Variant::Normal => &cfg.normal,
            Variant::Accent => &cfg.accent,
        };

        let pos = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
        let vel = Vec2::new(
            rng.range(-cfg.spawn_speed, cfg.spawn_speed),
            rng.range(-cfg.spawn_speed, cfg.spawn_speed),
        );

        let u = rng.next_f32();
        let size = vp.min_size + u * u * vp.size_range;
        let bigness = if vp.size_range > 0.0 {
            ((size - vp.min_size) / vp.size_range).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let eased = bigness.powf(1.5);

        Self {
            pos,
            vel,
            scroll_vy: 0.0,
            size,
            size_norm: 1.0 - bigness,
            hue: vp.hue.pick(rng),
            base_alpha: vp.alpha_min + eased * vp.alpha_range,
            speed_factor: vp.speed_base + eased * vp.speed_range,
            life: 0.0,
            max_life: vp.life_base + rng.next_f32() * vp.life_range,
            variant,
            trail: Trail::with_capacity(vp.trail_cap),
        }
    }

    /// Advance one frame. Returns false once the fade-out has finished.
    pub fn update(&mut self, field: &FlowField, bounds: Vec2, cfg: &EngineConfig) -> bool {
        self.life += 1.0;

        // Larger particles shed scroll velocity faster.
        let damping = cfg.scroll_damping - (1.0 - self.size_norm) * cfg.scroll_damping_bias;
        self.scroll_vy *= damping;

        if let Some(dir) = field.sample(self.pos) {
            self.vel += dir * cfg.flow_intensity * self.speed_factor;
        }

        // Rotate the heading by a sinusoid of life (phase-offset by hue),
        // keeping the speed magnitude. Curves the path without ever
        // accelerating it; a resting particle stays at rest.
        let speed = self.vel.length();
        if speed > 0.0 {
            let wobble = fast_sin(self.life * cfg.wobble_rate + self.hue) * cfg.wobble_complexity;
            let heading = self.vel.y.atan2(self.vel.x) + wobble;
            self.vel = Vec2::new(fast_cos(heading), fast_sin(heading)) * speed;
        }

        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y + self.scroll_vy;

        // Off screen before natural expiry: jump straight to the fade
        // phase instead of letting an invisible particle linger.
        let off_screen =
            self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y;
        if off_screen && self.life < self.max_life {
            self.life = self.max_life;
        }

        self.trail.push(self.pos);
        self.trail.decay(cfg.trail_decay);

        self.life < self.max_life + cfg.fade_frames
    }

    /// Accumulate a scroll kick, scaled by inertia and clamped.
    pub fn apply_impulse(&mut self, d_vy: f32, cfg: &EngineConfig) {
        self.scroll_vy =
            (self.scroll_vy + d_vy * self.size_norm).clamp(-cfg.max_scroll_vy, cfg.max_scroll_vy);
    }

    /// Add directly to velocity. The explosion path.
    pub fn apply_external_force(&mut self, force: Vec2) {
        self.vel += force;
    }

    /// Render glow, trail, and core. Issues nothing once faded out.
    pub fn draw(&self, surface: &mut dyn Surface, cfg: &EngineConfig) {
        let phase = self.phase_alpha(cfg.fade_frames);
        if phase <= 0.0 {
            return;
        }

        // Twinkle dims but never blanks a mid-life particle; the hue
        // offset keeps the population out of lockstep.
        let twinkle = 0.75 + 0.25 * fast_sin(self.life * cfg.twinkle_rate + self.hue);
        let alpha = phase * twinkle;
        let vp = self.params(cfg);

        surface.fill_glow(
            self.pos,
            self.size * vp.glow_scale,
            Hsla::new(self.hue, 80.0, 60.0, alpha * 0.35),
        );

        self.draw_trail(surface, vp, alpha, cfg.trail_min_alpha);

        surface.fill_circle(self.pos, self.size, Hsla::new(self.hue, 85.0, 70.0, alpha));
    }

    /// Trail as connected segments, opacity quantized into the variant's
    /// buckets so contiguous same-bucket runs collapse into one stroke.
    /// Entries only get fainter with age, so the first segment under the
    /// visibility threshold ends the pass.
    fn draw_trail(&self, surface: &mut dyn Surface, vp: &VariantConfig, alpha: f32, min_alpha: f32) {
        if self.trail.len() < 2 {
            return;
        }
        let buckets = vp.alpha_buckets.max(1) as f32;
        let mut run: Vec<Vec2> = Vec::with_capacity(self.trail.len());
        let mut run_bucket = 0u32;
        let width = (self.size * 0.5).max(0.5);

        let mut iter = self.trail.iter();
        let mut prev = match iter.next() {
            Some(p) => p,
            None => return,
        };
        for point in iter {
            let seg_alpha = prev.alpha.min(point.alpha) * alpha;
            if seg_alpha < min_alpha {
                break;
            }
            let bucket = ((seg_alpha * buckets).ceil() as u32).min(vp.alpha_buckets.max(1));
            if run.is_empty() {
                run.push(prev.pos);
                run_bucket = bucket;
            } else if bucket != run_bucket {
                surface.stroke_polyline(
                    &run,
                    width,
                    Hsla::new(self.hue, 80.0, 65.0, run_bucket as f32 / buckets),
                );
                run.clear();
                run.push(prev.pos);
                run_bucket = bucket;
            }
            run.push(point.pos);
            prev = point;
        }
        if run.len() >= 2 {
            surface.stroke_polyline(
                &run,
                width,
                Hsla::new(self.hue, 80.0, 65.0, run_bucket as f32 / buckets),
            );
        }
    }

    /// Opacity from lifecycle position alone: linear fade-in, steady
    /// `base_alpha`, linear fade-out past `max_life`.
    fn phase_alpha(&self, fade_frames: f32) -> f32 {
        if self.life < fade_frames {
            self.base_alpha * (self.life / fade_frames)
        } else if self.life < self.max_life {
            self.base_alpha
        } else {
            let t = (self.life - self.max_life) / fade_frames;
            self.base_alpha * (1.0 - t).max(0.0)
        }
    }

    fn params<'a>(&self, cfg: &'a EngineConfig) -> &'a VariantConfig {
        match self.variant {
            Variant::Normal => &cfg.normal,
            Variant::Accent => &cfg.accent,
        }
    }

    // -- Read accessors --

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn size_norm(&self) -> f32 {
        self.size_norm
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn max_life(&self) -> f32 {
        self.max_life
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn scroll_vy(&self) -> f32 {
        self.scroll_vy
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}
