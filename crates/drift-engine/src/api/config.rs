use serde::{Deserialize, Serialize};

use crate::core::rng::Rng;

/// Configuration for the engine, provided by the host.
/// Every field has a default; hosts override selectively via JSON
/// (`EngineConfig::from_json`), so unknown-at-spawn fields fall back
/// rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Particle count the engine maintains (default: 80).
    pub target_population: usize,
    /// Probability that a spawn rolls the accent variant (default: 0.15).
    pub accent_probability: f32,

    /// Flow-field cell size in logical pixels (default: 40).
    pub field_resolution: f32,
    /// How fast the field pattern drifts per frame (default: 0.0035).
    pub flow_speed: f32,
    /// Velocity gained per frame from the sampled flow direction (default: 0.045).
    pub flow_intensity: f32,

    /// Amplitude of the per-frame heading wobble, in radians (default: 0.22).
    pub wobble_complexity: f32,
    /// Frequency of the heading wobble over a particle's life (default: 0.045).
    pub wobble_rate: f32,
    /// Frequency of the alpha twinkle over a particle's life (default: 0.1).
    pub twinkle_rate: f32,

    /// Raw wheel delta → impulse conversion factor (default: 0.01).
    pub scroll_scale: f32,
    /// Multiplicative decay of the shared impulse each frame (default: 0.88).
    pub scroll_decay: f32,
    /// Per-frame damping of a particle's scroll velocity (default: 0.94).
    pub scroll_damping: f32,
    /// Extra damping for large particles, scaled by inverse size (default: 0.05).
    pub scroll_damping_bias: f32,
    /// Symmetric clamp on a particle's scroll velocity (default: 5.0).
    pub max_scroll_vy: f32,
    /// Impulse magnitude below which the accumulator snaps to zero (default: 0.001).
    pub impulse_epsilon: f32,

    /// Minimum explosion kick magnitude (default: 2.0).
    pub explode_min: f32,
    /// Maximum explosion kick magnitude (default: 7.0).
    pub explode_max: f32,

    /// Frames spent fading in, and again fading out past `max_life` (default: 60).
    pub fade_frames: f32,
    /// Initial velocity range per axis at spawn (default: 0.25).
    pub spawn_speed: f32,

    /// Multiplicative decay of trail-point opacity each frame (default: 0.85).
    pub trail_decay: f32,
    /// Segment opacity below which trail rendering stops (default: 0.02).
    pub trail_min_alpha: f32,

    /// Parameter bundle for ordinary particles.
    pub normal: VariantConfig,
    /// Parameter bundle for the rarer accent particles.
    pub accent: VariantConfig,
}

/// Per-variant constants bound to a particle at spawn.
/// Accent vs normal is a parameter choice, not a different entity:
/// one roll at construction selects the bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Smallest size this variant spawns at.
    pub min_size: f32,
    /// Size span above the minimum.
    pub size_range: f32,
    /// How this variant picks its hue.
    pub hue: HueMode,
    /// Frames of full life before fade-out can begin.
    pub life_base: f32,
    /// Random extra lifespan on top of the base.
    pub life_range: f32,
    /// Opacity floor of the steady phase.
    pub alpha_min: f32,
    /// Opacity span above the floor, driven by eased size.
    pub alpha_range: f32,
    /// Flow responsiveness floor.
    pub speed_base: f32,
    /// Flow responsiveness span above the floor, driven by eased size.
    pub speed_range: f32,
    /// Trail ring-buffer capacity.
    pub trail_cap: usize,
    /// Glow radius as a multiple of particle size.
    pub glow_scale: f32,
    /// Opacity quantization buckets for batched trail strokes.
    pub alpha_buckets: u32,
}

/// How particle hues are chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HueMode {
    /// Continuous band: `base + t * range` for uniform `t`.
    Band { base: f32, range: f32 },
    /// One of a fixed set of hues.
    Palette(Vec<f32>),
}

impl HueMode {
    /// Draw a hue in degrees.
    pub fn pick(&self, rng: &mut Rng) -> f32 {
        match self {
            HueMode::Band { base, range } => base + rng.next_f32() * range,
            HueMode::Palette(hues) => {
                if hues.is_empty() {
                    0.0
                } else {
                    hues[rng.next_int(hues.len() as u32) as usize]
                }
            }
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_population: 80,
            accent_probability: 0.15,
            field_resolution: 40.0,
            flow_speed: 0.0035,
            flow_intensity: 0.045,
            wobble_complexity: 0.22,
            wobble_rate: 0.045,
            twinkle_rate: 0.1,
            scroll_scale: 0.01,
            scroll_decay: 0.88,
            scroll_damping: 0.94,
            scroll_damping_bias: 0.05,
            max_scroll_vy: 5.0,
            impulse_epsilon: 0.001,
            explode_min: 2.0,
            explode_max: 7.0,
            fade_frames: 60.0,
            spawn_speed: 0.25,
            trail_decay: 0.85,
            trail_min_alpha: 0.02,
            normal: VariantConfig {
                min_size: 0.8,
                size_range: 2.2,
                hue: HueMode::Band { base: 190.0, range: 70.0 },
                life_base: 360.0,
                life_range: 240.0,
                alpha_min: 0.25,
                alpha_range: 0.45,
                speed_base: 0.6,
                speed_range: 0.8,
                trail_cap: 6,
                glow_scale: 3.0,
                alpha_buckets: 4,
            },
            // Accents: bigger floor, palette hues, longer life, doubled
            // flow responsiveness, taller opacity/trail envelope.
            accent: VariantConfig {
                min_size: 1.6,
                size_range: 2.8,
                hue: HueMode::Palette(vec![45.0, 320.0, 175.0]),
                life_base: 540.0,
                life_range: 360.0,
                alpha_min: 0.45,
                alpha_range: 0.5,
                speed_base: 1.2,
                speed_range: 1.6,
                trail_cap: 10,
                glow_scale: 4.5,
                alpha_buckets: 8,
            },
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the config to pretty JSON (debug overlays, config dumps).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = EngineConfig::default();
        assert!(cfg.target_population > 0);
        assert!(cfg.accent_probability >= 0.0 && cfg.accent_probability <= 1.0);
        assert!(cfg.scroll_decay > 0.0 && cfg.scroll_decay < 1.0);
        assert!(cfg.scroll_damping > 0.0 && cfg.scroll_damping < 1.0);
        assert!(cfg.trail_decay > 0.0 && cfg.trail_decay < 1.0);
        assert!(cfg.fade_frames > 0.0);
        assert!(cfg.explode_min <= cfg.explode_max);
        assert!(cfg.accent.trail_cap > cfg.normal.trail_cap);
        assert!(cfg.accent.min_size > cfg.normal.min_size);
    }

    #[test]
    fn json_round_trip() {
        let cfg = EngineConfig::default();
        let json = cfg.to_json().unwrap();
        let back = EngineConfig::from_json(&json).unwrap();
        assert_eq!(back.target_population, cfg.target_population);
        assert_eq!(back.normal.trail_cap, cfg.normal.trail_cap);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{"target_population": 12}"#).unwrap();
        assert_eq!(cfg.target_population, 12);
        assert_eq!(cfg.fade_frames, EngineConfig::default().fade_frames);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EngineConfig::from_json("{not json").is_err());
    }

    #[test]
    fn hue_band_stays_in_band() {
        let mut rng = Rng::new(42);
        let mode = HueMode::Band { base: 190.0, range: 70.0 };
        for _ in 0..100 {
            let hue = mode.pick(&mut rng);
            assert!((190.0..260.0).contains(&hue), "hue out of band: {}", hue);
        }
    }

    #[test]
    fn hue_palette_picks_members() {
        let mut rng = Rng::new(42);
        let mode = HueMode::Palette(vec![45.0, 320.0, 175.0]);
        for _ in 0..100 {
            let hue = mode.pick(&mut rng);
            assert!([45.0, 320.0, 175.0].contains(&hue));
        }
    }
}
