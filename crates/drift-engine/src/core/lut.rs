//! Process-wide trigonometric lookup tables.
//!
//! The field generator, wobble, and twinkle all evaluate sin/cos every
//! frame for every cell or particle; the tables trade a little accuracy
//! for a plain array index. Built once on first use and shared read-only
//! across all engine instances.

use std::f32::consts::TAU;
use std::sync::OnceLock;

/// Entries per full turn in the sine/cosine tables.
pub const LUT_RESOLUTION: usize = 2048;

static SIN_TABLE: OnceLock<Box<[f32]>> = OnceLock::new();
static COS_TABLE: OnceLock<Box<[f32]>> = OnceLock::new();

fn sin_table() -> &'static [f32] {
    SIN_TABLE.get_or_init(|| {
        (0..LUT_RESOLUTION)
            .map(|i| (i as f32 / LUT_RESOLUTION as f32 * TAU).sin())
            .collect()
    })
}

fn cos_table() -> &'static [f32] {
    COS_TABLE.get_or_init(|| {
        (0..LUT_RESOLUTION)
            .map(|i| (i as f32 / LUT_RESOLUTION as f32 * TAU).cos())
            .collect()
    })
}

/// Table index for an angle in radians, wrapping into [0, TAU).
#[inline]
fn index_of(angle: f32) -> usize {
    let turns = angle / TAU;
    let frac = turns - turns.floor();
    ((frac * LUT_RESOLUTION as f32) as usize).min(LUT_RESOLUTION - 1)
}

/// Table-backed sine. Accurate to one table step.
#[inline]
pub fn fast_sin(angle: f32) -> f32 {
    sin_table()[index_of(angle)]
}

/// Table-backed cosine. Accurate to one table step.
#[inline]
pub fn fast_cos(angle: f32) -> f32 {
    cos_table()[index_of(angle)]
}
