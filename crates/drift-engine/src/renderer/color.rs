/// Hue/saturation/lightness/alpha color.
/// The engine reasons in HSL because particle identity is a hue;
/// converting to a backend format (CSS string, RGBA) is the backend's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Hue in degrees (not normalized; backends wrap).
    pub hue: f32,
    /// Saturation percentage, 0–100.
    pub saturation: f32,
    /// Lightness percentage, 0–100.
    pub lightness: f32,
    /// Opacity, 0–1.
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self { hue, saturation, lightness, alpha }
    }

    /// Same color with a different opacity.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}
