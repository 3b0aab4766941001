//! Drawing contract the engine renders against.
//!
//! The simulation core never touches a real canvas: it issues clear,
//! glow, polyline, and circle calls through this trait. The wasm bridge
//! implements it over an OffscreenCanvas 2D context; tests implement it
//! with a recording mock.

use glam::Vec2;

use crate::renderer::color::Hsla;

/// A 2D drawing surface with gradients, paths, and arcs.
pub trait Surface {
    /// Wipe the whole viewport.
    fn clear(&mut self);

    /// Radial-gradient glow: the color at the center fading to fully
    /// transparent at `radius`.
    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Hsla);

    /// One stroked polyline through `points` (at least two). Callers
    /// batch runs of equal opacity into a single call.
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Hsla);

    /// Filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla);
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Records every draw call so tests can assert on render behavior
    /// without a canvas.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub calls: Vec<SurfaceCall>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum SurfaceCall {
        Clear,
        Glow { radius: f32, alpha: f32 },
        Stroke { points: usize, alpha: f32 },
        Circle { radius: f32, alpha: f32 },
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(SurfaceCall::Clear);
        }

        fn fill_glow(&mut self, _center: Vec2, radius: f32, color: Hsla) {
            self.calls.push(SurfaceCall::Glow { radius, alpha: color.alpha });
        }

        fn stroke_polyline(&mut self, points: &[Vec2], _width: f32, color: Hsla) {
            self.calls.push(SurfaceCall::Stroke { points: points.len(), alpha: color.alpha });
        }

        fn fill_circle(&mut self, _center: Vec2, radius: f32, color: Hsla) {
            self.calls.push(SurfaceCall::Circle { radius, alpha: color.alpha });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{RecordingSurface, SurfaceCall};
    use super::*;

    #[test]
    fn mock_records_calls_in_order() {
        let mut surface = RecordingSurface::default();
        surface.clear();
        surface.fill_circle(Vec2::ZERO, 2.0, Hsla::new(200.0, 80.0, 60.0, 0.5));
        assert_eq!(surface.calls.len(), 2);
        assert_eq!(surface.calls[0], SurfaceCall::Clear);
        assert_eq!(surface.calls[1], SurfaceCall::Circle { radius: 2.0, alpha: 0.5 });
    }
}
