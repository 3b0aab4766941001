//! `Surface` implementation over an OffscreenCanvas 2D context.
//!
//! The worker owns the canvas; the host page only ever sees pixels.

use drift_engine::{Hsla, Surface};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{OffscreenCanvas, OffscreenCanvasRenderingContext2d};

/// Canvas-backed drawing surface, sized in logical pixels with the
/// device pixel ratio applied as a context scale.
pub struct CanvasSurface {
    ctx: OffscreenCanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    /// Size the backing store, acquire the 2D context, and apply
    /// pixel-ratio scaling.
    ///
    /// Returns None when the context is unavailable. The effect is
    /// decorative, so the caller stays inert rather than erroring.
    pub fn new(canvas: &OffscreenCanvas, width: f32, height: f32, pixel_ratio: f32) -> Option<Self> {
        canvas.set_width((width * pixel_ratio) as u32);
        canvas.set_height((height * pixel_ratio) as u32);

        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<OffscreenCanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::warn!("2d context came back with an unexpected type");
                    return None;
                }
            },
            _ => {
                log::warn!("offscreen canvas refused a 2d context; background stays dark");
                return None;
            }
        };
        if ctx.scale(pixel_ratio as f64, pixel_ratio as f64).is_err() {
            log::warn!("pixel-ratio scale rejected; rendering unscaled");
        }

        Some(Self { ctx, width, height })
    }
}

fn css(color: Hsla) -> String {
    format!(
        "hsla({:.0}, {:.0}%, {:.0}%, {:.3})",
        color.hue, color.saturation, color.lightness, color.alpha
    )
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Hsla) {
        let gradient = match self.ctx.create_radial_gradient(
            center.x as f64,
            center.y as f64,
            0.0,
            center.x as f64,
            center.y as f64,
            radius as f64,
        ) {
            Ok(g) => g,
            Err(_) => return,
        };
        let _ = gradient.add_color_stop(0.0, &css(color));
        let _ = gradient.add_color_stop(1.0, &css(color.with_alpha(0.0)));
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Hsla) {
        if points.len() < 2 {
            return;
        }
        self.ctx.set_stroke_style_str(&css(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(points[0].x as f64, points[0].y as f64);
        for p in &points[1..] {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }
}
