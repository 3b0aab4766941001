use glam::Vec2;

use crate::core::lut::{fast_cos, fast_sin};

/// Discretized flow field over the viewport.
///
/// One unit direction vector per cell, regenerated every frame from a
/// procedural function of grid coordinates and the frame counter. No
/// history is kept between frames.
pub struct FlowField {
    cols: usize,
    rows: usize,
    resolution: f32,
    vectors: Vec<Vec2>,
}

impl FlowField {
    /// Allocate the grid for a viewport. Dimensions floor to the cell
    /// size, never below 1×1.
    pub fn new(width: f32, height: f32, resolution: f32) -> Self {
        let cols = ((width / resolution) as usize).max(1);
        let rows = ((height / resolution) as usize).max(1);
        Self {
            cols,
            rows,
            resolution,
            vectors: vec![Vec2::ZERO; cols * rows],
        }
    }

    /// Recompute every cell for the given frame value.
    ///
    /// Two drifting sinusoids over the grid axes sum into a swirl angle;
    /// the cell stores the unit vector of that angle. O(cells).
    pub fn regenerate(&mut self, frame: f32, speed: f32) {
        let t = frame * speed;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let swirl =
                    fast_sin(col as f32 * 0.3 + t) + fast_cos(row as f32 * 0.3 + t * 0.8);
                let angle = swirl * std::f32::consts::PI;
                self.vectors[row * self.cols + col] = Vec2::new(fast_cos(angle), fast_sin(angle));
            }
        }
    }

    /// Direction of the cell containing `pos`, or None outside the grid.
    pub fn sample(&self, pos: Vec2) -> Option<Vec2> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x / self.resolution) as usize;
        let row = (pos.y / self.resolution) as usize;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.vectors[row * self.cols + col])
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }
}
