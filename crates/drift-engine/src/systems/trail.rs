use glam::Vec2;

/// One remembered position with its own decaying opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub alpha: f32,
}

/// Fixed-capacity ring buffer of a particle's recent positions.
///
/// Newest entry first; pushing past capacity overwrites the oldest.
/// Allocates once at construction — the per-frame push is an index
/// rotation, not a shift.
#[derive(Debug, Clone)]
pub struct Trail {
    points: Vec<TrailPoint>,
    head: usize,
    len: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: vec![TrailPoint { pos: Vec2::ZERO, alpha: 0.0 }; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    /// Record the newest position at full opacity, evicting the oldest
    /// entry once over capacity.
    pub fn push(&mut self, pos: Vec2) {
        let cap = self.points.len();
        self.head = (self.head + cap - 1) % cap;
        self.points[self.head] = TrailPoint { pos, alpha: 1.0 };
        if self.len < cap {
            self.len += 1;
        }
    }

    /// Multiply every entry's opacity by `factor`.
    pub fn decay(&mut self, factor: f32) {
        let cap = self.points.len();
        for i in 0..self.len {
            self.points[(self.head + i) % cap].alpha *= factor;
        }
    }

    /// Iterate entries newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        let cap = self.points.len();
        (0..self.len).map(move |i| &self.points[(self.head + i) % cap])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(trail: &Trail) -> Vec<Vec2> {
        trail.iter().map(|p| p.pos).collect()
    }

    #[test]
    fn newest_first_order() {
        let mut trail = Trail::with_capacity(4);
        trail.push(Vec2::new(1.0, 0.0));
        trail.push(Vec2::new(2.0, 0.0));
        trail.push(Vec2::new(3.0, 0.0));
        assert_eq!(
            positions(&trail),
            vec![Vec2::new(3.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(1.0, 0.0)]
        );
    }

    #[test]
    fn push_past_capacity_evicts_oldest() {
        let mut trail = Trail::with_capacity(3);
        for i in 1..=5 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(
            positions(&trail),
            vec![Vec2::new(5.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(3.0, 0.0)]
        );
    }

    #[test]
    fn decay_scales_every_alpha() {
        let mut trail = Trail::with_capacity(3);
        trail.push(Vec2::ZERO);
        trail.decay(0.5);
        trail.push(Vec2::ONE);
        trail.decay(0.5);
        let alphas: Vec<f32> = trail.iter().map(|p| p.alpha).collect();
        assert_eq!(alphas, vec![0.5, 0.25]);
    }

    #[test]
    fn zero_capacity_clamps_to_one() {
        let mut trail = Trail::with_capacity(0);
        trail.push(Vec2::ONE);
        trail.push(Vec2::ZERO);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.capacity(), 1);
    }
}
