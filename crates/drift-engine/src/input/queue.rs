/// Control messages the host can send while the engine runs.
/// Coarse by design — the host never steers individual particles.
#[derive(Debug, Clone, Copy)]
pub enum ControlEvent {
    /// Raw wheel delta from the host page.
    Scroll { delta_y: f32 },
    /// One-shot radial explosion trigger.
    Explode,
}

/// A queue of control events.
/// The host writes events into the queue; the runner drains them at the
/// next frame boundary. Both message kinds reduce to a numeric
/// accumulation or an immediate velocity kick, so a message landing
/// mid-frame is harmless.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    /// Push a new control event (called from the host side).
    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = ControlQueue::new();
        q.push(ControlEvent::Scroll { delta_y: 120.0 });
        q.push(ControlEvent::Explode);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn scroll_carries_delta() {
        let mut q = ControlQueue::new();
        q.push(ControlEvent::Scroll { delta_y: -53.5 });
        match q.drain()[0] {
            ControlEvent::Scroll { delta_y } => assert_eq!(delta_y, -53.5),
            _ => panic!("expected Scroll event"),
        }
    }
}
