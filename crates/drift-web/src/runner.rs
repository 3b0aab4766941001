use drift_engine::{ControlEvent, ControlQueue, FlowFieldEngine};

use crate::canvas::CanvasSurface;

/// Bridges worker messages to the engine.
///
/// Owns the engine, the control queue, and the canvas surface. Control
/// messages land in the queue whenever the worker receives them; the
/// next `frame` call applies them at the frame boundary before ticking.
pub struct EngineRunner {
    engine: FlowFieldEngine,
    queue: ControlQueue,
    surface: CanvasSurface,
}

impl EngineRunner {
    pub fn new(engine: FlowFieldEngine, surface: CanvasSurface) -> Self {
        Self {
            engine,
            queue: ControlQueue::new(),
            surface,
        }
    }

    /// Queue a control event for the next frame boundary.
    pub fn push(&mut self, event: ControlEvent) {
        self.queue.push(event);
    }

    /// One display-refresh callback: apply queued control messages,
    /// then run one simulation+render step to completion.
    pub fn frame(&mut self) {
        for event in self.queue.drain() {
            match event {
                ControlEvent::Scroll { delta_y } => self.engine.add_scroll_impulse(delta_y),
                ControlEvent::Explode => self.engine.explode(),
            }
        }
        self.engine.tick(&mut self.surface);
    }

    pub fn population(&self) -> usize {
        self.engine.population()
    }
}
