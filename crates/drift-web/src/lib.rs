//! wasm-bindgen exports for the rendering worker.
//!
//! The worker's JS shim forwards host messages to these free functions
//! and drives `engine_frame` from requestAnimationFrame. One runner per
//! worker, held in thread-local storage (wasm-bindgen cannot export
//! stateful structs with lifetimes, and the worker is single-threaded
//! anyway).

pub mod canvas;
pub mod runner;

pub use runner::EngineRunner;

use std::cell::RefCell;

use drift_engine::{ControlEvent, EngineConfig, FlowFieldEngine};
use wasm_bindgen::prelude::*;
use web_sys::OffscreenCanvas;

use canvas::CanvasSurface;

thread_local! {
    static RUNNER: RefCell<Option<EngineRunner>> = RefCell::new(None);
    static PENDING_CONFIG: RefCell<EngineConfig> = RefCell::new(EngineConfig::default());
}

/// Run `f` against the runner, if initialization ever succeeded.
/// The background is decorative: with no runner, every control message
/// is a silent no-op.
fn with_runner(f: impl FnOnce(&mut EngineRunner)) {
    RUNNER.with(|cell| {
        if let Some(runner) = cell.borrow_mut().as_mut() {
            f(runner);
        }
    });
}

/// Override tunables with a JSON document. Call before `engine_init`;
/// missing fields keep their defaults, malformed JSON is ignored.
#[wasm_bindgen]
pub fn engine_load_config(json: &str) {
    match EngineConfig::from_json(json) {
        Ok(config) => PENDING_CONFIG.with(|cell| *cell.borrow_mut() = config),
        Err(err) => log::warn!("config override ignored: {err}"),
    }
}

/// One-time setup: adopt the offscreen canvas and build the engine.
/// If the 2D context cannot be acquired the worker stays inert — the
/// host application must never be blocked by a missing background.
#[wasm_bindgen]
pub fn engine_init(canvas: OffscreenCanvas, width: f32, height: f32, pixel_ratio: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let surface = match CanvasSurface::new(&canvas, width, height, pixel_ratio) {
        Some(surface) => surface,
        None => return,
    };

    let config = PENDING_CONFIG.with(|cell| cell.borrow().clone());
    let seed = js_sys::Date::now() as u64;
    let engine = FlowFieldEngine::new(width, height, config, seed);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(EngineRunner::new(engine, surface));
    });
    log::info!("driftfield: initialized at {width}x{height}@{pixel_ratio}x");
}

/// Advance one frame. The worker's rAF shim calls this once per display
/// refresh; one call is one unit of simulated time.
#[wasm_bindgen]
pub fn engine_frame() {
    with_runner(|r| r.frame());
}

/// Raw wheel delta from the host page. Accumulated into the shared
/// impulse and consumed on the next frame.
#[wasm_bindgen]
pub fn engine_scroll(delta_y: f32) {
    with_runner(|r| r.push(ControlEvent::Scroll { delta_y }));
}

/// Fire the one-shot radial explosion.
#[wasm_bindgen]
pub fn engine_explode() {
    with_runner(|r| r.push(ControlEvent::Explode));
}

/// Stop simulating and release the canvas. Subsequent calls are no-ops
/// until the next `engine_init`.
#[wasm_bindgen]
pub fn engine_teardown() {
    RUNNER.with(|cell| *cell.borrow_mut() = None);
}

/// Current particle count, for debug overlays.
#[wasm_bindgen]
pub fn engine_population() -> u32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|r| r.population() as u32)
            .unwrap_or(0)
    })
}
