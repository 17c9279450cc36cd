pub mod canvas;
pub mod media;
pub mod overlay;
pub mod runner;
pub mod storage;

pub use runner::DisplayRunner;

use std::cell::RefCell;

use drift_engine::{AssetManifest, DisplayConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<DisplayRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Calls made before `drift_init` are dropped.
fn with_runner<R>(f: impl FnOnce(&mut DisplayRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("display not initialized; call drift_init() first");
                None
            }
        }
    })
}

fn start(canvas_id: &str, config: DisplayConfig, manifest: AssetManifest) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = DisplayRunner::new(canvas_id, config, manifest)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("drift: initialized on #{}", canvas_id);
    Ok(())
}

/// Attach the display to the canvas with the given id, using built-in settings.
#[wasm_bindgen]
pub fn drift_init(canvas_id: &str) -> Result<(), JsValue> {
    start(canvas_id, DisplayConfig::default(), AssetManifest::default())
}

/// Like `drift_init`, with JSON overrides for the config and asset manifest.
/// Empty strings keep the defaults.
#[wasm_bindgen]
pub fn drift_init_with(canvas_id: &str, config_json: &str, manifest_json: &str) -> Result<(), JsValue> {
    let config = if config_json.trim().is_empty() {
        DisplayConfig::default()
    } else {
        DisplayConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let manifest = if manifest_json.trim().is_empty() {
        AssetManifest::default()
    } else {
        AssetManifest::from_json(manifest_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    start(canvas_id, config, manifest)
}

/// Advance and paint one frame. `now_ms` is the requestAnimationFrame timestamp.
#[wasm_bindgen]
pub fn drift_frame(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

/// The window was resized; the canvas fills it below the nav bar.
#[wasm_bindgen]
pub fn drift_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn drift_next_scene() {
    with_runner(|r| r.next_scene());
}

#[wasm_bindgen]
pub fn drift_prev_scene() {
    with_runner(|r| r.prev_scene());
}

/// A click on the canvas, in canvas pixels.
#[wasm_bindgen]
pub fn drift_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

/// First user gesture on the page; unlocks background audio.
#[wasm_bindgen]
pub fn drift_user_interacted() {
    with_runner(|r| r.user_interacted());
}

/// Text to prefill the poem editor for the active scene.
#[wasm_bindgen]
pub fn drift_poem_text() -> String {
    with_runner(|r| r.poem_text()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn drift_save_poem(text: &str) -> bool {
    with_runner(|r| r.save_poem(text)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn drift_reset_poem() -> bool {
    with_runner(|r| r.reset_poem()).unwrap_or(false)
}
