use drift_engine::{AssetManifest, Display, DisplayConfig, InputEvent, PoemError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, Window};

use crate::canvas::CanvasPainter;
use crate::media::MediaLibrary;
use crate::overlay::Overlay;
use crate::storage::LocalStorageStore;

/// Browser runner that wires the display to a canvas, media elements,
/// `localStorage` and the DOM overlay.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps one runner
/// in a `thread_local!` and exposes free functions.
pub struct DisplayRunner {
    display: Display<LocalStorageStore>,
    painter: CanvasPainter,
    media: MediaLibrary,
    overlay: Overlay,
    window: Window,
}

impl DisplayRunner {
    pub fn new(canvas_id: &str, mut config: DisplayConfig, manifest: AssetManifest) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas #{} not found", canvas_id)))?
            .dyn_into()?;

        let painter = CanvasPainter::new(canvas)?;
        let media = MediaLibrary::load(&document, &manifest);
        let overlay = Overlay::attach(&document);
        let (w, h) = window_size(&window);
        let (width, height) = canvas_size(w, h, config.nav_height);
        config.width = width;
        config.height = height;
        let seed = js_sys::Date::now() as u64;
        let display = Display::new(config, manifest, LocalStorageStore::new(), seed);

        let mut runner = Self {
            display,
            painter,
            media,
            overlay,
            window,
        };
        runner.resize(w, h);
        Ok(runner)
    }

    /// Fit the canvas to a window of the given size, leaving room for the nav bar.
    pub fn resize(&mut self, window_width: f32, window_height: f32) {
        let (width, height) = canvas_size(window_width, window_height, self.display.config().nav_height);
        self.painter.resize(width as u32, height as u32);
        self.display.resize(width, height);
    }

    /// One animation frame: pick up loaded media, step, paint, sync the DOM.
    pub fn tick(&mut self, now_ms: f64) {
        for (key, w, h) in self.media.poll_ready() {
            self.display.mark_asset_ready(key, w, h);
        }

        let frame = self.display.frame(now_ms);
        if let Err(e) = self.painter.paint(frame.display_list, &self.media) {
            log::warn!("paint failed: {:?}", e);
        }
        self.overlay.update(frame.scene_name, frame.poem);
        if let Some(cue) = frame.audio {
            self.media.play_track(&cue.path);
        }
    }

    pub fn next_scene(&mut self) {
        self.display.next_scene();
    }

    pub fn prev_scene(&mut self) {
        self.display.prev_scene();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.display.push_input(event);
    }

    pub fn user_interacted(&mut self) {
        self.display.notify_interaction();
    }

    pub fn poem_text(&self) -> String {
        self.display.poem_text()
    }

    /// Save the editor text for the active scene and tell the user how it went.
    pub fn save_poem(&mut self, text: &str) -> bool {
        let result = self.display.save_poem(text);
        let message = match &result {
            Ok(()) => format!("Poem saved for {}.", self.display.scene_name()),
            Err(PoemError::TooFewLines { .. }) => "Please enter at least two lines.".to_string(),
            Err(e) => {
                log::warn!("saving poem failed: {}", e);
                format!("Could not save the poem: {}", e)
            }
        };
        self.alert(&message);
        result.is_ok()
    }

    pub fn reset_poem(&mut self) -> bool {
        let result = self.display.reset_poem();
        let message = match &result {
            Ok(()) => format!("Poem for {} reset to default.", self.display.scene_name()),
            Err(e) => {
                log::warn!("resetting poem failed: {}", e);
                format!("Could not reset the poem: {}", e)
            }
        };
        self.alert(&message);
        result.is_ok()
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

fn window_size(window: &Window) -> (f32, f32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Canvas size for a window: full width, height minus the nav bar.
fn canvas_size(window_width: f32, window_height: f32, nav_height: f32) -> (f32, f32) {
    (window_width.max(1.0), (window_height - nav_height).max(1.0))
}
