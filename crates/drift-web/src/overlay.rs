use drift_engine::PoemOverlay;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Element ids the host page provides. Missing elements are skipped.
pub const SCENE_NAME_ID: &str = "sceneName";
pub const POEM_TEXT_ID: &str = "poemText";

/// DOM text on top of the canvas: the scene name in the nav bar and the
/// fading poem lines.
pub struct Overlay {
    scene_name: Option<HtmlElement>,
    poem: Option<HtmlElement>,
    shown_name: String,
    shown_poem: String,
}

impl Overlay {
    pub fn attach(document: &Document) -> Self {
        let find = |id: &str| {
            let el = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if el.is_none() {
                log::warn!("overlay element #{} not found", id);
            }
            el
        };
        Self {
            scene_name: find(SCENE_NAME_ID),
            poem: find(POEM_TEXT_ID),
            shown_name: String::new(),
            shown_poem: String::new(),
        }
    }

    /// Sync the DOM with the frame. Text nodes are only touched on change.
    pub fn update(&mut self, scene_name: &str, poem: &PoemOverlay) {
        if let Some(el) = &self.scene_name {
            if self.shown_name != scene_name {
                el.set_text_content(Some(scene_name));
                self.shown_name = scene_name.to_string();
            }
        }

        if let Some(el) = &self.poem {
            let text = poem.text();
            if self.shown_poem != text {
                el.set_inner_text(&text);
                self.shown_poem = text;
            }
            let _ = el.style().set_property("opacity", &format!("{:.3}", poem.opacity));
        }
    }
}
