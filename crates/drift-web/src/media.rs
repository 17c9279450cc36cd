//! Fire-and-forget media loading.
//!
//! Elements are created with their `src` set and then polled once per frame;
//! the first time one reports usable dimensions it is handed to the engine's
//! asset registry. Failed loads simply never become ready.

use std::collections::HashMap;

use drift_engine::{AssetKey, AssetManifest, MediaKind};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlAudioElement, HtmlImageElement, HtmlVideoElement};

/// Audio element the host page may provide; one is created otherwise.
pub const AUDIO_ELEMENT_ID: &str = "bgAudio";

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

pub struct MediaLibrary {
    images: HashMap<AssetKey, HtmlImageElement>,
    videos: HashMap<AssetKey, HtmlVideoElement>,
    pending: Vec<AssetKey>,
    audio: Option<HtmlAudioElement>,
    track: Option<String>,
}

impl MediaLibrary {
    /// Start loading every asset in the manifest.
    pub fn load(document: &Document, manifest: &AssetManifest) -> Self {
        let mut library = Self {
            images: HashMap::new(),
            videos: HashMap::new(),
            pending: Vec::new(),
            audio: document
                .get_element_by_id(AUDIO_ELEMENT_ID)
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
                .or_else(|| HtmlAudioElement::new().ok()),
            track: None,
        };

        for (key, path, kind) in manifest.entries() {
            let started = match kind {
                MediaKind::Image => load_image(path).map(|img| {
                    library.images.insert(key, img);
                }),
                MediaKind::Video => load_video(document, path).map(|video| {
                    library.videos.insert(key, video);
                }),
            };
            match started {
                Ok(()) => library.pending.push(key),
                Err(e) => log::warn!("could not start loading {}: {:?}", path, e),
            }
        }
        log::info!("loading {} media assets", library.pending.len());
        library
    }

    /// Assets that finished loading since the last poll, with natural sizes.
    pub fn poll_ready(&mut self) -> Vec<(AssetKey, f32, f32)> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let mut ready = Vec::new();
        let images = &self.images;
        let videos = &self.videos;
        self.pending.retain(|key| {
            let size = if let Some(img) = images.get(key) {
                (img.complete() && img.natural_width() > 0)
                    .then(|| (img.natural_width() as f32, img.natural_height() as f32))
            } else if let Some(video) = videos.get(key) {
                (video.ready_state() >= HAVE_CURRENT_DATA && video.video_width() > 0)
                    .then(|| (video.video_width() as f32, video.video_height() as f32))
            } else {
                None
            };
            match size {
                Some((w, h)) => {
                    ready.push((*key, w, h));
                    false
                }
                None => true,
            }
        });
        ready
    }

    pub fn image(&self, key: AssetKey) -> Option<&HtmlImageElement> {
        self.images.get(&key)
    }

    pub fn video(&self, key: AssetKey) -> Option<&HtmlVideoElement> {
        self.videos.get(&key)
    }

    /// Switch the background track and start it. Playback rejections
    /// (autoplay policy, missing file) are ignored.
    pub fn play_track(&mut self, path: &str) {
        let Some(audio) = self.audio.as_ref() else {
            return;
        };
        if self.track.as_deref() != Some(path) {
            audio.set_src(path);
            audio.set_loop(true);
            self.track = Some(path.to_string());
        }
        if let Err(e) = audio.play() {
            log::warn!("audio playback failed for {}: {:?}", path, e);
        }
    }
}

fn load_image(path: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(path);
    Ok(img)
}

fn load_video(document: &Document, path: &str) -> Result<HtmlVideoElement, JsValue> {
    let video: HtmlVideoElement = document.create_element("video")?.dyn_into()?;
    video.set_src(path);
    video.set_loop(true);
    video.set_muted(true);
    video.set_autoplay(true);
    video.set_attribute("playsinline", "")?;
    // Autoplay may be refused until a gesture; the element still loads frames.
    let _ = video.play();
    Ok(video)
}
