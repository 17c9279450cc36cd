//! Poem text: built-in defaults, user overrides and the rotating overlay.

pub mod custom;
pub mod rotation;
pub mod store;

pub use custom::{CustomPoems, PoemError, storage_key};
pub use rotation::{FadePhase, FadeTimings, PoemRotation};
pub use store::{MemoryStore, PoemStore, StoreError};

use crate::core::registry::SceneKind;

/// Shown in the ocean scene when no custom poem is saved for it.
pub const UNDERWATER_POEM: &str = "Beneath the quiet blue,\n\
silver thoughts swim slow.\n\
Light falls in ribbons,\n\
and the deep remembers.";

/// Split text into trimmed, non-blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Built-in poem text for a scene.
pub fn default_poem(scene: SceneKind) -> &'static str {
    match scene {
        SceneKind::Ocean => UNDERWATER_POEM,
        other => other.descriptor().poem,
    }
}

/// Lines the overlay rotates through for a scene: the custom override when
/// one is enabled, otherwise the built-in poem.
pub fn current_poem_lines(scene: SceneKind, custom: &CustomPoems) -> Vec<&str> {
    match custom.lines(scene) {
        Some(lines) => lines.iter().map(String::as_str).collect(),
        None => default_poem(scene).lines().collect(),
    }
}

/// What the host shows on top of the canvas this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoemOverlay {
    pub lines: Vec<String>,
    pub opacity: f32,
}

impl PoemOverlay {
    /// Lines joined with newlines, for hosts that render with `white-space: pre-line`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
