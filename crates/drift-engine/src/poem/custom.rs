//! User-authored poem overrides, one per scene.
//!
//! Stored as raw text under `customPoem_scene_<index>`; cached in memory as
//! trimmed non-blank lines. A poem counts as enabled only with at least two
//! such lines.

use thiserror::Error;

use crate::core::registry::SceneKind;
use super::split_lines;
use super::store::{PoemStore, StoreError};

/// Key prefix for persisted poems.
pub const KEY_PREFIX: &str = "customPoem_scene_";

/// Minimum number of non-blank lines for a poem to be accepted.
pub const MIN_LINES: usize = 2;

/// Storage key for a scene's custom poem.
pub fn storage_key(scene: SceneKind) -> String {
    format!("{}{}", KEY_PREFIX, scene.index())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoemError {
    #[error("a poem needs at least two non-empty lines (found {found})")]
    TooFewLines { found: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq)]
struct CustomPoem {
    raw: String,
    lines: Vec<String>,
}

impl CustomPoem {
    fn parse(raw: &str) -> Result<Self, PoemError> {
        let lines = split_lines(raw);
        if lines.len() < MIN_LINES {
            return Err(PoemError::TooFewLines { found: lines.len() });
        }
        Ok(Self {
            raw: raw.to_string(),
            lines,
        })
    }
}

/// Per-scene cache of custom poems mirroring the store.
#[derive(Debug, Clone, Default)]
pub struct CustomPoems {
    slots: [Option<CustomPoem>; SceneKind::COUNT],
}

impl CustomPoems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every scene's poem from the store. Unreadable or too-short
    /// entries are treated as absent.
    pub fn load(store: &dyn PoemStore) -> Self {
        let mut poems = Self::new();
        for scene in SceneKind::ALL {
            let key = storage_key(scene);
            match store.get(&key) {
                Ok(Some(raw)) => match CustomPoem::parse(&raw) {
                    Ok(poem) => poems.slots[scene.index()] = Some(poem),
                    Err(e) => log::warn!("ignoring stored poem `{}`: {}", key, e),
                },
                Ok(None) => {}
                Err(e) => log::warn!("could not read `{}`: {}", key, e),
            }
        }
        poems
    }

    /// Whether a scene has an enabled override.
    pub fn is_enabled(&self, scene: SceneKind) -> bool {
        self.slots[scene.index()].is_some()
    }

    /// Override lines for a scene, if enabled.
    pub fn lines(&self, scene: SceneKind) -> Option<&[String]> {
        self.slots[scene.index()].as_ref().map(|p| p.lines.as_slice())
    }

    /// Raw text as the user typed it, if enabled.
    pub fn raw(&self, scene: SceneKind) -> Option<&str> {
        self.slots[scene.index()].as_ref().map(|p| p.raw.as_str())
    }

    /// Validate and persist a poem. Nothing changes when validation or the write fails.
    pub fn save(
        &mut self,
        store: &mut dyn PoemStore,
        scene: SceneKind,
        text: &str,
    ) -> Result<(), PoemError> {
        let poem = CustomPoem::parse(text)?;
        store.set(&storage_key(scene), text)?;
        self.slots[scene.index()] = Some(poem);
        Ok(())
    }

    /// Remove a scene's override from the store and the cache.
    pub fn reset(&mut self, store: &mut dyn PoemStore, scene: SceneKind) -> Result<(), PoemError> {
        store.remove(&storage_key(scene))?;
        self.slots[scene.index()] = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poem::store::MemoryStore;

    #[test]
    fn key_format() {
        assert_eq!(storage_key(SceneKind::Rain), "customPoem_scene_0");
        assert_eq!(storage_key(SceneKind::Waves), "customPoem_scene_3");
    }

    #[test]
    fn single_line_is_rejected_without_writing() {
        let mut store = MemoryStore::new();
        let mut poems = CustomPoems::new();
        let err = poems.save(&mut store, SceneKind::Rain, "  only one  \n\n   \n").unwrap_err();
        assert_eq!(err, PoemError::TooFewLines { found: 1 });
        assert!(store.is_empty());
        assert!(!poems.is_enabled(SceneKind::Rain));
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut store = MemoryStore::new();
        let mut poems = CustomPoems::new();
        assert_eq!(
            poems.save(&mut store, SceneKind::River, "").unwrap_err(),
            PoemError::TooFewLines { found: 0 }
        );
    }

    #[test]
    fn save_trims_lines_and_keeps_raw_text() {
        let mut store = MemoryStore::new();
        let mut poems = CustomPoems::new();
        let text = "  first line \n\n second line\n";
        poems.save(&mut store, SceneKind::Ocean, text).unwrap();
        assert!(poems.is_enabled(SceneKind::Ocean));
        assert_eq!(
            poems.lines(SceneKind::Ocean).unwrap(),
            &["first line".to_string(), "second line".to_string()]
        );
        assert_eq!(poems.raw(SceneKind::Ocean), Some(text));
        assert_eq!(store.get("customPoem_scene_2").unwrap().as_deref(), Some(text));
    }

    #[test]
    fn load_skips_short_entries() {
        let mut store = MemoryStore::new();
        store.set("customPoem_scene_0", "just one").unwrap();
        store.set("customPoem_scene_1", "a\nb").unwrap();
        let poems = CustomPoems::load(&store);
        assert!(!poems.is_enabled(SceneKind::Rain));
        assert!(poems.is_enabled(SceneKind::River));
    }

    #[test]
    fn reset_removes_entry() {
        let mut store = MemoryStore::new();
        let mut poems = CustomPoems::new();
        poems.save(&mut store, SceneKind::Waves, "a\nb\nc").unwrap();
        poems.reset(&mut store, SceneKind::Waves).unwrap();
        assert!(!poems.is_enabled(SceneKind::Waves));
        assert!(store.is_empty());
    }

    struct BrokenStore;

    impl PoemStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected { key: key.to_string(), reason: "quota".to_string() })
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn failed_write_leaves_cache_untouched() {
        let mut poems = CustomPoems::load(&BrokenStore);
        let err = poems.save(&mut BrokenStore, SceneKind::Rain, "a\nb").unwrap_err();
        assert!(matches!(err, PoemError::Store(StoreError::Rejected { .. })));
        assert!(!poems.is_enabled(SceneKind::Rain));
    }
}
