use std::collections::HashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifies one visual asset. Indices point into the manifest's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    Car(u8),
    Fish(u8),
    CitySkyline,
    Mountain,
    Grass,
    Wood,
    OceanVideo,
    WavesVideo,
}

/// How the host should load an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Readiness and natural size of a loaded asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetStatus {
    pub size: Vec2,
}

/// Readiness flags for fire-and-forget asset loads.
/// The host marks assets ready as their load callbacks fire; draw routines
/// poll it every frame and substitute a fallback until then.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    ready: HashMap<AssetKey, AssetStatus>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an asset finished loading with the given natural size.
    /// Returns true the first time a key becomes ready.
    pub fn mark_ready(&mut self, key: AssetKey, width: f32, height: f32) -> bool {
        let first = !self.ready.contains_key(&key);
        self.ready.insert(key, AssetStatus { size: Vec2::new(width, height) });
        if first {
            log::debug!("asset ready: {:?} ({}x{})", key, width, height);
        }
        first
    }

    pub fn is_ready(&self, key: AssetKey) -> bool {
        self.ready.contains_key(&key)
    }

    /// Natural size of a ready asset.
    pub fn size(&self, key: AssetKey) -> Option<Vec2> {
        self.ready.get(&key).map(|status| status.size)
    }

    /// Number of ready assets.
    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }
}
