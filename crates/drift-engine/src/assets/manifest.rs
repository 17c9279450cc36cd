use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::assets::registry::{AssetKey, MediaKind};
use crate::core::registry::SceneKind;

/// Asset manifest describing every image, video and audio track the display uses.
/// Built-in defaults match the shipped asset tree; a host may override any
/// field by loading a JSON manifest at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Car sprites for the rain scene's traffic.
    pub cars: Vec<String>,
    /// Fish sprites for the ocean scene.
    pub fish: Vec<FishSprite>,
    /// Optional city skyline replacing the procedural buildings.
    pub city: String,
    /// Mountain backdrop behind the river.
    pub mountain: String,
    /// Grass strip in the river foreground.
    pub grass: String,
    /// Floating wood drifting down the river.
    pub wood: String,
    /// Looping underwater clip.
    pub ocean_video: String,
    /// Looping shoreline clip.
    pub waves_video: String,
    /// Per-scene audio overrides. Scenes without an entry keep their built-in track.
    pub audio: HashMap<SceneKind, String>,
}

/// A fish sprite and the direction its artwork faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishSprite {
    /// Relative path to the image file.
    pub path: String,
    /// 1 when the artwork faces right, -1 when it faces left.
    #[serde(default = "default_facing")]
    pub facing: i8,
}

fn default_facing() -> i8 {
    1
}

impl Default for AssetManifest {
    fn default() -> Self {
        let fish = |path: &str, facing: i8| FishSprite { path: path.to_string(), facing };
        Self {
            cars: vec![
                "assets/cars/BlueCarR.png".to_string(),
                "assets/cars/GreenCarNew.png".to_string(),
                "assets/cars/TruckNewB.png".to_string(),
                "assets/cars/CabNewB.png".to_string(),
            ],
            fish: vec![
                fish("images/fish.png", 1),
                fish("images/fish2.png", -1),
                fish("images/fish3.png", -1),
                fish("images/fish5.png", -1),
            ],
            city: "images/city.png".to_string(),
            mountain: "images/mountain.png".to_string(),
            grass: "images/grass.png".to_string(),
            wood: "images/wood.png".to_string(),
            ocean_video: "images/ocean.mp4".to_string(),
            waves_video: "images/waves.mp4".to_string(),
            audio: HashMap::new(),
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Every loadable visual asset with its path and media kind, in load order.
    pub fn entries(&self) -> Vec<(AssetKey, &str, MediaKind)> {
        let mut out = Vec::with_capacity(self.cars.len() + self.fish.len() + 6);
        for (i, path) in self.cars.iter().enumerate() {
            let Ok(index) = u8::try_from(i) else {
                log::warn!("manifest lists {} car sprites; only the first 256 are loaded", self.cars.len());
                break;
            };
            out.push((AssetKey::Car(index), path.as_str(), MediaKind::Image));
        }
        for (i, sprite) in self.fish.iter().enumerate() {
            let Ok(index) = u8::try_from(i) else {
                log::warn!("manifest lists {} fish sprites; only the first 256 are loaded", self.fish.len());
                break;
            };
            out.push((AssetKey::Fish(index), sprite.path.as_str(), MediaKind::Image));
        }
        out.push((AssetKey::CitySkyline, self.city.as_str(), MediaKind::Image));
        out.push((AssetKey::Mountain, self.mountain.as_str(), MediaKind::Image));
        out.push((AssetKey::Grass, self.grass.as_str(), MediaKind::Image));
        out.push((AssetKey::Wood, self.wood.as_str(), MediaKind::Image));
        out.push((AssetKey::OceanVideo, self.ocean_video.as_str(), MediaKind::Video));
        out.push((AssetKey::WavesVideo, self.waves_video.as_str(), MediaKind::Video));
        // Empty paths opt an asset out; draw routines fall back as if it never loaded.
        out.retain(|(_, path, _)| !path.is_empty());
        out
    }

    /// Native facing of a fish sprite (1 = right). Unknown indices face right.
    pub fn fish_facing(&self, index: u8) -> f32 {
        match self.fish.get(index as usize) {
            Some(sprite) if sprite.facing < 0 => -1.0,
            _ => 1.0,
        }
    }

    /// Audio override for a scene, if any.
    pub fn audio_for(&self, scene: SceneKind) -> Option<&str> {
        self.audio.get(&scene).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_media() {
        let manifest = AssetManifest::default();
        let entries = manifest.entries();
        assert_eq!(entries.len(), 4 + 4 + 6);
        let videos = entries.iter().filter(|(_, _, kind)| *kind == MediaKind::Video).count();
        assert_eq!(videos, 2);
    }

    #[test]
    fn parse_partial_manifest_keeps_defaults() {
        let json = r#"{
            "cars": ["cars/a.png"],
            "fish": [ { "path": "fish/left.png", "facing": -1 }, { "path": "fish/right.png" } ],
            "audio": { "Rain": "audio/storm.ogg" }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.cars, vec!["cars/a.png".to_string()]);
        assert_eq!(manifest.fish_facing(0), -1.0);
        assert_eq!(manifest.fish_facing(1), 1.0);
        assert_eq!(manifest.audio_for(SceneKind::Rain), Some("audio/storm.ogg"));
        assert_eq!(manifest.audio_for(SceneKind::River), None);
        assert_eq!(manifest.ocean_video, "images/ocean.mp4");
    }

    #[test]
    fn empty_paths_are_not_loaded() {
        let manifest = AssetManifest {
            city: String::new(),
            ..AssetManifest::default()
        };
        assert!(manifest
            .entries()
            .iter()
            .all(|(key, _, _)| *key != AssetKey::CitySkyline));
    }

    #[test]
    fn sprite_lists_past_the_key_range_are_cut_at_256() {
        let manifest = AssetManifest {
            cars: (0..300).map(|i| format!("cars/{}.png", i)).collect(),
            ..AssetManifest::default()
        };
        let cars: Vec<AssetKey> = manifest
            .entries()
            .into_iter()
            .filter_map(|(key, _, _)| matches!(key, AssetKey::Car(_)).then_some(key))
            .collect();
        assert_eq!(cars.len(), 256);
        assert_eq!(cars.first(), Some(&AssetKey::Car(0)));
        assert_eq!(cars.last(), Some(&AssetKey::Car(255)));
        let unique: std::collections::HashSet<_> = cars.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(AssetManifest::from_json("{ not json").is_err());
    }
}
