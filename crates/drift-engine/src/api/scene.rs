use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::manifest::AssetManifest;
use crate::assets::registry::AssetRegistry;
use crate::poem::rotation::FadeTimings;
use crate::render::display_list::DisplayList;
use crate::systems::rng::Rng;

/// Display configuration. Every field has a default; a host may override
/// any subset from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial surface width in pixels.
    pub width: f32,
    /// Initial surface height in pixels.
    pub height: f32,
    /// Height of the navigation bar the canvas sits under.
    pub nav_height: f32,
    /// Reference frame length in milliseconds. Particle speeds are per reference frame.
    pub frame_ms: f64,
    /// Poem fade/display durations.
    pub poem: FadeTimings,
    /// Rain drops in the rain scene.
    pub rain_drops: usize,
    /// Drifting clouds above the city.
    pub clouds: usize,
    /// Procedural buildings in the skyline.
    pub buildings: usize,
    /// Fish kept in the ocean scene.
    pub fish: usize,
    /// Shortest gap between car spawns.
    pub car_spawn_min_ms: f64,
    /// Longest gap between car spawns.
    pub car_spawn_max_ms: f64,
    /// Gap between floating-wood spawns on the river.
    pub debris_interval_ms: f64,
    /// Cap on floating wood pieces.
    pub max_debris: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            nav_height: 60.0,
            frame_ms: 1000.0 / 60.0,
            poem: FadeTimings::default(),
            rain_drops: 400,
            clouds: 25,
            buildings: 10,
            fish: 10,
            car_spawn_min_ms: 2500.0,
            car_spawn_max_ms: 4500.0,
            debris_interval_ms: 3000.0,
            max_debris: 6,
        }
    }
}

impl DisplayConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The contract every scene fulfils.
///
/// `setup` runs each time the scene becomes active; `step` advances
/// particles by one reference frame; `draw` paints the full frame.
pub trait Scene {
    /// (Re)seed particle state on activation.
    fn setup(&mut self, ctx: &mut SceneContext);

    /// Advance motion by one reference frame.
    fn step(&mut self, _ctx: &mut SceneContext) {}

    /// Paint the frame: clear, background, particles.
    fn draw(&mut self, ctx: &mut SceneContext, list: &mut DisplayList);

    /// Handle a click at canvas coordinates. Returns true when consumed.
    fn pointer_down(&mut self, _ctx: &mut SceneContext, _pos: Vec2) -> bool {
        false
    }
}

/// Shared state handed to scenes.
pub struct SceneContext {
    /// Surface size in pixels.
    pub bounds: Vec2,
    /// Timestamp of the current frame.
    pub now_ms: f64,
    /// Milliseconds since the first frame; phase input for periodic motion.
    pub elapsed_ms: f64,
    pub rng: Rng,
    pub assets: AssetRegistry,
    pub manifest: AssetManifest,
    pub config: DisplayConfig,
}

impl SceneContext {
    pub fn new(config: DisplayConfig, manifest: AssetManifest, seed: u64) -> Self {
        Self {
            bounds: Vec2::new(config.width.max(1.0), config.height.max(1.0)),
            now_ms: 0.0,
            elapsed_ms: 0.0,
            rng: Rng::new(seed),
            assets: AssetRegistry::new(),
            manifest,
            config,
        }
    }

    pub fn width(&self) -> f32 {
        self.bounds.x
    }

    pub fn height(&self) -> f32 {
        self.bounds.y
    }

    /// Elapsed time scaled by a frequency constant, for sinusoid phases.
    pub fn phase(&self, frequency: f64) -> f32 {
        (self.elapsed_ms * frequency) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_survive_partial_json() {
        let config = DisplayConfig::from_json(r#"{ "fish": 3, "poem": { "fade_ms": 250.0, "display_ms": 2000.0 } }"#)
            .unwrap();
        assert_eq!(config.fish, 3);
        assert_eq!(config.poem.display_ms, 2000.0);
        assert_eq!(config.rain_drops, 400);
    }

    #[test]
    fn context_bounds_never_zero() {
        let config = DisplayConfig { width: 0.0, height: -5.0, ..DisplayConfig::default() };
        let ctx = SceneContext::new(config, AssetManifest::default(), 1);
        assert_eq!(ctx.bounds, Vec2::ONE);
    }
}
