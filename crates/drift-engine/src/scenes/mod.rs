pub mod city;
pub mod ocean;
pub mod rain;
pub mod river;
pub mod traffic;
pub mod waves;

pub use ocean::OceanScene;
pub use rain::RainScene;
pub use river::RiverScene;
pub use waves::WavesScene;

use crate::api::scene::Scene;
use crate::core::registry::SceneKind;

/// One instance of every scene. Particle state persists while a scene is
/// inactive; `setup` decides what is reseeded on each visit.
#[derive(Debug, Default)]
pub struct SceneSet {
    pub rain: RainScene,
    pub river: RiverScene,
    pub ocean: OceanScene,
    pub waves: WavesScene,
}

impl SceneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_mut(&mut self, kind: SceneKind) -> &mut dyn Scene {
        match kind {
            SceneKind::Rain => &mut self.rain,
            SceneKind::River => &mut self.river,
            SceneKind::Ocean => &mut self.ocean,
            SceneKind::Waves => &mut self.waves,
        }
    }
}
