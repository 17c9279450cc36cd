pub mod api;
pub mod assets;
pub mod core;
pub mod input;
pub mod poem;
pub mod render;
pub mod scenes;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::display::{AudioCue, Display, FrameOutput};
pub use api::scene::{DisplayConfig, Scene, SceneContext};
pub use assets::manifest::{AssetManifest, FishSprite};
pub use assets::registry::{AssetKey, AssetRegistry, MediaKind};
pub use core::registry::{SceneDescriptor, SceneKind};
pub use core::time::{Clock, FixedTimestep};
pub use input::queue::{InputEvent, InputQueue};
pub use poem::{
    CustomPoems, FadePhase, FadeTimings, MemoryStore, PoemError, PoemOverlay, PoemRotation,
    PoemStore, StoreError,
};
pub use render::{Blend, Color, ColorStop, DisplayList, DrawCommand, LineCap, Paint, Stroke};
pub use scenes::SceneSet;
pub use systems::rng::Rng;
