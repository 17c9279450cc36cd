use glam::Vec2;

use crate::api::scene::{DisplayConfig, SceneContext};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::AssetKey;
use crate::core::registry::SceneKind;
use crate::core::time::{Clock, FixedTimestep};
use crate::input::queue::{InputEvent, InputQueue};
use crate::poem::{self, CustomPoems, PoemError, PoemOverlay, PoemRotation, PoemStore};
use crate::render::DisplayList;
use crate::scenes::SceneSet;

/// Request to (re)start background audio for a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCue {
    pub scene: SceneKind,
    pub path: String,
}

/// Everything the host needs to present one frame.
#[derive(Debug)]
pub struct FrameOutput<'a> {
    pub display_list: &'a DisplayList,
    pub poem: &'a PoemOverlay,
    pub scene_name: &'static str,
    /// Set when the host should switch tracks and start playback.
    pub audio: Option<AudioCue>,
}

/// The display: one active scene, its poem overlay, and the custom-poem cache.
///
/// Platform-independent. A host feeds it frame timestamps, pointer input and
/// asset readiness, then replays the returned display list.
pub struct Display<S: PoemStore> {
    ctx: SceneContext,
    scenes: SceneSet,
    store: S,
    custom: CustomPoems,
    active: SceneKind,
    rotation: PoemRotation,
    clock: Clock,
    timestep: FixedTimestep,
    input: InputQueue,
    list: DisplayList,
    overlay: PoemOverlay,
    audio_unlocked: bool,
    pending_audio: Option<AudioCue>,
}

impl<S: PoemStore> Display<S> {
    /// Build the display, load every persisted poem and activate the first scene.
    pub fn new(config: DisplayConfig, manifest: AssetManifest, store: S, seed: u64) -> Self {
        let custom = CustomPoems::load(&store);
        let timestep = FixedTimestep::new(config.frame_ms);
        let rotation = PoemRotation::new(config.poem, 0.0);

        let mut display = Self {
            ctx: SceneContext::new(config, manifest, seed),
            scenes: SceneSet::new(),
            store,
            custom,
            active: SceneKind::default(),
            rotation,
            clock: Clock::new(),
            timestep,
            input: InputQueue::new(),
            list: DisplayList::new(),
            overlay: PoemOverlay::default(),
            audio_unlocked: false,
            pending_audio: None,
        };
        display.load_scene(SceneKind::default());
        display
    }

    /// Make `kind` the active scene and restart its poem from the first pair.
    pub fn load_scene(&mut self, kind: SceneKind) {
        self.active = kind;
        log::info!("scene {}: {}", kind.index(), kind.descriptor().name);
        self.rotation.reset(self.clock.now_ms());
        self.scenes.get_mut(kind).setup(&mut self.ctx);
        if self.audio_unlocked {
            self.queue_audio();
        }
    }

    pub fn next_scene(&mut self) {
        self.load_scene(self.active.next());
    }

    pub fn prev_scene(&mut self) {
        self.load_scene(self.active.prev());
    }

    /// Record a user gesture. The first one unlocks audio for the current scene.
    pub fn notify_interaction(&mut self) {
        if !self.audio_unlocked {
            self.audio_unlocked = true;
            self.queue_audio();
        }
    }

    fn queue_audio(&mut self) {
        let path = self
            .ctx
            .manifest
            .audio_for(self.active)
            .unwrap_or(self.active.descriptor().audio)
            .to_string();
        self.pending_audio = Some(AudioCue { scene: self.active, path });
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.bounds = Vec2::new(width.max(1.0), height.max(1.0));
        log::debug!("surface resized to {}x{}", self.ctx.bounds.x, self.ctx.bounds.y);
    }

    /// Returns true the first time an asset becomes ready.
    pub fn mark_asset_ready(&mut self, key: AssetKey, width: f32, height: f32) -> bool {
        self.ctx.assets.mark_ready(key, width, height)
    }

    /// Run one animation frame at host timestamp `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutput<'_> {
        let first = !self.clock.is_started();
        let delta = self.clock.advance(now_ms);
        if first {
            // The poem starts fading in with the first painted frame
            self.rotation.reset(now_ms);
        }
        self.ctx.now_ms = now_ms;
        self.ctx.elapsed_ms = self.clock.elapsed_ms();

        let scene = self.scenes.get_mut(self.active);
        for event in self.input.drain() {
            match event {
                InputEvent::PointerDown { .. } => {
                    scene.pointer_down(&mut self.ctx, event.position());
                }
            }
        }

        let steps = self.timestep.accumulate(delta);
        for _ in 0..steps {
            scene.step(&mut self.ctx);
        }

        self.list.clear();
        scene.draw(&mut self.ctx, &mut self.list);

        let lines = poem::current_poem_lines(self.active, &self.custom);
        self.rotation.update(now_ms, lines.len());
        self.overlay.lines = self
            .rotation
            .visible_lines(&lines)
            .iter()
            .map(|line| line.to_string())
            .collect();
        self.overlay.opacity = self.rotation.opacity();

        FrameOutput {
            display_list: &self.list,
            poem: &self.overlay,
            scene_name: self.active.descriptor().name,
            audio: self.pending_audio.take(),
        }
    }

    /// Save a custom poem for the active scene and restart its rotation.
    pub fn save_poem(&mut self, text: &str) -> Result<(), PoemError> {
        self.custom.save(&mut self.store, self.active, text)?;
        self.rotation.reset(self.clock.now_ms());
        log::info!("custom poem saved for {}", self.active.descriptor().name);
        Ok(())
    }

    /// Drop the active scene's custom poem, falling back to the built-in one.
    pub fn reset_poem(&mut self) -> Result<(), PoemError> {
        self.custom.reset(&mut self.store, self.active)?;
        self.rotation.reset(self.clock.now_ms());
        log::info!("custom poem reset for {}", self.active.descriptor().name);
        Ok(())
    }

    /// Text to prefill the poem editor with.
    pub fn poem_text(&self) -> String {
        match self.custom.raw(self.active) {
            Some(raw) => raw.to_string(),
            None => poem::default_poem(self.active).to_string(),
        }
    }

    pub fn current_poem_lines(&self) -> Vec<&str> {
        poem::current_poem_lines(self.active, &self.custom)
    }

    pub fn active_scene(&self) -> SceneKind {
        self.active
    }

    pub fn scene_name(&self) -> &'static str {
        self.active.descriptor().name
    }

    pub fn rotation(&self) -> &PoemRotation {
        &self.rotation
    }

    pub fn overlay(&self) -> &PoemOverlay {
        &self.overlay
    }

    pub fn custom_poems(&self) -> &CustomPoems {
        &self.custom
    }

    pub fn scenes(&self) -> &SceneSet {
        &self.scenes
    }

    pub fn bounds(&self) -> Vec2 {
        self.ctx.bounds
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.ctx.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the display, handing back its store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poem::{FadePhase, MemoryStore};
    use crate::render::DrawCommand;

    fn display() -> Display<MemoryStore> {
        Display::new(DisplayConfig::default(), AssetManifest::default(), MemoryStore::new(), 42)
    }

    #[test]
    fn starts_on_rain_with_a_cleared_frame() {
        let mut d = display();
        assert_eq!(d.active_scene(), SceneKind::Rain);
        let out = d.frame(1000.0);
        assert_eq!(out.scene_name, "Rain");
        assert!(matches!(out.display_list.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(out.poem.opacity, 0.0);
        assert_eq!(out.poem.lines.len(), 2);
    }

    #[test]
    fn audio_waits_for_interaction() {
        let mut d = display();
        assert!(d.frame(0.0).audio.is_none());
        d.next_scene();
        assert!(d.frame(16.0).audio.is_none());

        d.notify_interaction();
        let cue = d.frame(32.0).audio;
        assert_eq!(cue, Some(AudioCue { scene: SceneKind::River, path: "audio/river.mp3".into() }));
        // Cue is delivered once
        assert!(d.frame(48.0).audio.is_none());

        d.next_scene();
        assert_eq!(d.frame(64.0).audio.map(|c| c.scene), Some(SceneKind::Ocean));
    }

    #[test]
    fn scene_change_restarts_the_fade() {
        let mut d = display();
        d.frame(0.0);
        d.frame(600.0);
        assert_eq!(d.rotation().phase(), FadePhase::Display);
        d.next_scene();
        assert_eq!(d.rotation().phase(), FadePhase::FadeIn);
        assert_eq!(d.rotation().progress(), 0.0);
        assert_eq!(d.rotation().index(), 0);
    }

    #[test]
    fn pointer_input_reaches_the_active_scene() {
        let mut d = display();
        d.load_scene(SceneKind::Ocean);
        d.frame(0.0);
        let target = d.scenes().ocean.fish().last().map(|f| f.pos).unwrap();
        let before = d.scenes().ocean.fish().len();
        d.push_input(InputEvent::PointerDown { x: target.x, y: target.y });
        d.frame(0.0);
        assert_eq!(d.scenes().ocean.fish().len(), before - 1);
    }

    #[test]
    fn rain_layout_uses_the_size_given_before_the_first_frame() {
        let mut d = display();
        d.resize(1920.0, 1020.0);
        d.frame(0.0);

        let rain = &d.scenes().rain;
        let road_top = 1020.0 - crate::scenes::city::ROAD_HEIGHT;
        let last = rain.city().buildings().last().unwrap();
        assert!((last.origin.y + last.size.y - road_top).abs() < 1e-3);
        assert!(last.origin.x > 1600.0);
        assert!(rain.drops().iter().any(|drop| drop.pos.x > 800.0));
    }

    #[test]
    fn resize_clamps_to_one_pixel() {
        let mut d = display();
        d.resize(0.0, 540.0);
        assert_eq!(d.bounds(), Vec2::new(1.0, 540.0));
    }
}
