use glam::Vec2;

use crate::api::scene::{Scene, SceneContext};
use crate::assets::registry::AssetKey;
use crate::render::{Color, DisplayList, Stroke};

const LOADING_LABEL: &str = "Loading waves\u{2026}";
const PLACEHOLDER_STEP: f32 = 10.0;

/// Shoreline clip, with an animated sine placeholder until the video can play.
#[derive(Debug, Default)]
pub struct WavesScene;

impl WavesScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene for WavesScene {
    fn setup(&mut self, _ctx: &mut SceneContext) {}

    fn draw(&mut self, ctx: &mut SceneContext, list: &mut DisplayList) {
        list.clear_surface(ctx.bounds);
        if ctx.assets.is_ready(AssetKey::WavesVideo) {
            list.video_frame(AssetKey::WavesVideo, Vec2::ZERO, ctx.bounds);
            return;
        }

        let (w, h) = (ctx.width(), ctx.height());
        list.fill_rect(Vec2::ZERO, ctx.bounds, Color::rgb8(0x0b, 0x12, 0x20));

        let t = ctx.phase(0.003);
        let steps = (w / PLACEHOLDER_STEP).ceil() as usize;
        let points = (0..=steps)
            .map(|i| {
                let x = (i as f32 * PLACEHOLDER_STEP).min(w);
                Vec2::new(x, h / 2.0 + (x * 0.02 + t).sin() * 40.0)
            })
            .collect();
        list.stroke_polyline(points, Stroke::new(Color::rgba8(255, 255, 255, 0.8), 2.0));
        list.text(LOADING_LABEL, Vec2::new(w / 2.0, h / 2.0 + 90.0), 18.0, Color::rgba8(255, 255, 255, 0.6));
    }
}
