//! Sunrise over a river: glowing sky, layered water surface, sun glints
//! and floating wood bobbing downstream.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::scene::{Scene, SceneContext};
use crate::assets::registry::AssetKey;
use crate::render::{Blend, Color, DisplayList, LineCap, Paint, Stroke};

/// Water line as a fraction of the surface height.
const WATER_TOP: f32 = 0.48;
const SKY_PHASE: f64 = 0.0002;
const WATER_PHASE: f64 = 0.0005;
const SPARKLES: usize = 20;
const SURFACE_LAYERS: usize = 3;
const SURFACE_STEP: f32 = 8.0;

/// A piece of wood drifting on the current.
#[derive(Debug, Clone, PartialEq)]
pub struct Debris {
    pub x: f32,
    pub base_y: f32,
    pub size: f32,
    /// Leftward drift in pixels per reference frame.
    pub speed: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub bob_phase: f32,
}

impl Debris {
    /// Vertical position with the sinusoidal bob applied.
    pub fn y_at(&self, t: f32) -> f32 {
        self.base_y + (t * self.bob_frequency + self.bob_phase).sin() * self.bob_amplitude
    }
}

#[derive(Debug, Default)]
pub struct RiverScene {
    debris: Vec<Debris>,
    last_spawn_ms: Option<f64>,
}

impl RiverScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    fn spawn_debris(&mut self, ctx: &mut SceneContext) {
        let (w, h) = (ctx.width(), ctx.height());
        let size = ctx.rng.range(40.0, 90.0);
        self.debris.push(Debris {
            x: w + size,
            base_y: ctx.rng.range(h * 0.56, h * 0.85),
            size,
            speed: ctx.rng.range(0.3, 0.8),
            bob_amplitude: ctx.rng.range(2.0, 6.0),
            bob_frequency: ctx.rng.range(1.0, 2.0),
            bob_phase: ctx.rng.range(0.0, TAU),
        });
        log::debug!("river debris spawned ({} afloat)", self.debris.len());
    }

    fn draw_sky(&self, ctx: &SceneContext, list: &mut DisplayList) {
        let (w, h) = (ctx.width(), ctx.height());
        let t = ctx.phase(SKY_PHASE);

        list.fill_rect(
            Vec2::ZERO,
            Vec2::new(w, h * 0.5),
            Paint::vertical(0.0, h * 0.5, &[
                (0.0, Color::rgb8(0x1a, 0x0f, 0x2e)),
                (0.35, Color::rgb8(0x4a, 0x2c, 0x5e)),
                (0.6, Color::rgb8(0xd9, 0x77, 0x06)),
                (0.85, Color::rgb8(0xfb, 0xbf, 0x24)),
                (1.0, Color::rgb8(0xfe, 0xf3, 0xc7)),
            ]),
        );

        let sun = Vec2::new(w * 0.75, h * 0.12);
        let sun_radius = (w * 0.05).clamp(35.0, 65.0);
        list.fill_circle(
            sun,
            sun_radius * 4.0,
            Paint::radial(sun, sun_radius * 0.3, sun_radius * 4.0, &[
                (0.0, Color::rgba8(255, 200, 80, 0.8)),
                (0.4, Color::rgba8(255, 170, 50, 0.3)),
                (1.0, Color::rgba8(255, 140, 30, 0.0)),
            ]),
        );
        list.fill_circle(sun, sun_radius, Color::rgba8(255, 220, 100, 0.95));

        list.set_alpha(0.6);
        for i in 0..5 {
            let fi = i as f32;
            let x = (w * (0.2 + fi * 0.15) + t * 20.0).rem_euclid(w + 200.0);
            let y = h * (0.08 + fi * 0.04);
            let size = 80.0 + fi * 10.0;
            list.fill_circles(
                vec![
                    (Vec2::new(x, y), size),
                    (Vec2::new(x + size * 0.8, y - size * 0.3), size * 0.7),
                    (Vec2::new(x - size * 0.8, y - size * 0.2), size * 0.6),
                ],
                Color::rgba8(255, 180, 100, 0.15),
            );
        }
        list.set_alpha(1.0);
    }

    fn draw_mountains(&self, ctx: &SceneContext, list: &mut DisplayList) {
        let (w, h) = (ctx.width(), ctx.height());
        let water_y = h * WATER_TOP;
        if let Some(size) = ctx.assets.size(AssetKey::Mountain) {
            let scale = if size.x > 0.0 { w / size.x } else { 1.0 };
            let drawn = Vec2::new(w, size.y * scale);
            list.sprite(AssetKey::Mountain, Vec2::new(w / 2.0, water_y - drawn.y / 2.0), drawn, false);
        } else {
            // Flat silhouette until the backdrop loads
            list.fill_polygon(
                vec![
                    Vec2::new(0.0, water_y),
                    Vec2::new(0.0, water_y - h * 0.08),
                    Vec2::new(w * 0.18, water_y - h * 0.16),
                    Vec2::new(w * 0.35, water_y - h * 0.07),
                    Vec2::new(w * 0.55, water_y - h * 0.19),
                    Vec2::new(w * 0.78, water_y - h * 0.09),
                    Vec2::new(w, water_y - h * 0.14),
                    Vec2::new(w, water_y),
                ],
                Color::rgba8(60, 40, 80, 0.55),
            );
        }
    }

    fn draw_water(&self, ctx: &SceneContext, list: &mut DisplayList) {
        let (w, h) = (ctx.width(), ctx.height());
        let water_y = h * WATER_TOP;
        let t = ctx.phase(WATER_PHASE);

        list.fill_rect(
            Vec2::new(0.0, water_y),
            Vec2::new(w, h * 0.18),
            Paint::vertical(water_y, water_y + h * 0.15, &[
                (0.0, Color::rgba8(255, 200, 100, 0.25)),
                (0.3, Color::rgba8(255, 170, 80, 0.12)),
                (1.0, Color::rgba8(100, 120, 160, 0.08)),
            ]),
        );
        list.fill_rect(
            Vec2::new(0.0, water_y),
            Vec2::new(w, h - water_y),
            Paint::vertical(water_y, h, &[
                (0.0, Color::rgba8(100, 160, 200, 0.5)),
                (0.5, Color::rgba8(60, 120, 160, 0.6)),
                (1.0, Color::rgba8(30, 70, 120, 0.7)),
            ]),
        );

        // Layered surface ripples
        let ripple = Stroke::new(Color::rgba8(200, 220, 255, 0.4), 1.5).with_cap(LineCap::Round);
        for layer in 0..SURFACE_LAYERS {
            let l = layer as f32;
            let freq = 0.008 + l * 0.003;
            let speed = 0.7 + l * 0.3;
            let amp = 8.0 - l * 2.0;
            let offset = l * 80.0;
            let steps = (w / SURFACE_STEP) as usize;
            let points = (0..=steps)
                .map(|i| {
                    let x = i as f32 * SURFACE_STEP;
                    let y = water_y
                        + (x * freq + t * speed + offset).sin() * amp
                        + (x * freq * 2.2 + t * speed * 0.6).sin() * amp * 0.5;
                    Vec2::new(x, y)
                })
                .collect();
            list.stroke_polyline(points, ripple);
        }

        // Sun glints
        list.set_blend(Blend::Screen);
        list.set_alpha(0.7);
        let mut glints = Vec::with_capacity(SPARKLES);
        let mut twinkles = Vec::with_capacity(SPARKLES * 2);
        for i in 0..SPARKLES {
            let fi = i as f32;
            let x = (w * (0.2 + fi * 0.038) + t * 40.0 * (0.5 + (fi * 0.5).sin())).rem_euclid(w);
            let base_y = water_y + h * (0.04 + (fi * 0.3).sin() * 0.03);
            let y = base_y + (t * 1.2 + fi * 0.8).sin() * 6.0;
            let size = 2.0 + (t * 1.5 + fi * 0.6).sin() * 1.5;
            glints.push((Vec2::new(x, y), size));
            twinkles.push((Vec2::new(x - size * 2.0, y), Vec2::new(x + size * 2.0, y)));
            twinkles.push((Vec2::new(x, y - size * 2.0), Vec2::new(x, y + size * 2.0)));
        }
        list.fill_circles(glints, Color::rgba8(255, 230, 150, 0.9));
        list.stroke_segments(twinkles, Stroke::new(Color::rgba8(255, 220, 120, 0.5), 1.0));
        list.set_alpha(1.0);
        list.set_blend(Blend::Normal);
    }

    fn draw_debris(&self, ctx: &SceneContext, list: &mut DisplayList) {
        let t = ctx.phase(WATER_PHASE);
        let wood_ready = ctx.assets.size(AssetKey::Wood);
        for d in &self.debris {
            let center = Vec2::new(d.x, d.y_at(t));
            match wood_ready {
                Some(natural) if natural.x > 0.0 => {
                    let size = Vec2::new(d.size, d.size * natural.y / natural.x);
                    list.sprite(AssetKey::Wood, center, size, false);
                }
                _ => {
                    let size = Vec2::new(d.size, d.size * 0.18);
                    list.fill_rect(center - size / 2.0, size, Color::rgb8(0x6b, 0x4a, 0x2f));
                }
            }
        }
    }

    fn draw_grass(&self, ctx: &SceneContext, list: &mut DisplayList) {
        let Some(natural) = ctx.assets.size(AssetKey::Grass) else {
            return;
        };
        let (w, h) = (ctx.width(), ctx.height());
        let scale = if natural.x > 0.0 { w / natural.x } else { 1.0 };
        let drawn = Vec2::new(w, natural.y * scale);
        list.sprite(AssetKey::Grass, Vec2::new(w / 2.0, h - drawn.y / 2.0), drawn, false);
    }
}

impl Scene for RiverScene {
    fn setup(&mut self, _ctx: &mut SceneContext) {}

    fn step(&mut self, ctx: &mut SceneContext) {
        let due = match self.last_spawn_ms {
            None => true,
            Some(last) => ctx.now_ms - last >= ctx.config.debris_interval_ms,
        };
        if due {
            if self.debris.len() < ctx.config.max_debris {
                self.spawn_debris(ctx);
            }
            self.last_spawn_ms = Some(ctx.now_ms);
        }

        let w = ctx.width();
        for d in &mut self.debris {
            d.x -= d.speed;
            if d.x + d.size / 2.0 < 0.0 {
                d.x = w + d.size / 2.0;
            }
        }
    }

    fn draw(&mut self, ctx: &mut SceneContext, list: &mut DisplayList) {
        list.clear_surface(ctx.bounds);
        self.draw_sky(ctx, list);
        self.draw_mountains(ctx, list);
        self.draw_water(ctx, list);
        self.draw_debris(ctx, list);
        self.draw_grass(ctx, list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scene::DisplayConfig;
    use crate::assets::manifest::AssetManifest;
    use crate::render::DrawCommand;

    fn ctx() -> SceneContext {
        SceneContext::new(DisplayConfig::default(), AssetManifest::default(), 17)
    }

    #[test]
    fn debris_spawns_on_timer_up_to_cap() {
        let mut ctx = ctx();
        let mut river = RiverScene::new();
        for i in 0..40 {
            ctx.now_ms = i as f64 * 1000.0;
            river.step(&mut ctx);
        }
        // One spawn every 3 s starting at t = 0, capped at 6.
        assert_eq!(river.debris().len(), 6);
    }

    #[test]
    fn debris_drifts_left_and_wraps_right() {
        let mut ctx = ctx();
        let mut river = RiverScene::new();
        river.last_spawn_ms = Some(0.0);
        river.debris.push(Debris {
            x: -30.0,
            base_y: 400.0,
            size: 50.0,
            speed: 0.5,
            bob_amplitude: 4.0,
            bob_frequency: 1.0,
            bob_phase: 0.0,
        });
        river.step(&mut ctx);
        assert_eq!(river.debris()[0].x, ctx.width() + 25.0);
        river.step(&mut ctx);
        assert_eq!(river.debris()[0].x, ctx.width() + 24.5);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let d = Debris {
            x: 0.0,
            base_y: 300.0,
            size: 50.0,
            speed: 0.5,
            bob_amplitude: 5.0,
            bob_frequency: 1.7,
            bob_phase: 0.4,
        };
        for i in 0..200 {
            let y = d.y_at(i as f32 * 0.1);
            assert!((y - 300.0).abs() <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn fallbacks_without_assets() {
        let mut ctx = ctx();
        let mut river = RiverScene::new();
        river.setup(&mut ctx);
        let mut list = DisplayList::new();
        river.draw(&mut ctx, &mut list);
        assert!(list.iter().any(|c| matches!(c, DrawCommand::FillPolygon { .. })));
        assert!(!list.iter().any(|c| matches!(c, DrawCommand::Sprite { .. })));
        // Blend state is restored at the end of the glints.
        let last_blend = list.iter().rev().find_map(|c| match c {
            DrawCommand::SetBlend(b) => Some(*b),
            _ => None,
        });
        assert_eq!(last_blend, Some(Blend::Normal));
    }

    #[test]
    fn sprites_used_when_ready() {
        let mut ctx = ctx();
        ctx.assets.mark_ready(AssetKey::Mountain, 1200.0, 300.0);
        ctx.assets.mark_ready(AssetKey::Grass, 1200.0, 120.0);
        let mut river = RiverScene::new();
        let mut list = DisplayList::new();
        river.draw(&mut ctx, &mut list);
        let sprites: Vec<AssetKey> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { asset, .. } => Some(*asset),
                _ => None,
            })
            .collect();
        assert_eq!(sprites, vec![AssetKey::Mountain, AssetKey::Grass]);
    }
}
