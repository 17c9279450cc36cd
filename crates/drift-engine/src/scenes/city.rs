//! Night city behind the rain: sky, slow clouds, lit buildings, road.
//!
//! Geometry is generated on first use and then kept for the life of the
//! display, including across scene revisits and resizes.

use glam::Vec2;

use crate::api::scene::SceneContext;
use crate::assets::registry::AssetKey;
use crate::render::{Color, DisplayList, Paint, Stroke};

/// Height of the road band at the bottom of the surface.
pub const ROAD_HEIGHT: f32 = 150.0;

const WINDOW_SIZE: Vec2 = Vec2::new(8.0, 12.0);
const WINDOW_PITCH: Vec2 = Vec2::new(22.0, 25.0);
const WINDOW_INSET: f32 = 10.0;
const WINDOW_LIT_CHANCE: f32 = 0.35;

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub origin: Vec2,
    pub size: Vec2,
    /// Top-left corners of lit windows.
    pub windows: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub speed: f32,
}

#[derive(Debug, Default)]
pub struct CityBackdrop {
    buildings: Option<Vec<Building>>,
    clouds: Option<Vec<Cloud>>,
}

impl CityBackdrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate buildings and clouds the first time they are needed.
    pub fn ensure(&mut self, ctx: &mut SceneContext) {
        if self.buildings.is_none() {
            self.buildings = Some(generate_buildings(ctx));
        }
        if self.clouds.is_none() {
            let clouds: Vec<Cloud> = (0..ctx.config.clouds)
                .map(|_| Cloud {
                    pos: Vec2::new(
                        ctx.rng.range(0.0, ctx.width()),
                        ctx.rng.range(0.0, ctx.height() * 0.6),
                    ),
                    radius: ctx.rng.range(120.0, 300.0),
                    alpha: ctx.rng.range(0.08, 0.18),
                    speed: ctx.rng.range(0.05, 0.15),
                })
                .collect();
            self.clouds = Some(clouds);
        }
    }

    pub fn buildings(&self) -> &[Building] {
        self.buildings.as_deref().unwrap_or(&[])
    }

    pub fn clouds(&self) -> &[Cloud] {
        self.clouds.as_deref().unwrap_or(&[])
    }

    /// Drift clouds right, wrapping once fully past the edge.
    pub fn step(&mut self, bounds: Vec2) {
        if let Some(clouds) = self.clouds.as_mut() {
            for c in clouds.iter_mut() {
                c.pos.x += c.speed;
                if c.pos.x - c.radius > bounds.x {
                    c.pos.x = -c.radius;
                }
            }
        }
    }

    pub fn draw(&self, ctx: &SceneContext, list: &mut DisplayList) {
        let (w, h) = (ctx.width(), ctx.height());

        list.fill_rect(
            Vec2::ZERO,
            ctx.bounds,
            Paint::vertical(0.0, h, &[
                (0.0, Color::rgb8(0x14, 0x16, 0x1c)),
                (0.6, Color::rgb8(0x1c, 0x1f, 0x26)),
                (1.0, Color::rgb8(0x2b, 0x2e, 0x38)),
            ]),
        );

        for c in self.clouds() {
            list.fill_circle(c.pos, c.radius, Color::rgba8(20, 20, 30, c.alpha));
        }

        if let Some(size) = ctx.assets.size(AssetKey::CitySkyline) {
            // Skyline art sits on the road, scaled to the full width.
            let scale = if size.x > 0.0 { w / size.x } else { 1.0 };
            let drawn = Vec2::new(w, size.y * scale);
            let center = Vec2::new(w / 2.0, h - ROAD_HEIGHT - drawn.y / 2.0);
            list.sprite(AssetKey::CitySkyline, center, drawn, false);
        } else {
            let windows_color = Color::rgba8(255, 255, 180, 0.85);
            for b in self.buildings() {
                list.fill_rect(b.origin, b.size, Color::rgb8(0x0f, 0x11, 0x16));
                for win in &b.windows {
                    list.fill_rect(*win, WINDOW_SIZE, windows_color);
                }
            }
        }

        // Road with a dashed centre line
        list.fill_rect(
            Vec2::new(0.0, h - ROAD_HEIGHT),
            Vec2::new(w, ROAD_HEIGHT),
            Color::rgb8(0x1a, 0x1a, 0x1d),
        );
        list.stroke_polyline(
            vec![Vec2::new(0.0, h - ROAD_HEIGHT / 2.0), Vec2::new(w, h - ROAD_HEIGHT / 2.0)],
            Stroke::new(Color::rgba8(255, 255, 255, 0.3), 4.0).with_dash(30.0, 25.0),
        );
    }

    /// Faint frame, as if seen through a window. Drawn last.
    pub fn draw_frame(&self, ctx: &SceneContext, list: &mut DisplayList) {
        list.stroke_rect(Vec2::ZERO, ctx.bounds, Stroke::new(Color::rgba8(200, 200, 255, 0.08), 10.0));
    }
}

fn generate_buildings(ctx: &mut SceneContext) -> Vec<Building> {
    let count = ctx.config.buildings.max(1);
    let slot = ctx.width() / count as f32;
    (0..count)
        .map(|i| {
            let size = Vec2::new(ctx.rng.range(140.0, 260.0), ctx.rng.range(220.0, 420.0));
            let origin = Vec2::new(i as f32 * slot, ctx.height() - size.y - ROAD_HEIGHT);
            let rows = (size.y / WINDOW_PITCH.y) as usize;
            let cols = (size.x / WINDOW_PITCH.x) as usize;
            let mut windows = Vec::new();
            for r in 0..rows {
                for c in 0..cols {
                    if ctx.rng.chance(WINDOW_LIT_CHANCE) {
                        windows.push(Vec2::new(
                            origin.x + WINDOW_INSET + c as f32 * WINDOW_PITCH.x,
                            origin.y + WINDOW_INSET + r as f32 * WINDOW_PITCH.y,
                        ));
                    }
                }
            }
            Building { origin, size, windows }
        })
        .collect()
}
