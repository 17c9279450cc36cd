//! Underwater clip with a school of clickable fish.

use glam::Vec2;

use crate::api::scene::{Scene, SceneContext};
use crate::assets::registry::AssetKey;
use crate::render::{Color, DisplayList, Paint};

/// Fish re-enter from the opposite side once this far past an edge.
const WRAP_MARGIN: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub sprite: u8,
    /// Direction the artwork faces natively (1 right, -1 left).
    pub facing: f32,
    /// Direction of travel (1 right, -1 left).
    pub dir: f32,
    pub pos: Vec2,
    pub speed: f32,
    /// Edge length of the square the sprite is drawn into.
    pub size: f32,
}

impl Fish {
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        (point.x - self.pos.x).abs() <= half && (point.y - self.pos.y).abs() <= half
    }

    pub fn mirrored(&self) -> bool {
        self.dir != self.facing
    }
}

#[derive(Debug, Default)]
pub struct OceanScene {
    fish: Vec<Fish>,
}

impl OceanScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    fn populate(&mut self, ctx: &mut SceneContext) {
        let sprites = ctx.manifest.fish.len().clamp(1, usize::from(u8::MAX) + 1) as u32;
        let h = ctx.height();
        self.fish = (0..ctx.config.fish)
            .map(|_| {
                let sprite = ctx.rng.next_int(sprites) as u8;
                Fish {
                    sprite,
                    facing: ctx.manifest.fish_facing(sprite),
                    dir: ctx.rng.sign(),
                    pos: Vec2::new(ctx.rng.range(0.0, ctx.width()), h * 0.4 + ctx.rng.next_f32() * h * 0.4),
                    speed: ctx.rng.range(0.5, 2.0),
                    size: ctx.rng.range(40.0, 80.0),
                }
            })
            .collect();
        log::debug!("ocean populated with {} fish", self.fish.len());
    }

    fn ensure_fish(&mut self, ctx: &mut SceneContext) {
        if self.fish.is_empty() {
            self.populate(ctx);
        }
    }
}

impl Scene for OceanScene {
    fn setup(&mut self, ctx: &mut SceneContext) {
        self.populate(ctx);
    }

    fn step(&mut self, ctx: &mut SceneContext) {
        self.ensure_fish(ctx);
        let w = ctx.width();
        for f in &mut self.fish {
            f.pos.x += f.speed * f.dir;
            if f.pos.x > w + WRAP_MARGIN {
                f.pos.x = -WRAP_MARGIN;
            } else if f.pos.x < -WRAP_MARGIN {
                f.pos.x = w + WRAP_MARGIN;
            }
        }
    }

    fn draw(&mut self, ctx: &mut SceneContext, list: &mut DisplayList) {
        self.ensure_fish(ctx);
        let h = ctx.height();

        list.clear_surface(ctx.bounds);
        if ctx.assets.is_ready(AssetKey::OceanVideo) {
            list.video_frame(AssetKey::OceanVideo, Vec2::ZERO, ctx.bounds);
        } else {
            list.fill_rect(
                Vec2::ZERO,
                ctx.bounds,
                Paint::vertical(0.0, h, &[
                    (0.0, Color::rgb8(0x0a, 0x3d, 0x62)),
                    (0.5, Color::rgb8(0x06, 0x2a, 0x4a)),
                    (1.0, Color::rgb8(0x02, 0x10, 0x24)),
                ]),
            );
        }

        let mut placeholders = Vec::new();
        for f in &self.fish {
            let key = AssetKey::Fish(f.sprite);
            if ctx.assets.is_ready(key) {
                list.sprite(key, f.pos, Vec2::splat(f.size), f.mirrored());
            } else {
                placeholders.push((f.pos, f.size * 0.3));
            }
        }
        if !placeholders.is_empty() {
            list.fill_circles(placeholders, Color::rgba8(255, 170, 60, 0.8));
        }
    }

    /// Remove the topmost fish under the pointer.
    fn pointer_down(&mut self, _ctx: &mut SceneContext, pos: Vec2) -> bool {
        match self.fish.iter().rposition(|f| f.contains(pos)) {
            Some(i) => {
                self.fish.remove(i);
                log::debug!("fish caught at ({:.0}, {:.0}), {} left", pos.x, pos.y, self.fish.len());
                true
            }
            None => false,
        }
    }
}
