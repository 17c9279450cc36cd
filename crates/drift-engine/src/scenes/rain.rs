use glam::Vec2;

use crate::api::scene::{Scene, SceneContext};
use crate::render::{Color, DisplayList, Stroke};
use super::city::CityBackdrop;
use super::traffic::Traffic;

/// Where a drop re-enters after falling past the bottom edge.
const RESPAWN_Y: f32 = -20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub pos: Vec2,
    /// Pixels per reference frame.
    pub speed: f32,
    pub length: f32,
}

/// Rain falling over a night city with passing cars.
#[derive(Debug)]
pub struct RainScene {
    drops: Vec<RainDrop>,
    city: CityBackdrop,
    traffic: Traffic,
}

impl RainScene {
    pub fn new() -> Self {
        Self {
            drops: Vec::new(),
            city: CityBackdrop::new(),
            traffic: Traffic::new(),
        }
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    pub fn city(&self) -> &CityBackdrop {
        &self.city
    }

    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    /// Build the city and seed drops against the current bounds, once each.
    fn ensure(&mut self, ctx: &mut SceneContext) {
        self.city.ensure(ctx);
        if self.drops.is_empty() {
            let (w, h) = (ctx.width(), ctx.height());
            self.drops = (0..ctx.config.rain_drops)
                .map(|_| RainDrop {
                    pos: Vec2::new(ctx.rng.range(0.0, w), ctx.rng.range(0.0, h)),
                    speed: ctx.rng.range(5.0, 23.0),
                    length: ctx.rng.range(10.0, 20.0),
                })
                .collect();
        }
    }
}

impl Default for RainScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for RainScene {
    /// Drops are reseeded on every visit, at the first step or draw, so they
    /// cover the surface size in effect by then.
    fn setup(&mut self, _ctx: &mut SceneContext) {
        self.drops.clear();
    }

    fn step(&mut self, ctx: &mut SceneContext) {
        self.ensure(ctx);
        self.city.step(ctx.bounds);
        self.traffic.step(ctx);

        let (w, h) = (ctx.width(), ctx.height());
        for drop in &mut self.drops {
            drop.pos.y += drop.speed;
            if drop.pos.y > h {
                drop.pos.y = RESPAWN_Y;
                drop.pos.x = ctx.rng.range(0.0, w);
            }
        }
    }

    fn draw(&mut self, ctx: &mut SceneContext, list: &mut DisplayList) {
        self.ensure(ctx);

        list.clear_surface(ctx.bounds);
        self.city.draw(ctx, list);
        self.traffic.draw(list);

        let streaks = self
            .drops
            .iter()
            .map(|d| (d.pos, d.pos + Vec2::new(0.0, d.length)))
            .collect();
        list.stroke_segments(streaks, Stroke::new(Color::rgba8(170, 200, 255, 0.45), 2.0));

        self.city.draw_frame(ctx, list);
    }
}
