//! Cars crossing the rainy street in two lanes.

use glam::Vec2;

use crate::api::scene::SceneContext;
use crate::assets::registry::AssetKey;
use crate::render::DisplayList;

const CAR_SCALE: f32 = 0.15;
/// Cars beyond this distance off either edge are dropped.
const PRUNE_MARGIN: f32 = 400.0;
const SPAWN_MARGIN: f32 = 50.0;
/// Upper lane (left to right), measured from the bottom edge.
const LANE_RIGHTWARD: f32 = 150.0;
/// Lower lane (right to left), measured from the bottom edge.
const LANE_LEFTWARD: f32 = 80.0;
const LANE_JITTER: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub sprite: u8,
    pub pos: Vec2,
    pub size: Vec2,
    /// 1.0 travelling right, -1.0 travelling left.
    pub dir: f32,
    pub speed: f32,
}

#[derive(Debug, Default)]
pub struct Traffic {
    cars: Vec<Car>,
    last_spawn_ms: Option<f64>,
    next_gap_ms: f64,
    next_rightward: bool,
}

impl Traffic {
    pub fn new() -> Self {
        Self {
            next_rightward: true,
            ..Self::default()
        }
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Spawn when due, move every car, prune the ones far off-screen.
    pub fn step(&mut self, ctx: &mut SceneContext) {
        let due = match self.last_spawn_ms {
            None => true,
            Some(last) => ctx.now_ms - last >= self.next_gap_ms,
        };
        if due && self.spawn(ctx) {
            self.last_spawn_ms = Some(ctx.now_ms);
            self.next_gap_ms = ctx.rng.range(
                ctx.config.car_spawn_min_ms as f32,
                ctx.config.car_spawn_max_ms as f32,
            ) as f64;
        }

        for c in &mut self.cars {
            c.pos.x += c.speed * c.dir;
        }
        let width = ctx.width();
        self.cars
            .retain(|c| c.pos.x > -PRUNE_MARGIN && c.pos.x < width + PRUNE_MARGIN);
    }

    /// Add one car using a ready sprite. Returns false while no car art has loaded.
    fn spawn(&mut self, ctx: &mut SceneContext) -> bool {
        let ready: Vec<(u8, Vec2)> = (0..ctx.manifest.cars.len())
            .map_while(|i| u8::try_from(i).ok())
            .filter_map(|i| ctx.assets.size(AssetKey::Car(i)).map(|size| (i, size)))
            .collect();
        let Some(&(sprite, natural)) = ctx.rng.pick(&ready) else {
            return false;
        };

        let rightward = self.next_rightward;
        self.next_rightward = !rightward;

        let size = natural * CAR_SCALE;
        let lane = if rightward { LANE_RIGHTWARD } else { LANE_LEFTWARD };
        let x = if rightward { -size.x - SPAWN_MARGIN } else { ctx.width() + SPAWN_MARGIN };
        let y = ctx.height() - lane + ctx.rng.range(-LANE_JITTER, LANE_JITTER);

        self.cars.push(Car {
            sprite,
            pos: Vec2::new(x, y),
            size,
            dir: if rightward { 1.0 } else { -1.0 },
            speed: ctx.rng.range(3.0, 5.0),
        });
        log::debug!("car spawned ({} on screen)", self.cars.len());
        true
    }

    pub fn draw(&self, list: &mut DisplayList) {
        for c in &self.cars {
            list.sprite(AssetKey::Car(c.sprite), c.pos, c.size, c.dir < 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scene::DisplayConfig;
    use crate::assets::manifest::AssetManifest;

    fn ctx() -> SceneContext {
        SceneContext::new(DisplayConfig::default(), AssetManifest::default(), 5)
    }

    #[test]
    fn no_cars_without_sprites() {
        let mut ctx = ctx();
        let mut traffic = Traffic::new();
        for i in 0..100 {
            ctx.now_ms = i as f64 * 100.0;
            traffic.step(&mut ctx);
        }
        assert!(traffic.cars().is_empty());
    }

    #[test]
    fn directions_alternate_between_lanes() {
        let mut ctx = ctx();
        ctx.assets.mark_ready(AssetKey::Car(0), 400.0, 200.0);
        let mut traffic = Traffic::new();

        ctx.now_ms = 0.0;
        traffic.step(&mut ctx);
        ctx.now_ms = 5000.0;
        traffic.step(&mut ctx);

        let cars = traffic.cars();
        assert_eq!(cars.len(), 2);
        assert_eq!(cars[0].dir, 1.0);
        assert_eq!(cars[1].dir, -1.0);
        assert!(cars[0].pos.y < cars[1].pos.y, "rightward lane sits above the leftward lane");
        assert!((cars[0].size - Vec2::new(60.0, 30.0)).abs().max_element() < 1e-3);
    }

    #[test]
    fn spawn_gap_is_respected() {
        let mut ctx = ctx();
        ctx.assets.mark_ready(AssetKey::Car(1), 100.0, 50.0);
        let mut traffic = Traffic::new();
        ctx.now_ms = 1000.0;
        traffic.step(&mut ctx);
        ctx.now_ms = 1000.0 + 2400.0;
        traffic.step(&mut ctx);
        assert_eq!(traffic.cars().len(), 1);
    }

    #[test]
    fn high_sprite_indices_spawn_with_long_car_lists() {
        let manifest = AssetManifest {
            cars: (0..300).map(|i| format!("cars/{}.png", i)).collect(),
            ..AssetManifest::default()
        };
        let mut ctx = SceneContext::new(DisplayConfig::default(), manifest, 5);
        ctx.assets.mark_ready(AssetKey::Car(200), 100.0, 50.0);
        let mut traffic = Traffic::new();
        traffic.step(&mut ctx);
        assert_eq!(traffic.cars().len(), 1);
        assert_eq!(traffic.cars()[0].sprite, 200);
    }

    #[test]
    fn far_off_screen_cars_are_pruned() {
        let mut ctx = ctx();
        let mut traffic = Traffic::new();
        traffic.last_spawn_ms = Some(0.0);
        traffic.next_gap_ms = f64::MAX;
        traffic.cars.push(Car {
            sprite: 0,
            pos: Vec2::new(ctx.width() + PRUNE_MARGIN - 1.0, 500.0),
            size: Vec2::splat(10.0),
            dir: 1.0,
            speed: 4.0,
        });
        traffic.step(&mut ctx);
        assert!(traffic.cars().is_empty());
    }
}
