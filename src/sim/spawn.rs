//! Entity spawning
//!
//! Cars are placed with a collision-avoidance retry against every live car;
//! bikes, pedestrians and canisters just pick a random lane and speed.
//! Canisters may land on traffic on purpose: risk for the reward.

use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Canister, Traffic, TrafficKind, World};
use crate::config::GameConfig;
use crate::consts::*;

/// True when `candidate`, with every live car inflated by the spawn buffer,
/// would overlap existing traffic
fn will_collide(cars: &[Traffic], candidate: &Rect) -> bool {
    cars.iter()
        .any(|car| car.rect.inflate_x(CAR_SPAWN_BUFFER_PX).intersects(candidate))
}

/// Uniform jitter in `[-amount, amount]`
fn jitter(rng: &mut Pcg32, amount: i32) -> i32 {
    if amount <= 0 {
        0
    } else {
        rng.random_range(-amount..=amount)
    }
}

/// Try to spawn an enemy car just off the right screen edge.
///
/// Picks a random image variant, then retries lane + jitter up to
/// CAR_SPAWN_ATTEMPTS times; a saturated road silently drops the spawn.
/// Returns whether a car was placed.
pub fn spawn_car(world: &mut World, cfg: &GameConfig, rng: &mut Pcg32) -> bool {
    let variant = rng.random_range(0..CAR_VARIANTS);
    let spawn_x = cfg.screen_w + cfg.spawn_offset;

    for _ in 0..CAR_SPAWN_ATTEMPTS {
        let lane = cfg.car_lanes[rng.random_range(0..cfg.car_lanes.len())];
        let center_y = lane + jitter(rng, cfg.car_lane_jitter);
        let rect = Rect::from_center(spawn_x, center_y, cfg.car_w, cfg.car_h);
        if !will_collide(&world.cars, &rect) {
            world
                .cars
                .push(Traffic::new(TrafficKind::Car, variant, rect, ENEMY_CAR_SPEED));
            log::debug!("spawned car variant {} at y {}", variant, center_y);
            return true;
        }
    }
    log::debug!("car spawn dropped: road saturated");
    false
}

/// Spawn a bike on a random bike lane with a random speed
pub fn spawn_bike(world: &mut World, cfg: &GameConfig, rng: &mut Pcg32, now_ms: u64) {
    let lane = cfg.bike_lanes[rng.random_range(0..cfg.bike_lanes.len())];
    let center_y = lane + jitter(rng, cfg.bike_lane_jitter);
    let rect = Rect::from_center(
        cfg.screen_w + cfg.spawn_offset,
        center_y,
        cfg.bike_w,
        cfg.bike_h,
    );
    let speed = rng.random_range(BIKE_SPEED_RANGE.0..=BIKE_SPEED_RANGE.1) as f32;
    world.bikes.push(
        Traffic::new(TrafficKind::Bike, 0, rect, speed).with_animation(BIKE_ANIM_FRAMES, now_ms),
    );
}

/// Spawn a pedestrian on a random sidewalk lane, choosing one of the two
/// visual variants
pub fn spawn_pedestrian(world: &mut World, cfg: &GameConfig, rng: &mut Pcg32, now_ms: u64) {
    let variant = rng.random_range(0..PEDESTRIAN_VARIANTS);
    let lane = cfg.sidewalk_lanes[rng.random_range(0..cfg.sidewalk_lanes.len())];
    let center_y = lane + jitter(rng, cfg.pedestrian_lane_jitter);
    let rect = Rect::from_center(
        cfg.screen_w + cfg.spawn_offset,
        center_y,
        cfg.pedestrian_w,
        cfg.pedestrian_h,
    );
    let speed = PEDESTRIAN_SPEEDS[rng.random_range(0..PEDESTRIAN_SPEEDS.len())];
    world.pedestrians.push(
        Traffic::new(TrafficKind::Pedestrian, variant, rect, speed)
            .with_animation(PEDESTRIAN_ANIM_FRAMES, now_ms),
    );
}

/// Spawn a canister anywhere in the corridor. Placement is deliberately not
/// checked against traffic.
pub fn spawn_canister(world: &mut World, cfg: &GameConfig, rng: &mut Pcg32) {
    let y = rng.random_range(cfg.min_y..=cfg.max_y - cfg.unit.h(3.0));
    let rect = Rect::new(
        cfg.screen_w + cfg.spawn_offset,
        y,
        cfg.canister_w,
        cfg.canister_h,
    );
    let speed = CANISTER_SPEEDS[rng.random_range(0..CANISTER_SPEEDS.len())];
    world.canisters.push(Canister::new(rect, speed));
}

/// Remove cars that left the screen; each departure has a chance to be
/// replaced immediately, far higher while a wave is active. This is the
/// main lever behind perceived traffic density.
pub fn respawn_departed_cars(
    world: &mut World,
    cfg: &GameConfig,
    rng: &mut Pcg32,
    wave_active: bool,
) {
    let departed = {
        let before = world.cars.len();
        world.cars.retain(|car| !car.off_screen_left());
        before - world.cars.len()
    };
    let chance = if wave_active {
        WAVE_RESPAWN_CHANCE
    } else {
        CALM_RESPAWN_CHANCE
    };
    for _ in 0..departed {
        if rng.random_bool(chance) {
            spawn_car(world, cfg, rng);
        }
    }
}
