//! Per-frame main-game update
//!
//! `tick` advances one frame against a single sampled `now_ms`. The frame
//! resolves at most one traffic collision: on the first hit the tick ends
//! immediately and reports the outcome, leaving the world reset (and the
//! game-over check) to the screen state machine.

use rand::Rng;

use super::collision::{collect_canisters, first_traffic_hit};
use super::spawn;
use super::state::{GameState, TrafficKind};
use crate::audio::SoundCue;
use crate::config::GameConfig;
use crate::consts::*;

/// Held-direction snapshot for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// How the frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    /// A traffic collision was resolved; `game_over` when it took the
    /// last life
    LifeLost { game_over: bool },
}

/// Everything a frame reports back to the state machine
#[derive(Debug, Clone)]
pub struct FrameEvents {
    pub cues: Vec<SoundCue>,
    pub outcome: FrameOutcome,
}

/// Advance the main game by one frame
pub fn tick(
    state: &mut GameState,
    cfg: &GameConfig,
    input: &FrameInput,
    now_ms: u64,
) -> FrameEvents {
    let mut cues = Vec::new();

    state.env.scroll(cfg);

    state
        .world
        .player
        .steer(input.up, input.down, input.left, input.right);
    state.world.player.apply_motion(cfg);
    let player_rect = state.world.player.rect();

    // Canisters: spawn, move, collect, despawn. Collection must not be
    // mutually exclusive with anything else in the tick.
    if state
        .world
        .canister_timer
        .fire(now_ms, state.intervals.canister_ms)
    {
        spawn::spawn_canister(&mut state.world, cfg, &mut state.rng);
    }
    for canister in &mut state.world.canisters {
        canister.advance();
    }
    let picked_up = collect_canisters(&player_rect, &mut state.world);
    for _ in 0..picked_up {
        state.stats.remaining_lives += 1;
        cues.push(SoundCue::CanisterPickup);
        log::info!("canister picked up, lives: {}", state.stats.remaining_lives);
    }
    state.world.canisters.retain(|c| !c.off_screen_left());

    // Traffic: spawn and move every kind before the collision scan
    if state.world.car_timer.fire(now_ms, state.intervals.car_ms) {
        spawn::spawn_car(&mut state.world, cfg, &mut state.rng);
    }
    for car in &mut state.world.cars {
        car.advance();
    }

    if state
        .world
        .pedestrian_timer
        .fire(now_ms, state.intervals.pedestrian_ms)
    {
        spawn::spawn_pedestrian(&mut state.world, cfg, &mut state.rng, now_ms);
        cues.push(SoundCue::Footsteps);
    }
    for pedestrian in &mut state.world.pedestrians {
        pedestrian.advance();
        if let Some(anim) = pedestrian.anim.as_mut() {
            anim.advance(now_ms);
        }
    }
    state.world.pedestrians.retain(|p| !p.off_screen_left());

    if state.world.bike_timer.fire(now_ms, state.intervals.bike_ms) {
        spawn::spawn_bike(&mut state.world, cfg, &mut state.rng, now_ms);
        cues.push(SoundCue::BikeBell);
    }
    for bike in &mut state.world.bikes {
        bike.advance();
        if let Some(anim) = bike.anim.as_mut() {
            anim.advance(now_ms);
        }
    }
    state.world.bikes.retain(|b| !b.off_screen_left());

    // First hit wins, in car > bike > pedestrian priority; the rest of the
    // tick is skipped so a second overlap cannot cost another life
    if let Some(hit) = first_traffic_hit(&player_rect, &state.world) {
        resolve_collision(state, hit.kind, hit.index, now_ms);
        cues.push(SoundCue::Collision);
        cues.push(SoundCue::SoundtrackStop);
        if hit.kind == TrafficKind::Pedestrian {
            let variant = if state.rng.random_bool(SCREAM_ALT_CHANCE) { 1 } else { 0 };
            cues.push(SoundCue::Scream { variant });
        }
        log::info!(
            "collision with {:?} (variant {}), lives: {}",
            hit.kind,
            hit.variant,
            state.stats.remaining_lives
        );
        return FrameEvents {
            cues,
            outcome: FrameOutcome::LifeLost {
                game_over: state.stats.remaining_lives < 1,
            },
        };
    }

    state.wave.update(now_ms);
    spawn::respawn_departed_cars(&mut state.world, cfg, &mut state.rng, state.wave.active);

    let elapsed = state.elapsed_timer_ms(now_ms);
    state.ramp.update(elapsed, &mut state.intervals);

    state.env.advance(cfg, now_ms);

    FrameEvents {
        cues,
        outcome: FrameOutcome::Running,
    }
}

/// Book-keep a traffic collision: capture the high score, deduct a life,
/// log the entity, and remove it from the world
fn resolve_collision(state: &mut GameState, kind: TrafficKind, index: usize, now_ms: u64) {
    state.stats.high_score = Some(state.timer_string(now_ms));
    state.stats.remaining_lives = state.stats.remaining_lives.saturating_sub(1);

    let entity = match kind {
        TrafficKind::Car => state.world.cars.remove(index),
        TrafficKind::Bike => state.world.bikes.remove(index),
        TrafficKind::Pedestrian => state.world.pedestrians.remove(index),
    };
    state.stats.collided.push(super::state::CollisionRecord {
        kind,
        variant: entity.variant,
        at_ms: now_ms,
    });
}
