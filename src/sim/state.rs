//! Game state and core simulation types
//!
//! One `GameState` owns everything a main-game session mutates. The world
//! (entities + spawn timers) resets on every life loss; stats, clock origins
//! and spawn intervals persist across those resets.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyRamp, SpawnIntervals};
use super::environment::{Environment, Wave};
use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::*;

/// Traffic entity kinds, in collision priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficKind {
    Car,
    Bike,
    Pedestrian,
}

/// Multi-frame animation cursor (bikes and pedestrians)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Animation {
    pub frame: usize,
    pub frame_count: usize,
    pub last_change_ms: u64,
}

impl Animation {
    pub fn new(frame_count: usize, now_ms: u64) -> Self {
        Self {
            frame: 0,
            frame_count,
            last_change_ms: now_ms,
        }
    }

    /// Cycle to the next frame once the hold time has passed
    pub fn advance(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_change_ms) > ANIMATION_FRAME_MS {
            self.frame = (self.frame + 1) % self.frame_count;
            self.last_change_ms = now_ms;
        }
    }
}

/// A spawned traffic entity (car, bike or pedestrian)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Traffic {
    pub kind: TrafficKind,
    /// Image variant index (car model / pedestrian type)
    pub variant: usize,
    pub rect: Rect,
    /// Leftward speed in pixels per frame
    pub speed: f32,
    /// Sub-pixel x position; `rect.x` is this truncated
    x: f32,
    pub anim: Option<Animation>,
}

impl Traffic {
    pub fn new(kind: TrafficKind, variant: usize, rect: Rect, speed: f32) -> Self {
        Self {
            kind,
            variant,
            rect,
            speed,
            x: rect.x as f32,
            anim: None,
        }
    }

    pub fn with_animation(mut self, frame_count: usize, now_ms: u64) -> Self {
        self.anim = Some(Animation::new(frame_count, now_ms));
        self
    }

    /// Advance one frame leftward
    pub fn advance(&mut self) {
        self.x -= self.speed;
        self.rect.x = self.x as i32;
    }

    pub fn off_screen_left(&self) -> bool {
        self.rect.right() < 0
    }
}

/// A fuel canister; collecting one grants a life
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canister {
    pub rect: Rect,
    pub speed: f32,
    x: f32,
}

impl Canister {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self {
            rect,
            speed,
            x: rect.x as f32,
        }
    }

    pub fn advance(&mut self) {
        self.x -= self.speed;
        self.rect.x = self.x as i32;
    }

    pub fn off_screen_left(&self) -> bool {
        self.rect.right() < 0
    }
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position (f32 so sub-pixel velocity accumulates)
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: i32,
    pub h: i32,
}

impl Player {
    pub fn new(cfg: &GameConfig, lane_y: i32) -> Self {
        Self {
            pos: Vec2::new(cfg.player_spawn_x as f32, lane_y as f32),
            vel: Vec2::ZERO,
            w: cfg.player_w,
            h: cfg.player_h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos.x as i32, self.pos.y as i32, self.w, self.h)
    }

    /// Accelerate toward held directions, decelerate otherwise, clamp speed
    pub fn steer(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.vel.y += axis_accel(self.vel.y, up, down);
        self.vel.x += axis_accel(self.vel.x, left, right);
        self.vel = self.vel.clamp(
            Vec2::splat(PLAYER_SPEED_MIN),
            Vec2::splat(PLAYER_SPEED_MAX),
        );
    }

    /// Move by current velocity and clamp the rect into the corridor
    pub fn apply_motion(&mut self, cfg: &GameConfig) {
        self.pos += self.vel;
        let half_w = self.w as f32 / 2.0;
        let half_h = self.h as f32 / 2.0;
        self.pos.x = self
            .pos
            .x
            .clamp(cfg.min_x as f32 + half_w, cfg.max_x as f32 - half_w);
        self.pos.y = self
            .pos
            .y
            .clamp(cfg.min_y as f32 + half_h, cfg.max_y as f32 - half_h);
    }
}

/// Per-axis acceleration: toward the held direction, or back toward rest
fn axis_accel(vel: f32, negative_held: bool, positive_held: bool) -> f32 {
    if negative_held {
        -PLAYER_ACCELERATION
    } else if positive_held {
        PLAYER_ACCELERATION
    } else if vel > 0.0 {
        -PLAYER_ACCELERATION
    } else if vel < 0.0 {
        PLAYER_ACCELERATION
    } else {
        0.0
    }
}

/// Inter-arrival spawn timer: fires at most once per check, and re-arms
/// from the moment it fired rather than on a fixed schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub last_spawn_ms: u64,
}

impl SpawnTimer {
    pub fn new(now_ms: u64) -> Self {
        Self { last_spawn_ms: now_ms }
    }

    /// True when the interval has elapsed; resets regardless of whether the
    /// caller's spawn attempt succeeds
    pub fn fire(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_spawn_ms) >= interval_ms {
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// One entry in the session's collision log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionRecord {
    pub kind: TrafficKind,
    pub variant: usize,
    pub at_ms: u64,
}

/// Session bookkeeping that survives world resets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub remaining_lives: u32,
    /// Elapsed-time string captured at the most recent collision
    pub high_score: Option<String>,
    pub collided: Vec<CollisionRecord>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            remaining_lives: STARTING_LIVES,
            high_score: None,
            collided: Vec::new(),
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// The resettable world: live entities and their spawn timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub cars: Vec<Traffic>,
    pub bikes: Vec<Traffic>,
    pub pedestrians: Vec<Traffic>,
    pub canisters: Vec<Canister>,
    pub car_timer: SpawnTimer,
    pub bike_timer: SpawnTimer,
    pub pedestrian_timer: SpawnTimer,
    pub canister_timer: SpawnTimer,
}

impl World {
    /// Fresh world: player on a random car lane, empty roads, timers armed
    pub fn new(cfg: &GameConfig, rng: &mut Pcg32, now_ms: u64) -> Self {
        let lane = cfg.car_lanes[rng.random_range(0..cfg.car_lanes.len())];
        Self {
            player: Player::new(cfg, lane),
            cars: Vec::new(),
            bikes: Vec::new(),
            pedestrians: Vec::new(),
            canisters: Vec::new(),
            car_timer: SpawnTimer::new(now_ms),
            bike_timer: SpawnTimer::new(now_ms),
            pedestrian_timer: SpawnTimer::new(now_ms),
            canister_timer: SpawnTimer::new(now_ms),
        }
    }
}

/// Complete main-game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub stats: SessionStats,
    pub intervals: SpawnIntervals,
    pub ramp: DifficultyRamp,
    pub env: Environment,
    pub wave: Wave,
    /// Origin of the on-screen timer and the difficulty clock
    pub timer_start_ms: u64,
    pub world: World,
}

impl GameState {
    pub fn new(cfg: &GameConfig, seed: u64, now_ms: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = World::new(cfg, &mut rng, now_ms);
        super::spawn::spawn_car(&mut world, cfg, &mut rng);
        Self {
            seed,
            rng,
            stats: SessionStats::new(),
            intervals: SpawnIntervals::default(),
            ramp: DifficultyRamp::new(),
            env: Environment::new(now_ms),
            wave: Wave::new(now_ms),
            timer_start_ms: now_ms,
            world,
        }
    }

    /// Full session reset: Start/Continue activation. Clock origins are
    /// captured here, i.e. after the entry fade has finished.
    ///
    /// Spawn intervals and the difficulty counter deliberately carry over;
    /// they belong to the process, not the session.
    pub fn begin_session(&mut self, cfg: &GameConfig, now_ms: u64) {
        self.stats = SessionStats::new();
        self.env = Environment::new(now_ms);
        self.wave = Wave::new(now_ms);
        self.timer_start_ms = now_ms;
        self.reset_world(cfg, now_ms);
    }

    /// World reset after a life loss: fresh entities, fresh spawn timers,
    /// fresh player position. Stats and clock origins persist.
    pub fn reset_world(&mut self, cfg: &GameConfig, now_ms: u64) {
        self.world = World::new(cfg, &mut self.rng, now_ms);
        super::spawn::spawn_car(&mut self.world, cfg, &mut self.rng);
    }

    pub fn elapsed_timer_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timer_start_ms)
    }

    /// The on-screen timer string (also captured as the high score)
    pub fn timer_string(&self, now_ms: u64) -> String {
        crate::format_timer(self.elapsed_timer_ms(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cfg() -> GameConfig {
        GameConfig::new(1920, 1080)
    }

    #[test]
    fn test_spawn_timer_inter_arrival() {
        let mut timer = SpawnTimer::new(1_000);
        assert!(!timer.fire(3_999, 3_000));
        assert!(timer.fire(4_500, 3_000));
        // Re-armed from the fire time, not on a periodic grid
        assert!(!timer.fire(7_000, 3_000));
        assert!(timer.fire(7_500, 3_000));
    }

    #[test]
    fn test_animation_cycles() {
        let mut anim = Animation::new(3, 0);
        anim.advance(100);
        assert_eq!(anim.frame, 0);
        anim.advance(201);
        assert_eq!(anim.frame, 1);
        anim.advance(402);
        assert_eq!(anim.frame, 2);
        anim.advance(603);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn test_world_reset_preserves_stats() {
        let cfg = cfg();
        let mut state = GameState::new(&cfg, 7, 0);
        state.stats.remaining_lives = 1;
        state.stats.collided.push(CollisionRecord {
            kind: TrafficKind::Car,
            variant: 0,
            at_ms: 5_000,
        });
        let origin = state.timer_start_ms;
        state.reset_world(&cfg, 9_000);
        assert_eq!(state.stats.remaining_lives, 1);
        assert_eq!(state.stats.collided.len(), 1);
        assert_eq!(state.timer_start_ms, origin);
        assert!(state.world.bikes.is_empty());
    }

    #[test]
    fn test_begin_session_resets_stats_but_not_ramp() {
        let cfg = cfg();
        let mut state = GameState::new(&cfg, 7, 0);
        state.stats.remaining_lives = 0;
        state.intervals.car_ms = 2_000;
        state.ramp.counter = 3;
        state.begin_session(&cfg, 60_000);
        assert_eq!(state.stats.remaining_lives, STARTING_LIVES);
        assert!(state.stats.collided.is_empty());
        assert_eq!(state.timer_start_ms, 60_000);
        assert_eq!(state.intervals.car_ms, 2_000);
        assert_eq!(state.ramp.counter, 3);
    }

    #[test]
    fn test_player_spawns_on_car_lane() {
        let cfg = cfg();
        let state = GameState::new(&cfg, 42, 0);
        let y = state.world.player.pos.y as i32;
        assert!(cfg.car_lanes.contains(&y));
        assert_eq!(state.world.player.pos.x as i32, cfg.player_spawn_x);
    }

    proptest! {
        /// Velocity components stay clamped for any input sequence
        #[test]
        fn prop_speed_clamp(inputs in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 0..500)) {
            let cfg = cfg();
            let mut player = Player::new(&cfg, cfg.car_lanes[0]);
            for (up, down, left, right) in inputs {
                player.steer(up, down, left, right);
                prop_assert!(player.vel.x >= PLAYER_SPEED_MIN && player.vel.x <= PLAYER_SPEED_MAX);
                prop_assert!(player.vel.y >= PLAYER_SPEED_MIN && player.vel.y <= PLAYER_SPEED_MAX);
            }
        }

        /// The player rect stays inside the corridor for any velocities
        #[test]
        fn prop_bounds_clamp(
            vx in PLAYER_SPEED_MIN..=PLAYER_SPEED_MAX,
            vy in PLAYER_SPEED_MIN..=PLAYER_SPEED_MAX,
            frames in 1usize..400,
        ) {
            let cfg = cfg();
            let mut player = Player::new(&cfg, cfg.car_lanes[0]);
            player.vel = Vec2::new(vx, vy);
            for _ in 0..frames {
                player.apply_motion(&cfg);
                let rect = player.rect();
                prop_assert!(rect.left() >= cfg.min_x);
                prop_assert!(rect.right() <= cfg.max_x);
                prop_assert!(rect.top() >= cfg.min_y);
                prop_assert!(rect.bottom() <= cfg.max_y);
            }
        }
    }
}
