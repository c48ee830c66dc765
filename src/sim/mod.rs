//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One sampled `now_ms` per frame, injected by the caller
//! - Seeded RNG only
//! - Fixed scan order (cars, bikes, pedestrians)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod environment;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collect_canisters, first_traffic_hit, TrafficHit};
pub use difficulty::{DifficultyRamp, SpawnIntervals};
pub use environment::{Environment, Wave};
pub use rect::Rect;
pub use state::{
    Animation, Canister, CollisionRecord, GameState, Player, SessionStats, SpawnTimer, Traffic,
    TrafficKind, World,
};
pub use tick::{tick, FrameEvents, FrameInput, FrameOutcome};
