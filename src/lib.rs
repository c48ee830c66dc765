//! Street Rush - a scrolling-road arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, environment)
//! - `config`: Screen-derived immutable session configuration
//! - `screens`: Start / main game / game over state machine
//! - `render`: Draw-op lists handed to an external renderer
//! - `platform`: Clock/input/render/audio/display abstraction
//! - `runner`: The single outer frame loop

pub mod audio;
pub mod config;
pub mod platform;
pub mod render;
pub mod runner;
pub mod screens;
pub mod sim;
pub mod ui;

pub use config::{GameConfig, ScreenUnit};
pub use screens::{Screen, Session};

/// Game timing and speed constants
pub mod consts {
    /// Target frame rate of every screen's run loop
    pub const FRAME_RATE: u32 = 120;

    /// Road scroll speed (pixels per frame, leftward)
    pub const BACKGROUND_SPEED: i32 = 3;
    /// Enemy car speed (pixels per frame, leftward)
    pub const ENEMY_CAR_SPEED: f32 = 2.0;
    /// Canister speeds, one picked at random per spawn
    pub const CANISTER_SPEEDS: [f32; 3] = [7.0, 8.0, 9.0];
    /// Bike speed range (inclusive), picked at random per spawn
    pub const BIKE_SPEED_RANGE: (i32, i32) = (4, 6);
    /// Pedestrian speeds, one picked at random per spawn
    pub const PEDESTRIAN_SPEEDS: [f32; 3] = [3.2, 3.3, 3.5];

    /// Player acceleration per frame while a direction is held
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    /// Player velocity clamp (per component)
    pub const PLAYER_SPEED_MAX: f32 = 5.0;
    pub const PLAYER_SPEED_MIN: f32 = -5.0;

    /// Daytime driving before the day-night transition begins
    pub const HIGH_NOON_TIME_MS: u64 = 20_000;
    /// Trigger window width; frame jitter must not miss the start condition
    pub const TRANSITION_WINDOW_MS: u64 = 6_000;
    /// Time between background image steps during a transition
    pub const TRANSITION_SPEED_MS: u64 = 8_000;
    /// Number of images in the day-to-night sequence
    pub const TRANSITION_FRAMES: usize = 9;

    /// Initial inter-arrival spawn intervals
    pub const CAR_SPAWN_MS: u64 = 3_000;
    pub const BIKE_SPAWN_MS: u64 = 10_000;
    pub const PEDESTRIAN_SPAWN_MS: u64 = 6_000;
    pub const CANISTER_SPAWN_MS: u64 = 20_000;

    /// Traffic wave: dense for WAVE_TIME_MS, calm for WAVE_DOWN_TIME_MS
    pub const WAVE_TIME_MS: u64 = TRANSITION_SPEED_MS * 10;
    pub const WAVE_DOWN_TIME_MS: u64 = TRANSITION_SPEED_MS * 2;
    /// Chance a despawned car is immediately replaced
    pub const WAVE_RESPAWN_CHANCE: f64 = 0.95;
    pub const CALM_RESPAWN_CHANCE: f64 = 0.30;

    /// Horizontal buffer around existing cars when placing a new one
    pub const CAR_SPAWN_BUFFER_PX: i32 = 20;
    /// Placement attempts before a car spawn tick is dropped
    pub const CAR_SPAWN_ATTEMPTS: u32 = 5;

    /// Animation frame hold time for bikes and pedestrians
    pub const ANIMATION_FRAME_MS: u64 = 200;

    /// Fade-to-black length when entering the main game
    pub const FADE_DURATION_MS: u64 = 1_200;
    /// Delay before process exit so the quit sound can finish
    pub const QUIT_SOUND_DELAY_MS: u64 = 1_000;

    pub const STARTING_LIVES: u32 = 3;

    /// Image variant counts the asset provider must supply
    pub const CAR_VARIANTS: usize = 4;
    pub const PEDESTRIAN_VARIANTS: usize = 2;
    pub const BIKE_ANIM_FRAMES: usize = 3;
    pub const PEDESTRIAN_ANIM_FRAMES: usize = 3;

    /// Scream variant split on pedestrian collisions
    pub const SCREAM_ALT_CHANCE: f64 = 0.2;
}

/// Format elapsed milliseconds as HH:MM:SS (the on-screen timer
/// and the session high-score string)
pub fn format_timer(elapsed_ms: u64) -> String {
    let seconds = elapsed_ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    format!("{:02}:{:02}:{:02}", hours, minutes % 60, seconds % 60)
}
