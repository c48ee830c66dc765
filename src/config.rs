//! Screen-derived session configuration
//!
//! All geometry is expressed in percent-of-screen units so the game scales to
//! the player's display. The config is built once per session and never
//! mutated; mutable state lives in `sim::GameState`.

use serde::{Deserialize, Serialize};

/// Converts percent-of-screen values to pixel coordinates.
///
/// One unit is 1% of the actual screen width/height; results are truncated to
/// whole pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenUnit {
    perc_w: f32,
    perc_h: f32,
}

impl ScreenUnit {
    pub fn new(screen_w: i32, screen_h: i32) -> Self {
        Self {
            perc_w: screen_w as f32 / 100.0,
            perc_h: screen_h as f32 / 100.0,
        }
    }

    /// Pixels for `pct` percent of the screen width
    pub fn w(&self, pct: f32) -> i32 {
        (pct * self.perc_w) as i32
    }

    /// Pixels for `pct` percent of the screen height
    pub fn h(&self, pct: f32) -> i32 {
        (pct * self.perc_h) as i32
    }
}

/// Immutable per-session configuration: screen geometry, entity sizes,
/// lane tables and player bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub screen_w: i32,
    pub screen_h: i32,
    pub unit: ScreenUnit,

    /// Windowed size used by the start and game over screens
    pub windowed_w: i32,
    pub windowed_h: i32,

    /// Background tile size and the y offset the road strip is drawn at
    pub background_w: i32,
    pub background_h: i32,
    pub background_y: i32,

    pub player_w: i32,
    pub player_h: i32,
    pub car_w: i32,
    pub car_h: i32,
    pub bike_w: i32,
    pub bike_h: i32,
    pub pedestrian_w: i32,
    pub pedestrian_h: i32,
    pub canister_w: i32,
    pub canister_h: i32,

    /// Player corridor
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,

    /// Lane tables (center y coordinates)
    pub car_lanes: [i32; 4],
    pub bike_lanes: [i32; 2],
    pub sidewalk_lanes: [i32; 2],

    /// Per-kind lane jitter applied at spawn
    pub car_lane_jitter: i32,
    pub bike_lane_jitter: i32,
    pub pedestrian_lane_jitter: i32,

    /// How far beyond the right screen edge entities spawn, so they drive in
    pub spawn_offset: i32,

    /// Canonical player spawn x
    pub player_spawn_x: i32,
}

impl GameConfig {
    /// Derive the full configuration from the actual screen dimensions.
    pub fn new(screen_w: i32, screen_h: i32) -> Self {
        let unit = ScreenUnit::new(screen_w, screen_h);
        let third = screen_h / 3;
        Self {
            screen_w,
            screen_h,
            unit,
            windowed_w: 1200,
            windowed_h: 800,
            background_w: unit.w(180.0),
            background_h: unit.h(75.0),
            background_y: screen_h / 8,
            player_w: unit.w(5.9),
            player_h: unit.h(5.0),
            car_w: unit.w(5.9),
            car_h: unit.h(5.0),
            bike_w: unit.w(4.2),
            bike_h: unit.h(3.4),
            pedestrian_w: unit.w(3.5),
            pedestrian_h: unit.h(3.0),
            canister_w: unit.w(2.5),
            canister_h: unit.h(4.5),
            min_x: 0,
            max_x: screen_w,
            min_y: screen_h / 8 + unit.h(3.0),
            max_y: (screen_h / 8) * 7 - unit.h(2.0),
            car_lanes: [
                third + unit.h(2.5),
                third + unit.h(12.0),
                third + unit.h(21.5),
                third + unit.h(31.0),
            ],
            bike_lanes: [third - unit.h(6.5), third + unit.h(38.0)],
            sidewalk_lanes: [third - unit.h(14.5), third + unit.h(45.0)],
            car_lane_jitter: unit.h(2.0),
            bike_lane_jitter: unit.h(0.7),
            pedestrian_lane_jitter: unit.h(1.5),
            spawn_offset: unit.w(4.0),
            player_spawn_x: screen_w / 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_unit_pixels() {
        let unit = ScreenUnit::new(1920, 1080);
        assert_eq!(unit.w(100.0), 1920);
        assert_eq!(unit.h(100.0), 1080);
        assert_eq!(unit.h(11.0), 118); // truncates like the percent unit should
    }

    #[test]
    fn test_lane_tables_inside_corridor() {
        let cfg = GameConfig::new(1920, 1080);
        for lane in cfg.car_lanes {
            assert!(lane > cfg.min_y && lane < cfg.max_y);
        }
        assert!(cfg.min_y < cfg.max_y);
        assert!(cfg.background_w > cfg.screen_w, "tile must cover the screen");
    }
}
