//! Frame composition
//!
//! The core never touches a GPU or a window. Each frame it builds an ordered
//! list of `DrawOp`s; the platform's `Renderer` rasterizes them. Ops are
//! emitted back-to-front, so list order is paint order.

use crate::config::GameConfig;
use crate::consts::*;
use crate::sim::state::{GameState, SessionStats};
use crate::sim::Rect;
use crate::ui::Button;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    /// Button text when the pointer is over it
    pub const HOVER: Color = Color(255, 210, 60, 255);
}

/// Every image the asset provider must supply, addressed by role rather
/// than file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// Road strip at the given day-night index (0 = full day)
    Background(usize),
    /// Tree canopy strip at the same day-night index
    Trees(usize),
    PlayerCar,
    EnemyCar(usize),
    BikeFrame(usize),
    PedestrianFrame { variant: usize, frame: usize },
    Canister,
    /// Remaining-lives indicator
    FuelIcon,
    StartScreen,
    GameOverScreen,
}

/// One drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Sprite { key: AssetKey, dest: Rect },
    Text {
        text: String,
        center_x: i32,
        center_y: i32,
        size_px: i32,
        color: Color,
    },
    /// Full-screen black overlay; alpha in 0.0..=1.0
    FadeToBlack { alpha: f32 },
}

/// Compose one main-game frame
pub fn main_game_frame(
    state: &GameState,
    cfg: &GameConfig,
    now_ms: u64,
    quit: &Button,
) -> Vec<DrawOp> {
    let mut ops = vec![DrawOp::Clear(Color::BLACK)];
    let index = state.env.background_index;

    // Two copies of the scrolling strip so the seam never shows
    for tile in 0..2 {
        let x = state.env.bg_x + tile * cfg.background_w;
        ops.push(DrawOp::Sprite {
            key: AssetKey::Background(index),
            dest: Rect::new(x, cfg.background_y, cfg.background_w, cfg.background_h),
        });
    }

    ops.push(DrawOp::Sprite {
        key: AssetKey::PlayerCar,
        dest: state.world.player.rect(),
    });

    for canister in &state.world.canisters {
        ops.push(DrawOp::Sprite {
            key: AssetKey::Canister,
            dest: canister.rect,
        });
    }
    for car in &state.world.cars {
        ops.push(DrawOp::Sprite {
            key: AssetKey::EnemyCar(car.variant),
            dest: car.rect,
        });
    }
    for pedestrian in &state.world.pedestrians {
        let frame = pedestrian.anim.map(|a| a.frame).unwrap_or(0);
        ops.push(DrawOp::Sprite {
            key: AssetKey::PedestrianFrame {
                variant: pedestrian.variant,
                frame,
            },
            dest: pedestrian.rect,
        });
    }
    for bike in &state.world.bikes {
        let frame = bike.anim.map(|a| a.frame).unwrap_or(0);
        ops.push(DrawOp::Sprite {
            key: AssetKey::BikeFrame(frame),
            dest: bike.rect,
        });
    }

    // Canopy strip scrolls with the road and sits above traffic
    for tile in 0..2 {
        let x = state.env.bg_x + tile * cfg.background_w;
        ops.push(DrawOp::Sprite {
            key: AssetKey::Trees(index),
            dest: Rect::new(x, 0, cfg.background_w, cfg.background_y),
        });
    }

    // HUD: fuel icons, elapsed timer, in-game quit button
    for life in 0..state.stats.remaining_lives {
        let x = cfg.unit.w(1.0) + life as i32 * (cfg.canister_w + cfg.unit.w(0.5));
        ops.push(DrawOp::Sprite {
            key: AssetKey::FuelIcon,
            dest: Rect::new(x, cfg.unit.h(1.0), cfg.canister_w, cfg.canister_h),
        });
    }
    ops.push(DrawOp::Text {
        text: state.timer_string(now_ms),
        center_x: cfg.screen_w / 2,
        center_y: cfg.unit.h(3.0),
        size_px: cfg.unit.h(3.5),
        color: Color::WHITE,
    });
    ops.push(quit.draw_op());

    ops
}

/// Compose the start screen
pub fn start_frame(cfg: &GameConfig, start: &Button, quit: &Button) -> Vec<DrawOp> {
    vec![
        DrawOp::Clear(Color::BLACK),
        DrawOp::Sprite {
            key: AssetKey::StartScreen,
            dest: Rect::new(0, 0, cfg.windowed_w, cfg.windowed_h),
        },
        start.draw_op(),
        quit.draw_op(),
    ]
}

/// Compose the game over screen, with the last captured survival time
pub fn game_over_frame(
    cfg: &GameConfig,
    stats: &SessionStats,
    cont: &Button,
    quit: &Button,
) -> Vec<DrawOp> {
    let mut ops = vec![
        DrawOp::Clear(Color::BLACK),
        DrawOp::Sprite {
            key: AssetKey::GameOverScreen,
            dest: Rect::new(0, 0, cfg.windowed_w, cfg.windowed_h),
        },
    ];
    if let Some(score) = &stats.high_score {
        ops.push(DrawOp::Text {
            text: format!("You survived {}", score),
            center_x: cfg.windowed_w / 2,
            center_y: cfg.windowed_h / 3,
            size_px: 48,
            color: Color::WHITE,
        });
    }
    ops.push(cont.draw_op());
    ops.push(quit.draw_op());
    ops
}

/// Fade progress for the entry transition: 0 at `start`, 1 at `end`
pub fn fade_alpha(now_ms: u64, end_ms: u64) -> f32 {
    let remaining = end_ms.saturating_sub(now_ms) as f32;
    (1.0 - remaining / FADE_DURATION_MS as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_frame_paint_order() {
        let cfg = GameConfig::new(1920, 1080);
        let state = GameState::new(&cfg, 1, 0);
        let quit = Button::new("QUIT", 100, 40, 24);
        let ops = main_game_frame(&state, &cfg, 0, &quit);

        assert!(matches!(ops[0], DrawOp::Clear(_)));
        let bg = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Sprite { key: AssetKey::Background(_), .. }))
            .unwrap();
        let player = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Sprite { key: AssetKey::PlayerCar, .. }))
            .unwrap();
        let trees = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Sprite { key: AssetKey::Trees(_), .. }))
            .unwrap();
        assert!(bg < player, "road under the player");
        assert!(player < trees, "canopy over traffic");
    }

    #[test]
    fn test_fuel_icons_match_lives() {
        let cfg = GameConfig::new(1920, 1080);
        let state = GameState::new(&cfg, 1, 0);
        let quit = Button::new("QUIT", 100, 40, 24);
        let ops = main_game_frame(&state, &cfg, 0, &quit);
        let icons = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Sprite { key: AssetKey::FuelIcon, .. }))
            .count();
        assert_eq!(icons as u32, STARTING_LIVES);
    }

    #[test]
    fn test_fade_alpha_ramp() {
        assert_eq!(fade_alpha(0, FADE_DURATION_MS), 0.0);
        assert_eq!(fade_alpha(FADE_DURATION_MS, FADE_DURATION_MS), 1.0);
        let mid = fade_alpha(FADE_DURATION_MS / 2, FADE_DURATION_MS);
        assert!(mid > 0.4 && mid < 0.6);
    }

    #[test]
    fn test_game_over_shows_survival_time() {
        let cfg = GameConfig::new(1920, 1080);
        let mut stats = SessionStats::new();
        stats.high_score = Some("00:02:13".into());
        let cont = Button::new("CONTINUE", 600, 500, 32);
        let quit = Button::new("QUIT", 600, 560, 32);
        let ops = game_over_frame(&cfg, &stats, &cont, &quit);
        assert!(ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text.contains("00:02:13"))
        ));
    }
}
