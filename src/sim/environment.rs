//! Environmental cycles: the scrolling background, the day-night transition
//! and the traffic wave oscillator.
//!
//! Everything here is level-triggered against a sampled `now_ms`; a dropped
//! frame just means the same condition is still true on the next check.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// Day-night transition state machine plus the background scroller.
///
/// `transition_start_ms == None` means plain daytime. The background image
/// index only ever changes while the tile is fully on screen, so a swap
/// never tears a mid-scroll tile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Environment {
    /// Origin of the day-night cycle; reset when a full round trip completes
    pub cycle_start_ms: u64,
    pub transition_start_ms: Option<u64>,
    pub reverse: bool,
    /// Index into the day-to-night image sequence (0 = full day)
    pub background_index: usize,
    /// Horizontal scroll offset of the background tile
    pub bg_x: i32,
}

impl Environment {
    pub fn new(now_ms: u64) -> Self {
        Self {
            cycle_start_ms: now_ms,
            transition_start_ms: None,
            reverse: false,
            background_index: 0,
            bg_x: 0,
        }
    }

    /// Scroll the tile leftward, wrapping once it is fully off screen
    pub fn scroll(&mut self, cfg: &GameConfig) {
        self.bg_x -= BACKGROUND_SPEED;
        if self.bg_x < -cfg.background_w {
            self.bg_x = 0;
        }
    }

    /// True when the tile's scroll offset keeps one image covering the
    /// whole screen; index swaps are only allowed then
    pub fn fully_on_screen(&self, cfg: &GameConfig) -> bool {
        cfg.screen_w - cfg.background_w < self.bg_x && self.bg_x <= 0
    }

    /// Advance the day-night state machine
    pub fn advance(&mut self, cfg: &GameConfig, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.cycle_start_ms);

        // The wide trigger window compensates for frame jitter: the exact
        // HIGH_NOON_TIME instant may never be observed
        if self.transition_start_ms.is_none()
            && (HIGH_NOON_TIME_MS..HIGH_NOON_TIME_MS + TRANSITION_WINDOW_MS).contains(&elapsed)
        {
            self.transition_start_ms = Some(now_ms);
            log::info!("day-night transition starting at {}ms elapsed", elapsed);
        }

        let Some(started) = self.transition_start_ms else {
            return;
        };

        if !self.reverse {
            let index = (now_ms.saturating_sub(started) / TRANSITION_SPEED_MS) as usize;
            if index < TRANSITION_FRAMES {
                if self.fully_on_screen(cfg) {
                    self.background_index = index;
                }
            } else {
                // Out of images: run the sequence back toward day
                self.reverse = true;
                self.transition_start_ms = Some(now_ms);
                log::info!("night reached, reversing transition");
            }
        }

        if self.reverse {
            // transition_start_ms was possibly re-captured just above
            let Some(started) = self.transition_start_ms else {
                return;
            };
            let steps = (now_ms.saturating_sub(started) / TRANSITION_SPEED_MS) as i64;
            let index = TRANSITION_FRAMES as i64 - 1 - steps;
            if index >= 0 {
                if self.fully_on_screen(cfg) {
                    self.background_index = index as usize;
                }
            } else {
                // Back to day; restart the whole cycle
                self.cycle_start_ms = now_ms;
                self.transition_start_ms = None;
                self.reverse = false;
                log::info!("day-night cycle complete");
            }
        }
    }
}

/// Traffic wave oscillator: dense traffic for the first WAVE_TIME_MS of
/// each cycle, calm for the remaining WAVE_DOWN_TIME_MS, repeating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wave {
    pub cycle_start_ms: u64,
    pub active: bool,
}

impl Wave {
    pub fn new(now_ms: u64) -> Self {
        Self {
            cycle_start_ms: now_ms,
            active: true,
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.cycle_start_ms);
        if elapsed >= WAVE_TIME_MS + WAVE_DOWN_TIME_MS {
            self.active = true;
            self.cycle_start_ms = now_ms;
            log::debug!("wave is on");
        } else if elapsed >= WAVE_TIME_MS {
            if self.active {
                log::debug!("wave is off");
            }
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn cfg() -> GameConfig {
        GameConfig::new(1920, 1080)
    }

    #[test]
    fn test_wave_periodicity() {
        // Active for exactly the first WAVE_TIME_MS of every cycle,
        // across five consecutive cycles
        let mut wave = Wave::new(0);
        let cycle = WAVE_TIME_MS + WAVE_DOWN_TIME_MS;
        let step = 16; // ~60fps observation cadence
        let mut now = 0u64;
        for _ in 0..5 {
            let origin = wave.cycle_start_ms;
            while now.saturating_sub(origin) < cycle {
                wave.update(now);
                let phase = now.saturating_sub(wave.cycle_start_ms);
                if wave.cycle_start_ms == origin {
                    assert_eq!(wave.active, phase < WAVE_TIME_MS, "phase {phase}");
                }
                now += step;
            }
        }
        assert!(wave.active, "new cycle begins active");
    }

    #[test]
    fn test_transition_waits_for_high_noon() {
        let c = cfg();
        let mut env = Environment::new(0);
        env.advance(&c, HIGH_NOON_TIME_MS - 1);
        assert!(env.transition_start_ms.is_none());
        // Jitter inside the window still triggers exactly once
        env.advance(&c, HIGH_NOON_TIME_MS + 3_000);
        assert!(env.transition_start_ms.is_some());
    }

    #[test]
    fn test_index_frozen_while_mid_scroll() {
        let c = cfg();
        let mut env = Environment::new(0);
        env.bg_x = -(c.background_w - c.screen_w / 2); // tile mid-transit
        assert!(!env.fully_on_screen(&c));
        env.advance(&c, HIGH_NOON_TIME_MS);
        env.advance(&c, HIGH_NOON_TIME_MS + 2 * TRANSITION_SPEED_MS);
        assert_eq!(env.background_index, 0);

        // Once aligned, the pending index applies
        env.bg_x = 0;
        env.advance(&c, HIGH_NOON_TIME_MS + 2 * TRANSITION_SPEED_MS + 1);
        assert_eq!(env.background_index, 2);
    }

    #[test]
    fn test_day_night_round_trip() {
        let c = cfg();
        let mut env = Environment::new(0);
        let step = 100;
        let total = HIGH_NOON_TIME_MS + 2 * (TRANSITION_FRAMES as u64 + 1) * TRANSITION_SPEED_MS;
        let mut reached_night = false;
        let mut now = 0;
        while now <= total {
            env.advance(&c, now); // bg_x stays 0: always fully on screen
            if env.background_index == TRANSITION_FRAMES - 1 {
                reached_night = true;
            }
            now += step;
        }
        assert!(reached_night);
        assert!(env.transition_start_ms.is_none());
        assert!(!env.reverse);
        assert_eq!(env.background_index, 0);
        // Cycle origin restarted, so the whole cycle repeats
        assert!(env.cycle_start_ms > 0);
    }

    #[test]
    fn test_scroll_wraps() {
        let c = cfg();
        let mut env = Environment::new(0);
        let mut wrapped = false;
        for _ in 0..(2 * c.background_w / BACKGROUND_SPEED) {
            env.scroll(&c);
            assert!(env.bg_x <= 0 && env.bg_x >= -c.background_w);
            if env.bg_x == 0 {
                wrapped = true;
            }
        }
        assert!(wrapped);
    }
}
