//! Platform abstraction layer
//!
//! The core is headless; everything that touches the OS sits behind these
//! traits:
//! - Time (one `now_ms` sample per frame)
//! - Input events and held keys
//! - Rendering of draw-op lists
//! - Audio cue playback
//! - Display mode switching
//! - Asset preloading

use std::cell::Cell;
use std::fmt;

use crate::render::DrawOp;
use crate::sim::FrameInput;
use crate::audio::SoundCue;

/// Monotonic millisecond clock. Sampled exactly once per frame; the sample
/// is threaded through the whole update so a frame sees a single time.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock for real runs
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Scriptable clock for tests and headless runs
pub struct FixedClock {
    now: Cell<u64>,
}

impl FixedClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Discrete input events, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request; exits without the quit-sound delay
    Quit,
    PointerMove { x: i32, y: i32 },
    PointerClick { x: i32, y: i32 },
}

pub trait InputSource {
    /// Currently held steering keys
    fn held(&self) -> FrameInput;
    /// Drain events accumulated since the last poll
    fn poll(&mut self) -> Vec<InputEvent>;
}

pub trait Renderer {
    fn submit(&mut self, ops: &[DrawOp]);
    fn present(&mut self);
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Window state the screens request: windowed menus, fullscreen gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Windowed { w: i32, h: i32 },
    Fullscreen,
}

pub trait DisplayController {
    fn set_mode(&mut self, mode: DisplayMode);
    /// Full screen resolution, used to derive the session config
    fn screen_size(&self) -> (i32, i32);
}

/// A required asset failed to load; fatal before the first frame
#[derive(Debug, Clone)]
pub struct AssetError {
    pub name: String,
    pub reason: String,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load asset {}: {}", self.name, self.reason)
    }
}

impl std::error::Error for AssetError {}

pub trait AssetProvider {
    /// Load every `AssetKey` image and sound up front. Called once, before
    /// the start screen; any failure aborts the run.
    fn preload(&mut self) -> Result<(), AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(1_000);
        assert_eq!(clock.now_ms(), 1_000);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 1_250);
        clock.set(0);
        assert_eq!(clock.now_ms(), 0);
    }
}
