//! Street Rush entry point
//!
//! The core is headless; wiring a real window, renderer and mixer in means
//! implementing the `platform` traits for them. This binary runs a short
//! scripted headless session as a smoke demo.

use street_rush::audio::SoundCue;
use street_rush::platform::{
    AssetError, AssetProvider, AudioSink, DisplayController, DisplayMode, InputEvent, InputSource,
    Renderer, SystemClock,
};
use street_rush::render::DrawOp;
use street_rush::runner;
use street_rush::sim::FrameInput;

/// Clicks START on the first poll, closes the window a few seconds later
struct ScriptedInput {
    frame: u32,
    start_center: (i32, i32),
}

impl InputSource for ScriptedInput {
    fn held(&self) -> FrameInput {
        FrameInput {
            up: self.frame % 240 < 120,
            down: self.frame % 240 >= 120,
            ..FrameInput::default()
        }
    }

    fn poll(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        match self.frame {
            1 => vec![InputEvent::PointerClick {
                x: self.start_center.0,
                y: self.start_center.1,
            }],
            600 => vec![InputEvent::Quit],
            _ => Vec::new(),
        }
    }
}

struct NullRenderer {
    ops_seen: usize,
}

impl Renderer for NullRenderer {
    fn submit(&mut self, ops: &[DrawOp]) {
        self.ops_seen += ops.len();
    }

    fn present(&mut self) {}
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("audio cue: {:?}", cue);
    }
}

struct HeadlessDisplay {
    w: i32,
    h: i32,
}

impl DisplayController for HeadlessDisplay {
    fn set_mode(&mut self, mode: DisplayMode) {
        log::info!("display mode: {:?}", mode);
    }

    fn screen_size(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}

struct NoAssets;

impl AssetProvider for NoAssets {
    fn preload(&mut self) -> Result<(), AssetError> {
        Ok(())
    }
}

fn main() {
    env_logger::init();
    log::info!("Street Rush (headless demo) starting...");

    let clock = SystemClock::new();
    let display_size = (1920, 1080);
    let mut input = ScriptedInput {
        frame: 0,
        // START sits at the center of the windowed start screen
        start_center: (600, 400),
    };
    let mut renderer = NullRenderer { ops_seen: 0 };
    let mut audio = LogAudio;
    let mut display = HeadlessDisplay {
        w: display_size.0,
        h: display_size.1,
    };
    let mut assets = NoAssets;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match runner::run(
        &clock,
        &mut input,
        &mut renderer,
        &mut audio,
        &mut display,
        &mut assets,
        seed,
    ) {
        Ok(()) => log::info!("demo finished, {} draw ops submitted", renderer.ops_seen),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
