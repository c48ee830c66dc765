//! The outer frame loop
//!
//! One loop serves all screens; the session state machine decides what the
//! frame means. The loop owns pacing and the platform handles; everything
//! else lives in `Session`.

use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::consts::FRAME_RATE;
use crate::platform::{
    AssetError, AssetProvider, AudioSink, Clock, DisplayController, InputSource, Renderer,
};
use crate::screens::Session;

/// Run a session to completion. Asset preloading happens before the first
/// frame; a missing asset aborts the run.
pub fn run<C, I, R, A, D, P>(
    clock: &C,
    input: &mut I,
    renderer: &mut R,
    audio: &mut A,
    display: &mut D,
    assets: &mut P,
    seed: u64,
) -> Result<(), AssetError>
where
    C: Clock,
    I: InputSource,
    R: Renderer,
    A: AudioSink,
    D: DisplayController,
    P: AssetProvider,
{
    assets.preload()?;

    let (screen_w, screen_h) = display.screen_size();
    let cfg = GameConfig::new(screen_w, screen_h);
    let mut session = Session::new(cfg, seed, clock.now_ms());
    log::info!("running at {}x{} with seed {}", screen_w, screen_h, seed);

    let frame_budget = Duration::from_millis(1_000 / FRAME_RATE as u64);
    loop {
        let frame_start = Instant::now();

        let now_ms = clock.now_ms();
        let events = input.poll();
        let held = input.held();
        let out = session.frame(&held, &events, now_ms);

        renderer.submit(&out.draw);
        renderer.present();
        for cue in out.cues {
            audio.play(cue);
        }
        if let Some(mode) = out.display {
            display.set_mode(mode);
        }
        if out.exit {
            log::info!("session ended");
            return Ok(());
        }

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
}
