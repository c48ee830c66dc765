//! Screen state machine
//!
//! Start, main game and game over are states of one `Session`; every frame
//! calls `Session::frame` with the held keys, the drained input events and a
//! single `now_ms` sample. Nothing here blocks: fades and the quit-sound
//! delay are deadlines checked against the frame clock.

use crate::audio::SoundCue;
use crate::config::GameConfig;
use crate::consts::*;
use crate::platform::{DisplayMode, InputEvent};
use crate::render::{self, DrawOp};
use crate::sim::{tick, FrameInput, FrameOutcome, GameState};
use crate::ui::Button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    /// Fade to black before gameplay begins; session clocks start when it
    /// completes
    FadeToGame { until_ms: u64, from_game_over: bool },
    MainGame,
    GameOver,
    /// Quit was clicked; exit once the click sound had time to play
    ExitPending { at_ms: u64 },
}

/// The clickable buttons of all three screens
#[derive(Debug, Clone)]
pub struct MenuButtons {
    pub start: Button,
    pub start_quit: Button,
    pub cont: Button,
    pub over_quit: Button,
    pub game_quit: Button,
}

impl MenuButtons {
    fn new(cfg: &GameConfig) -> Self {
        let cx = cfg.windowed_w / 2;
        Self {
            start: Button::new("START", cx, cfg.windowed_h / 2, 48),
            start_quit: Button::new("QUIT", cx, cfg.windowed_h / 2 + 80, 48),
            cont: Button::new("CONTINUE", cx, cfg.windowed_h / 2 + 40, 48),
            over_quit: Button::new("QUIT", cx, cfg.windowed_h / 2 + 120, 48),
            game_quit: Button::new(
                "QUIT",
                cfg.screen_w - cfg.unit.w(4.0),
                cfg.unit.h(3.0),
                cfg.unit.h(3.0),
            ),
        }
    }
}

/// What one frame hands back to the runner
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub draw: Vec<DrawOp>,
    pub cues: Vec<SoundCue>,
    /// Display mode change requested this frame
    pub display: Option<DisplayMode>,
    pub exit: bool,
}

/// One process-lifetime session: the screens and the game they share
pub struct Session {
    pub cfg: GameConfig,
    pub screen: Screen,
    pub game: GameState,
    pub buttons: MenuButtons,
    /// Start-screen loop needs (re)starting on the next start frame
    announce_start_loop: bool,
}

impl Session {
    pub fn new(cfg: GameConfig, seed: u64, now_ms: u64) -> Self {
        let buttons = MenuButtons::new(&cfg);
        let game = GameState::new(&cfg, seed, now_ms);
        Self {
            cfg,
            screen: Screen::Start,
            game,
            buttons,
            announce_start_loop: true,
        }
    }

    /// Advance whichever screen is active by one frame
    pub fn frame(
        &mut self,
        held: &FrameInput,
        events: &[InputEvent],
        now_ms: u64,
    ) -> FrameOutput {
        let mut out = FrameOutput {
            draw: Vec::new(),
            cues: Vec::new(),
            display: None,
            exit: false,
        };

        // Window close bypasses the quit-sound delay
        if events.contains(&InputEvent::Quit) {
            out.cues.push(SoundCue::StopAll);
            out.exit = true;
            return out;
        }

        match self.screen {
            Screen::Start => self.start_frame(events, now_ms, &mut out),
            Screen::FadeToGame {
                until_ms,
                from_game_over,
            } => self.fade_frame(until_ms, from_game_over, now_ms, &mut out),
            Screen::MainGame => self.main_game_frame(held, events, now_ms, &mut out),
            Screen::GameOver => self.game_over_frame(events, now_ms, &mut out),
            Screen::ExitPending { at_ms } => {
                out.draw.push(DrawOp::Clear(render::Color::BLACK));
                if now_ms >= at_ms {
                    out.exit = true;
                }
            }
        }
        out
    }

    fn start_frame(&mut self, events: &[InputEvent], now_ms: u64, out: &mut FrameOutput) {
        if self.announce_start_loop {
            self.announce_start_loop = false;
            out.cues.push(SoundCue::StartScreenLoopStart);
        }
        for event in events {
            match *event {
                InputEvent::PointerMove { x, y } => {
                    self.buttons.start.pointer_move(x, y);
                    self.buttons.start_quit.pointer_move(x, y);
                }
                InputEvent::PointerClick { x, y } => {
                    if self.buttons.start.hit(x, y) {
                        out.cues.push(SoundCue::UiStartClick);
                        out.cues.push(SoundCue::StartScreenLoopStop);
                        out.cues.push(SoundCue::Vroom);
                        self.screen = Screen::FadeToGame {
                            until_ms: now_ms + FADE_DURATION_MS,
                            from_game_over: false,
                        };
                    } else if self.buttons.start_quit.hit(x, y) {
                        self.request_quit(now_ms, out);
                    }
                }
                InputEvent::Quit => {}
            }
        }
        out.draw = render::start_frame(&self.cfg, &self.buttons.start, &self.buttons.start_quit);
    }

    fn fade_frame(
        &mut self,
        until_ms: u64,
        from_game_over: bool,
        now_ms: u64,
        out: &mut FrameOutput,
    ) {
        if now_ms >= until_ms {
            // Session clocks (timer, day-night, wave) start here, after the
            // fade, so the first visible second is second zero
            self.game.begin_session(&self.cfg, now_ms);
            self.screen = Screen::MainGame;
            out.display = Some(DisplayMode::Fullscreen);
            out.cues.push(SoundCue::SoundtrackStart);
            log::info!("session started (seed {})", self.game.seed);
            out.draw = render::main_game_frame(&self.game, &self.cfg, now_ms, &self.buttons.game_quit);
            return;
        }
        out.draw = if from_game_over {
            render::game_over_frame(
                &self.cfg,
                &self.game.stats,
                &self.buttons.cont,
                &self.buttons.over_quit,
            )
        } else {
            render::start_frame(&self.cfg, &self.buttons.start, &self.buttons.start_quit)
        };
        out.draw.push(DrawOp::FadeToBlack {
            alpha: render::fade_alpha(now_ms, until_ms),
        });
    }

    fn main_game_frame(
        &mut self,
        held: &FrameInput,
        events: &[InputEvent],
        now_ms: u64,
        out: &mut FrameOutput,
    ) {
        for event in events {
            match *event {
                InputEvent::PointerMove { x, y } => {
                    self.buttons.game_quit.pointer_move(x, y);
                }
                InputEvent::PointerClick { x, y } => {
                    if self.buttons.game_quit.hit(x, y) {
                        // Back to the start screen, not out of the process
                        out.cues.push(SoundCue::UiQuitClick);
                        out.cues.push(SoundCue::StopAll);
                        self.screen = Screen::Start;
                        self.announce_start_loop = true;
                        out.display = Some(DisplayMode::Windowed {
                            w: self.cfg.windowed_w,
                            h: self.cfg.windowed_h,
                        });
                        out.draw = render::start_frame(
                            &self.cfg,
                            &self.buttons.start,
                            &self.buttons.start_quit,
                        );
                        return;
                    }
                }
                InputEvent::Quit => {}
            }
        }

        let events = tick(&mut self.game, &self.cfg, held, now_ms);
        out.cues.extend(events.cues);
        match events.outcome {
            FrameOutcome::Running => {}
            FrameOutcome::LifeLost { game_over: false } => {
                self.game.reset_world(&self.cfg, now_ms);
                out.cues.push(SoundCue::SoundtrackStart);
            }
            FrameOutcome::LifeLost { game_over: true } => {
                self.screen = Screen::GameOver;
                out.display = Some(DisplayMode::Windowed {
                    w: self.cfg.windowed_w,
                    h: self.cfg.windowed_h,
                });
                out.cues.push(SoundCue::StopAll);
                out.cues.push(SoundCue::GameOverLoopStart);
                log::info!(
                    "game over after {} collisions, survived {}",
                    self.game.stats.collided.len(),
                    self.game.stats.high_score.as_deref().unwrap_or("00:00:00"),
                );
                out.draw = render::game_over_frame(
                    &self.cfg,
                    &self.game.stats,
                    &self.buttons.cont,
                    &self.buttons.over_quit,
                );
                return;
            }
        }
        out.draw = render::main_game_frame(&self.game, &self.cfg, now_ms, &self.buttons.game_quit);
    }

    fn game_over_frame(&mut self, events: &[InputEvent], now_ms: u64, out: &mut FrameOutput) {
        for event in events {
            match *event {
                InputEvent::PointerMove { x, y } => {
                    self.buttons.cont.pointer_move(x, y);
                    self.buttons.over_quit.pointer_move(x, y);
                }
                InputEvent::PointerClick { x, y } => {
                    if self.buttons.cont.hit(x, y) {
                        out.cues.push(SoundCue::UiStartClick);
                        out.cues.push(SoundCue::StopAll);
                        out.cues.push(SoundCue::Vroom);
                        self.screen = Screen::FadeToGame {
                            until_ms: now_ms + FADE_DURATION_MS,
                            from_game_over: true,
                        };
                    } else if self.buttons.over_quit.hit(x, y) {
                        self.request_quit(now_ms, out);
                    }
                }
                InputEvent::Quit => {}
            }
        }
        out.draw = render::game_over_frame(
            &self.cfg,
            &self.game.stats,
            &self.buttons.cont,
            &self.buttons.over_quit,
        );
    }

    fn request_quit(&mut self, now_ms: u64, out: &mut FrameOutput) {
        out.cues.push(SoundCue::UiQuitClick);
        out.cues.push(SoundCue::StopAll);
        self.screen = Screen::ExitPending {
            at_ms: now_ms + QUIT_SOUND_DELAY_MS,
        };
    }
}
