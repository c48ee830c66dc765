//! End-to-end screen flow tests driven through the public session API

use street_rush::consts::*;
use street_rush::platform::{DisplayMode, FixedClock, InputEvent};
use street_rush::platform::Clock;
use street_rush::sim::{FrameInput, Rect, Traffic, TrafficKind};
use street_rush::{GameConfig, Screen, Session};

fn new_session() -> (Session, FixedClock) {
    let clock = FixedClock::new(0);
    let session = Session::new(GameConfig::new(1920, 1080), 2024, clock.now_ms());
    (session, clock)
}

fn click(session: &Session, pick: fn(&Session) -> (i32, i32)) -> InputEvent {
    let (x, y) = pick(session);
    InputEvent::PointerClick { x, y }
}

fn start_center(s: &Session) -> (i32, i32) {
    (s.buttons.start.rect.center_x(), s.buttons.start.rect.center_y())
}

fn continue_center(s: &Session) -> (i32, i32) {
    (s.buttons.cont.rect.center_x(), s.buttons.cont.rect.center_y())
}

fn step(session: &mut Session, clock: &FixedClock, events: &[InputEvent]) {
    session.frame(&FrameInput::default(), events, clock.now_ms());
}

/// Run the start click and the fade, landing in the main game
fn begin(session: &mut Session, clock: &FixedClock) {
    let start = click(session, start_center);
    step(session, clock, &[start]);
    clock.advance(FADE_DURATION_MS);
    step(session, clock, &[]);
    assert_eq!(session.screen, Screen::MainGame);
}

/// Park a zero-speed car on the player so the next frame collides
fn force_collision(session: &mut Session) {
    let r = session.game.world.player.rect();
    session.game.world.cars.clear();
    session.game.world.cars.push(Traffic::new(
        TrafficKind::Car,
        0,
        Rect::new(r.x, r.y - r.h, r.w, r.h * 3),
        0.0,
    ));
}

#[test]
fn game_over_then_continue_restores_a_fresh_session() {
    let (mut session, clock) = new_session();
    begin(&mut session, &clock);

    // Burn down all three lives
    for life in (0..STARTING_LIVES).rev() {
        force_collision(&mut session);
        clock.advance(16);
        step(&mut session, &clock, &[]);
        assert_eq!(session.game.stats.remaining_lives, life);
    }
    assert_eq!(session.screen, Screen::GameOver);
    assert_eq!(session.game.stats.collided.len(), STARTING_LIVES as usize);
    let survived = session.game.stats.high_score.clone();
    assert!(survived.is_some());

    // Continue plays the fade again and rebuilds the session
    let cont = click(&session, continue_center);
    clock.advance(16);
    step(&mut session, &clock, &[cont]);
    assert!(matches!(session.screen, Screen::FadeToGame { .. }));
    clock.advance(FADE_DURATION_MS);
    step(&mut session, &clock, &[]);

    assert_eq!(session.screen, Screen::MainGame);
    assert_eq!(session.game.stats.remaining_lives, STARTING_LIVES);
    assert!(session.game.stats.collided.is_empty());
    assert!(session.game.stats.high_score.is_none());
    // Player is back at the canonical spawn column, on a traffic lane
    assert_eq!(
        session.game.world.player.pos.x as i32,
        session.cfg.player_spawn_x
    );
    let lane_y = session.game.world.player.pos.y as i32;
    assert!(session.cfg.car_lanes.contains(&lane_y));
    // The session timer restarted at the fade end
    assert_eq!(session.game.elapsed_timer_ms(clock.now_ms()), 0);
}

#[test]
fn timer_and_difficulty_survive_world_resets() {
    let (mut session, clock) = new_session();
    begin(&mut session, &clock);
    let origin = session.game.timer_start_ms;

    clock.advance(5_000);
    force_collision(&mut session);
    step(&mut session, &clock, &[]);

    assert_eq!(session.screen, Screen::MainGame);
    assert_eq!(session.game.timer_start_ms, origin, "life loss keeps the clock");
}

#[test]
fn quit_exit_waits_for_the_click_sound() {
    let (mut session, clock) = new_session();
    let quit = InputEvent::PointerClick {
        x: session.buttons.start_quit.rect.center_x(),
        y: session.buttons.start_quit.rect.center_y(),
    };
    let out = session.frame(&FrameInput::default(), &[quit], clock.now_ms());
    assert!(!out.exit);

    clock.advance(QUIT_SOUND_DELAY_MS - 1);
    let out = session.frame(&FrameInput::default(), &[], clock.now_ms());
    assert!(!out.exit);

    clock.advance(1);
    let out = session.frame(&FrameInput::default(), &[], clock.now_ms());
    assert!(out.exit);
}

#[test]
fn gameplay_runs_fullscreen_menus_run_windowed() {
    let (mut session, clock) = new_session();
    let start = click(&session, start_center);
    step(&mut session, &clock, &[start]);
    clock.advance(FADE_DURATION_MS);
    let out = session.frame(&FrameInput::default(), &[], clock.now_ms());
    assert_eq!(out.display, Some(DisplayMode::Fullscreen));

    session.game.stats.remaining_lives = 1;
    force_collision(&mut session);
    clock.advance(16);
    let out = session.frame(&FrameInput::default(), &[], clock.now_ms());
    assert_eq!(session.screen, Screen::GameOver);
    assert_eq!(
        out.display,
        Some(DisplayMode::Windowed {
            w: session.cfg.windowed_w,
            h: session.cfg.windowed_h
        })
    );
}

#[test]
fn held_keys_steer_the_player() {
    let (mut session, clock) = new_session();
    begin(&mut session, &clock);
    session.game.world.cars.clear();

    let y0 = session.game.world.player.pos.y;
    let held = FrameInput {
        up: true,
        ..FrameInput::default()
    };
    for _ in 0..10 {
        clock.advance(8);
        session.frame(&held, &[], clock.now_ms());
    }
    assert!(session.game.world.player.pos.y < y0);
}
