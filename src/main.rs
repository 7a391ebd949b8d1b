//! Terminal Ninja Thief runner (default binary).
//!
//! Settings come from the environment (see `ninja_thief::assets::LaunchConfig`).
//! It uses crossterm for input and a custom framebuffer-based renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use ninja_thief::assets::{load_config, LaunchConfig};
use ninja_thief::core::LevelSnapshot;
use ninja_thief::event_log::EventLog;
use ninja_thief::input::{map_command, should_quit, Command, KeyboardInput};
use ninja_thief::session::{LevelStart, Session};
use ninja_thief::term::{FrameBuffer, LevelView, TerminalRenderer, Viewport};
use ninja_thief::types::TICK_MS;

fn main() -> Result<()> {
    let launch = LaunchConfig::from_env();
    let config = load_config(launch.config_path.as_deref())?;
    let session = Session::load(&launch.levels_dir, &config, launch.seed, launch.start_level)?;
    let log = EventLog::open(launch.event_log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: Session, mut log: EventLog) -> Result<()> {
    let view = LevelView::default();
    let mut input = KeyboardInput::new();
    let mut snap = LevelSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let level = session.level();
    log.record(
        0,
        &LevelStart {
            level: level.level_number(),
            score: level.player().score(),
        }
        .into(),
    );

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let dt = TICK_MS as f32 / 1000.0;
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.level().snapshot_into(&mut snap);
        view.render_into(&snap, session.paused(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            log.flush();
                            return Ok(());
                        }
                        match map_command(key) {
                            Some(Command::Pause) => session.toggle_pause(),
                            Some(Command::Restart) => {
                                let start = session.restart();
                                input.reset();
                                log.record(session.frame(), &start.into());
                            }
                            None => {
                                input.handle_key_press(key.code);
                            }
                        }
                    }
                    KeyEventKind::Repeat => input.handle_key_repeat(key.code),
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            input.update();
            let report = session.update(dt, &input);
            input.end_frame();

            log.record_frame(session.frame(), &report);
            log.flush();
        }
    }
}
