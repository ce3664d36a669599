//! NeonLink terminal runner.
//!
//! Single-threaded frame loop: keyboard events via crossterm, gesture labels
//! polled from the link, fixed 16 ms session ticks and a diffed framebuffer
//! redraw every frame.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use neonlink::input::{handle_key_event, is_press, should_quit};
use neonlink::link::Link;
use neonlink::session::{JsonFileStore, Session, SessionConfig, SessionSnapshot};
use neonlink::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use neonlink::types::TICK_MS;

/// Ticks replayed at most per frame after a stall
const MAX_CATCH_UP_TICKS: u32 = 5;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    let seed = config.seed.unwrap_or_else(rand::random);
    let store = JsonFileStore::open(&config.best_score_path);
    let mut session = Session::from_seed(seed, store);

    let mut link = Link::start_from_env()?;
    if !link.has_recognizer() {
        eprintln!("[Link] No gesture recognizer configured; keyboard only");
    }

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &mut session, &mut link));

    // Always try to restore terminal state.
    let _ = term.exit();
    link.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session<JsonFileStore>, link: &mut Link) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let mut steps = 0;
        while last_tick.elapsed() >= tick {
            last_tick += tick;
            steps += 1;
            if steps > MAX_CATCH_UP_TICKS {
                last_tick = Instant::now();
                break;
            }
            let gesture = link.poll_gesture();
            session.tick(TICK_MS, gesture);
        }

        for event in session.drain_events() {
            link.log(&event);
        }
    }
}
