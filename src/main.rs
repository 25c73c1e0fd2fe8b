//! Terminal runner (default binary).
//!
//! Owns the frame clock and wires crossterm input into the engine and the
//! engine's snapshot into the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal;
use log::{debug, error, info};

use neon_tetris::config::{self, Args};
use neon_tetris::core::{GameSnapshot, GameState};
use neon_tetris::input::{handle_key_event, should_quit};
use neon_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args = Args::parse();
    config::init_logging(args.log_file.as_deref())?;

    let seed = args.resolve_seed();
    info!("neon-tetris starting: seed {} frame {}ms", seed, args.frame_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args, seed);

    // Always try to restore terminal state.
    let restored = term.exit();
    if let Err(e) = &result {
        error!("runner failed: {:#}", e);
    }
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, args: &Args, seed: u64) -> Result<()> {
    let mut game = GameState::new(seed);
    if !args.paused {
        game.start();
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(u64::from(args.frame_ms));
    let epoch = Instant::now();
    let mut next_frame = epoch;

    loop {
        if Instant::now() >= next_frame {
            let now_ms = u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
            game.advance_to(now_ms);
            next_frame = Instant::now() + frame;
        }

        if let Some(event) = game.take_last_event() {
            debug!(
                "lock: {} line(s) +{} total {}{}",
                event.lines_cleared,
                event.score_gained,
                game.score(),
                if event.game_over { " (game over)" } else { "" }
            );
        }

        game.snapshot_into(&mut snap);
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = next_frame.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    info!("quit at score {}", game.score());
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    debug!("action {}", action.as_str());
                    game.apply_action(action);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
