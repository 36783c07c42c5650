//! Terminal Twotris runner.
//!
//! Two players on one keyboard: W/A/S/D for the left piece, arrow keys for the
//! right one. Input comes from crossterm, frames are drawn through the
//! diffing framebuffer renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use twotris::cli::{parse_args, USAGE};
use twotris::core::{Game, GameSnapshot};
use twotris::input::{should_quit, CommandBatch};
use twotris::stats::SessionStats;
use twotris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use twotris::types::{Command, FRAME_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cli) = parse_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = cli.engine_config(clock_seed());
    let seed = config.seed;
    let mut game = Game::try_new(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    let stats = result?;
    eprintln!("[Session] seed={} {}", seed, stats);
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<SessionStats> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut batch = CommandBatch::new();
    let mut stats = SessionStats::default();

    let frame_duration = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        game.handle_command(Command::Quit);
                    } else {
                        batch.push_key(key, game.state());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if game.should_quit() {
            return Ok(stats);
        }

        // Frame.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame_duration {
            last_frame = Instant::now();
            game.frame(elapsed.as_millis() as u32, batch.as_slice());
            batch.clear();

            stats.record_events(&game.take_events());
            game.snapshot_into(&mut snap);
            stats.observe(&snap);
        }
    }
}
