//! Terminal dice runner (default binary).
//!
//! Drives `GameState` at a fixed 30 Hz tick, reads keyboard and mouse input with
//! crossterm, and draws through the framebuffer renderer.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use dice_o_metric::core::geometry::{canonical_position, face_center};
use dice_o_metric::core::{GameConfig, GameSnapshot, GameState};
use dice_o_metric::input::{handle_key_event, handle_mouse_event, should_quit, Cursor, PointerEvent};
use dice_o_metric::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use dice_o_metric::types::{GameAction, Point, START_LEVEL, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "dice-o-metric", about = "Isometric dice-matching puzzle")]
struct Args {
    /// Seed for boards and move queues (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Level to start (and restart) from
    #[arg(long, default_value_t = START_LEVEL)]
    level: u32,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = GameConfig {
        seed: args.seed.unwrap_or_else(clock_seed),
        start_level: args.level.max(1),
    };
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn cursor_point(cursor: &Cursor) -> Point {
    face_center(canonical_position(cursor.pos()))
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut game = GameState::with_config(config);
    let view = GameView::default();
    let mut cursor = Cursor::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        view.render_into_with_cursor(&snap, Some(cursor.pos()), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if cursor.apply(action) {
                            game.set_pointer(Some(cursor_point(&cursor)));
                        } else if action == GameAction::Select && game.is_animating() {
                            debug!("select ignored while animating");
                        } else {
                            game.apply_action(action, cursor_point(&cursor));
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    let area = view.board_area(viewport);
                    match handle_mouse_event(mouse) {
                        Some(PointerEvent::Hover { column, row }) => {
                            let point = area.to_board_point(column, row);
                            game.set_pointer(point);
                            if let Some(cell) = point.and_then(|p| game.hovered(p)) {
                                cursor.set(cell);
                            }
                        }
                        Some(PointerEvent::Click { column, row }) => {
                            if let Some(point) = area.to_board_point(column, row) {
                                if !game.is_animating() {
                                    game.select_die(point);
                                }
                            }
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();
        }
    }
}
