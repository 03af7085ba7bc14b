//! Terminal Minesweeper runner.
//!
//! Owns the event loop: render, poll, dispatch. Keyboard moves a cell
//! cursor; the mouse reveals (left) or flags (right) the cell under the
//! pointer. Input polling uses a short timeout only so the displayed timer
//! keeps advancing - game state changes exclusively on input events.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use tui_mines::core::GameState;
use tui_mines::input::{map_key_event, should_quit};
use tui_mines::term::{BoardView, FrameBuffer, TerminalRenderer, Theme, Viewport};
use tui_mines::types::{GameAction, GameConfig, DEFAULT_CELL_WIDTH, MAX_CELL_WIDTH};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, cell_w) = parse_args(&args)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, cell_w);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Parse `[width height bombs [cell_width]]`, defaulting when absent.
fn parse_args(args: &[String]) -> Result<(GameConfig, u16)> {
    let usage = "usage: tui-mines [width height bombs [cell_width]]";

    let config = match args.len() {
        0 => GameConfig::default(),
        3 | 4 => {
            let width = args[0].parse().context(usage)?;
            let height = args[1].parse().context(usage)?;
            let bombs = args[2].parse().context(usage)?;
            GameConfig::new(width, height, bombs)
                .context("board must be non-empty with bombs <= width * height")?
        }
        _ => bail!(usage),
    };

    let cell_w = match args.len() {
        4 => args[3].parse().context(usage)?,
        _ => DEFAULT_CELL_WIDTH,
    };
    if cell_w == 0 || cell_w > MAX_CELL_WIDTH {
        bail!("cell_width must be between 1 and {}", MAX_CELL_WIDTH);
    }

    Ok((config, cell_w))
}

fn run(term: &mut TerminalRenderer, config: GameConfig, cell_w: u16) -> Result<()> {
    let mut rng = rand::rng();
    let mut game = GameState::new(config);
    game.new_game();

    let mut view = BoardView::new(cell_w, 1).with_theme(Theme::random(&mut rng));
    let mut cursor = (config.width() / 2, config.height() / 2);
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&game, cursor, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Short timeout so the TIME readout repaints while playing.
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = map_key_event(key) {
                    match action {
                        GameAction::MoveUp => cursor.1 = cursor.1.saturating_sub(1),
                        GameAction::MoveDown => cursor.1 = (cursor.1 + 1).min(config.height() - 1),
                        GameAction::MoveLeft => cursor.0 = cursor.0.saturating_sub(1),
                        GameAction::MoveRight => cursor.0 = (cursor.0 + 1).min(config.width() - 1),
                        GameAction::Reveal => game.reveal(cursor.0, cursor.1),
                        GameAction::ToggleFlagMode => game.toggle_flag_mode(),
                        GameAction::NewGame => {
                            game.new_game();
                            view.set_theme(Theme::random(&mut rng));
                        }
                    }
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some((x, y)) = view.hit_test(&game, viewport, mouse.column, mouse.row) {
                        cursor = (x, y);
                        game.reveal(x, y);
                    }
                }
                MouseEventKind::Down(MouseButton::Right) => {
                    if let Some((x, y)) = view.hit_test(&game, viewport, mouse.column, mouse.row) {
                        game.toggle_flag(x, y);
                    }
                }
                _ => {}
            },
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
