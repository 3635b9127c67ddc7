//! Human against the AI in the terminal.
//!
//! Moves are typed in coordinate notation (`e2e4`, `e7e8q`). A pawn reaching
//! the last rank without a piece letter becomes a queen.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chess_core::{Color, Engine, Game, Position, RulesEngine};
use tracing::{debug, warn};

pub struct PlaySettings {
    pub ai_color: Color,
    pub delay: Duration,
    /// Position `new` returns to
    pub start: Position,
}

const HELP: &str = "commands: <move> (e.g. e2e4), undo, new, fen, help, quit";

/// Board as text, rank 8 on top, White in upper case.
pub fn render_board(pos: &Position) -> String {
    let mut s = String::with_capacity(200);
    for rank in (0..8u8).rev() {
        s.push((b'1' + rank) as char);
        for file in 0..8u8 {
            s.push(' ');
            s.push(pos.piece_at(rank * 8 + file).map_or('.', |pc| pc.to_char()));
        }
        s.push('\n');
    }
    s.push_str("  a b c d e f g h\n");
    s
}

/// Runs the game loop until `quit` or end of input.
pub fn run<I, O, E>(input: I, out: &mut O, engine: &mut E, settings: &PlaySettings) -> Result<()>
where
    I: BufRead,
    O: Write,
    E: Engine + ?Sized,
{
    let mut game = Game::from_position(settings.start.clone());
    let mut lines = input.lines();
    let mut redraw = true;

    writeln!(out, "You play {}. {HELP}", settings.ai_color.other())?;

    loop {
        let status = game.status();
        if redraw {
            write!(out, "\n{}", render_board(game.position()))?;
            if status.is_over() {
                writeln!(out, "Game over: {status}")?;
            } else if game.in_check() {
                writeln!(out, "{} to move, in check", game.side_to_move())?;
            } else {
                writeln!(out, "{} to move", game.side_to_move())?;
            }
            redraw = false;
        }

        if !status.is_over() && game.side_to_move() == settings.ai_color {
            if !settings.delay.is_zero() {
                out.flush()?;
                thread::sleep(settings.delay);
            }
            let result = engine.select_move(&mut game);
            let Some(mv) = result.best_move else {
                warn!("engine returned no move in a live position");
                break;
            };
            game.apply(mv)?;
            writeln!(out, "AI plays {mv}")?;
            redraw = true;
            continue;
        }

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let cmd = line.trim();
        debug!(cmd, "input");

        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "fen" => writeln!(out, "{}", game.to_fen())?,
            "new" => {
                game = Game::from_position(settings.start.clone());
                engine.new_game();
                redraw = true;
            }
            "undo" => {
                if take_back_turn(&mut game, settings.ai_color) {
                    redraw = true;
                } else {
                    writeln!(out, "Nothing to undo")?;
                }
            }
            _ if status.is_over() => writeln!(out, "The game is over: type new, undo or quit")?,
            text => match game.play_uci(text) {
                Ok(_) => redraw = true,
                Err(e) => writeln!(out, "Illegal move: {e}")?,
            },
        }
    }

    Ok(())
}

/// Takes back the AI's reply and the human move before it, leaving the human
/// to move. Returns false when there is no human move to take back.
fn take_back_turn(game: &mut Game, ai_color: Color) -> bool {
    let plies = game.ply_count();
    let needed = if game.side_to_move() == ai_color { 1 } else { 2 };
    if plies < needed {
        return false;
    }
    for _ in 0..needed {
        game.undo();
    }
    true
}

#[cfg(test)]
#[path = "play_tests.rs"]
mod play_tests;
