//! UCI protocol loop. Only protocol lines go to `out`; diagnostics go through
//! `tracing`, which writes to stderr.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use chess_core::{Engine, Game, RulesEngine};
use minimax_engine::MAX_DEPTH;
use tracing::{debug, warn};

/// Builds the game a `position` command describes.
///
/// `args` is everything after the word `position`:
/// `startpos [moves ...]` or `fen <6 fields> [moves ...]`.
pub fn parse_position(args: &[&str]) -> Result<Game> {
    let moves_at = args.iter().position(|&t| t == "moves").unwrap_or(args.len());
    let mut game = match args.first() {
        Some(&"startpos") => Game::new(),
        Some(&"fen") => {
            let fen = args[1..moves_at].join(" ");
            Game::from_fen(&fen).with_context(|| format!("invalid FEN {fen:?}"))?
        }
        Some(other) => bail!("expected startpos or fen, got {other:?}"),
        None => bail!("empty position command"),
    };

    for text in args.iter().skip(moves_at + 1) {
        game.play_uci(text).with_context(|| format!("move {text}"))?;
    }
    Ok(game)
}

/// `setoption name <name...> value <value...>`
fn parse_setoption(parts: &[&str]) -> Option<(String, String)> {
    let name_at = parts.iter().position(|&x| x == "name")?;
    let value_at = parts.iter().position(|&x| x == "value")?;
    if value_at <= name_at {
        return None;
    }
    let name = parts[name_at + 1..value_at].join(" ");
    let value = parts[value_at + 1..].join(" ");
    Some((name, value))
}

pub fn run<I, O, E>(input: I, out: &mut O, engine: &mut E, depth: u8) -> Result<()>
where
    I: BufRead,
    O: Write,
    E: Engine + ?Sized,
{
    let mut game = Game::new();

    for line in input.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            continue;
        };

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", engine.name())?;
                writeln!(out, "id author {}", engine.author())?;
                writeln!(out, "option name Depth type spin default {depth} min 1 max {MAX_DEPTH}")?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => match parse_setoption(&parts) {
                Some((name, value)) => {
                    if !engine.set_option(&name, &value) {
                        warn!(name = %name, value = %value, "unsupported option");
                    }
                }
                None => warn!(line = %line, "malformed setoption"),
            },
            "ucinewgame" => {
                game = Game::new();
                engine.new_game();
            }
            "position" => match parse_position(&parts[1..]) {
                Ok(g) => game = g,
                Err(e) => warn!(error = %format!("{e:#}"), "position rejected, keeping the previous one"),
            },
            "go" => {
                let result = engine.select_move(&mut game);
                writeln!(
                    out,
                    "info depth {} score cp {} nodes {}",
                    result.depth, result.score, result.nodes
                )?;
                match result.best_move {
                    Some(mv) => writeln!(out, "bestmove {mv}")?,
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            "quit" => break,
            _ => debug!(line = %line, "ignored"),
        }
        out.flush().context("writing to stdout")?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
