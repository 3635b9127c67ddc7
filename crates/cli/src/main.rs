//! chess-ai: play against the minimax engine, drive it over UCI, or pit it
//! against the random baseline.

mod config;
mod match_runner;
mod play;
mod uci;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chess_core::{Engine, Game, Position, RulesEngine, START_FEN};
use clap::{Args, Parser, Subcommand};
use config::{AppConfig, Side};
use match_runner::{MatchReport, MatchRunner};
use minimax_engine::{MinimaxEngine, SearchConfig};
use play::PlaySettings;
use random_engine::RandomEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess-ai", author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to ./chess-ai.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the AI in the terminal
    Play(PlayArgs),
    /// Speak the UCI protocol on stdin/stdout
    Uci,
    /// Print the AI's move for one position
    Bestmove(BestmoveArgs),
    /// Minimax engine against the random baseline
    Match(MatchArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Colour the AI plays
    #[arg(long, value_enum)]
    ai_color: Option<Side>,
    /// Search depth below each root move
    #[arg(long)]
    depth: Option<u8>,
    /// Pause before each AI reply
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Start from this position instead of the initial one
    #[arg(long)]
    fen: Option<String>,
}

#[derive(Args, Debug)]
struct BestmoveArgs {
    #[arg(long, default_value = START_FEN)]
    fen: String,
    #[arg(long)]
    depth: Option<u8>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[arg(long)]
    games: Option<u32>,
    /// Plies per game before it is scored as a draw
    #[arg(long)]
    max_moves: Option<u32>,
    /// Seed of the random opponent
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    depth: Option<u8>,
    /// Write the result as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // stdout carries the UCI protocol
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn engine_for(config: &AppConfig, depth: Option<u8>) -> MinimaxEngine {
    MinimaxEngine::with_config(SearchConfig {
        depth: depth.unwrap_or(config.engine.depth),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play(args) => run_play(&config, args),
        Command::Uci => {
            let mut engine = engine_for(&config, None);
            let depth = engine.config().depth;
            uci::run(io::stdin().lock(), &mut io::stdout(), &mut engine, depth)
        }
        Command::Bestmove(args) => run_bestmove(&config, args),
        Command::Match(args) => run_match(&config, args),
    }
}

fn run_play(config: &AppConfig, args: PlayArgs) -> Result<()> {
    let start = match &args.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("invalid --fen {fen:?}"))?,
        None => Position::startpos(),
    };
    let settings = PlaySettings {
        ai_color: args.ai_color.unwrap_or(config.play.ai_color).into(),
        delay: Duration::from_millis(args.delay_ms.unwrap_or(config.play.delay_ms)),
        start,
    };
    let mut engine = engine_for(config, args.depth);
    info!(depth = engine.config().depth, ai = %settings.ai_color, "starting game");

    play::run(io::stdin().lock(), &mut io::stdout(), &mut engine, &settings)
}

fn run_bestmove(config: &AppConfig, args: BestmoveArgs) -> Result<()> {
    let mut game = Game::from_fen(&args.fen).with_context(|| format!("invalid --fen {:?}", args.fen))?;
    let mut engine = engine_for(config, args.depth);
    let result = engine.select_move(&mut game);

    let mut out = io::stdout().lock();
    match result.best_move {
        Some(mv) => writeln!(out, "{mv} {}", result.score)?,
        None => writeln!(out, "0000 {}", game.status())?,
    }
    Ok(())
}

fn run_match(config: &AppConfig, args: MatchArgs) -> Result<()> {
    let mut settings = config.matches.clone();
    settings.games = args.games.unwrap_or(settings.games);
    settings.max_moves = args.max_moves.unwrap_or(settings.max_moves);
    settings.seed = args.seed.unwrap_or(settings.seed);

    let mut engine = engine_for(config, args.depth);
    let mut opponent = RandomEngine::seeded(settings.seed);
    let depth = engine.config().depth;

    println!("=== Match: {} vs {} ===", engine.name(), opponent.name());
    println!("Games: {}, Depth: {}, Seed: {}", settings.games, depth, settings.seed);

    let runner = MatchRunner::new(settings.clone());
    let result = runner.run_match(&mut engine, &mut opponent);

    println!(
        "{}: {} wins, {} losses, {} draws in {} games",
        engine.name(),
        result.wins,
        result.losses,
        result.draws,
        result.total_games()
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    if let Some(path) = &args.output {
        let report = MatchReport {
            engine: engine.name().to_string(),
            opponent: opponent.name().to_string(),
            depth,
            config: settings,
            score: result.score(),
            result,
        };
        report.save(path)?;
        info!(path = %path.display(), "match report written");
    }
    Ok(())
}
