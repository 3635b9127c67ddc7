//! Match runner for playing games between engines

use std::path::Path;

use anyhow::{Context, Result};
use chess_core::{Color, Engine, Game, GameStatus, RulesEngine};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::MatchConfig;

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }
}

/// What `match --output` writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub engine: String,
    pub opponent: String,
    pub depth: u8,
    pub config: MatchConfig,
    pub result: MatchResult,
    pub score: f64,
}

impl MatchReport {
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing match report")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::default();

        for game_num in 0..self.config.games {
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let game_result = if engine1_white {
                self.play_game(engine1, engine2)
            } else {
                self.play_game(engine2, engine1).flipped()
            };
            result.record(game_result);

            let outcome = match game_result {
                GameResult::Win => "1-0",
                GameResult::Loss => "0-1",
                GameResult::Draw => "1/2",
            };
            info!(
                game = game_num + 1,
                of = self.config.games,
                outcome,
                color = if engine1_white { "W" } else { "B" },
                wins = result.wins,
                losses = result.losses,
                draws = result.draws,
                "game finished"
            );
        }

        result
    }

    /// Play a single game, returns result from white's perspective
    pub fn play_game(&self, white: &mut dyn Engine, black: &mut dyn Engine) -> GameResult {
        let mut game = Game::new();
        white.new_game();
        black.new_game();

        for _ply in 0..self.config.max_moves {
            match game.status() {
                GameStatus::Playing => {}
                GameStatus::Checkmate { winner: Color::White } => return GameResult::Win,
                GameStatus::Checkmate { winner: Color::Black } => return GameResult::Loss,
                GameStatus::Stalemate | GameStatus::Draw(_) => return GameResult::Draw,
            }

            let mover = game.side_to_move();
            let result = match mover {
                Color::White => white.select_move(&mut game),
                Color::Black => black.select_move(&mut game),
            };

            let Some(mv) = result.best_move else {
                warn!(side = %mover, "engine gave up in a live position");
                return forfeit(mover);
            };
            if let Err(e) = game.apply(mv) {
                warn!(side = %mover, error = %e, "engine played an illegal move");
                return forfeit(mover);
            }
        }

        // Max moves reached
        GameResult::Draw
    }
}

fn forfeit(loser: Color) -> GameResult {
    match loser {
        Color::White => GameResult::Loss,
        Color::Black => GameResult::Win,
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
