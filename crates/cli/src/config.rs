//! `chess-ai.toml` settings. Every field is optional; command-line flags win
//! over file values.

use std::path::Path;

use anyhow::{Context, Result};
use chess_core::Color;
use clap::ValueEnum;
use minimax_engine::SearchConfig;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "chess-ai.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: SearchConfig,
    pub play: PlayConfig,
    #[serde(rename = "match")]
    pub matches: MatchConfig,
}

impl AppConfig {
    /// Reads `path`, or `chess-ai.toml` if present, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Which colour a participant plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// `[play]`: the interactive game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub ai_color: Side,
    /// Pause before each AI reply, in milliseconds
    pub delay_ms: u64,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            ai_color: Side::Black,
            delay_ms: 500,
        }
    }
}

/// `[match]`: minimax engine against the random baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub games: u32,
    /// Plies per game before it is scored as a draw
    pub max_moves: u32,
    /// Seed of the random opponent
    pub seed: u64,
    /// Alternate colours each game, starting with the engine as White
    pub alternate_colors: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_moves: 200,
            seed: 0,
            alternate_colors: true,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
