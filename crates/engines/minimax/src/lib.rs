//! Minimax Chess Engine
//!
//! Depth-limited minimax with alpha-beta pruning over a hand-tuned
//! evaluation. Captures are searched first, victims by value.
//!
//! The search runs against any [`RulesEngine`], so the same code drives a
//! [`Game`](chess_core::Game) or a scripted tree in tests.

pub mod eval;
pub mod ordering;
pub mod search;

use std::time::Instant;

use chess_core::{Engine, Game, RulesEngine, SearchResult};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use eval::{breakdown, evaluate, EvalBreakdown, Evaluator, HeuristicEvaluator, Score, SCORE_INF};
pub use ordering::{capture_value, order_moves};
pub use search::{minimax, search, select_move, SearchStats};

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 2;
/// Upper bound accepted through the `Depth` option.
pub const MAX_DEPTH: u8 = 6;

/// Search settings, loadable from the `[engine]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below each root move
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: DEFAULT_DEPTH }
    }
}

/// Alpha-beta engine with the heuristic evaluator.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    config: SearchConfig,
    evaluator: HeuristicEvaluator,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            evaluator: HeuristicEvaluator,
        }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::with_config(SearchConfig { depth })
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Best move for the side to move in `rules`, which is left as found.
    pub fn best_move<R: RulesEngine>(&self, rules: &mut R) -> SearchResult {
        let mut stats = SearchStats::default();
        let picked = select_move(rules, &self.evaluator, self.config.depth, &mut stats);

        SearchResult {
            best_move: picked.map(|(mv, _)| mv),
            score: picked.map_or(0, |(_, s)| s),
            depth: self.config.depth,
            nodes: stats.nodes,
        }
    }
}

impl Engine for MinimaxEngine {
    fn select_move(&mut self, game: &mut Game) -> SearchResult {
        let start = Instant::now();
        let result = self.best_move(game);

        match result.best_move {
            Some(mv) => info!(
                side = %game.side_to_move(),
                bestmove = %mv,
                score = result.score,
                depth = result.depth,
                nodes = result.nodes,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "move selected"
            ),
            None => info!(side = %game.side_to_move(), "no legal moves"),
        }
        result
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !name.eq_ignore_ascii_case("depth") {
            return false;
        }
        match value.trim().parse::<u8>() {
            Ok(d) => {
                self.config.depth = d.clamp(1, MAX_DEPTH);
                true
            }
            Err(_) => false,
        }
    }
}
