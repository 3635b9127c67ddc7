//! Random Move Chess Engine
//!
//! Picks uniformly among the legal moves. Serves as the sparring partner for
//! `chess-ai match`: any searching engine should beat it easily.

use chess_core::{Engine, Game, RulesEngine, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A chess engine that plays random legal moves.
///
/// A seeded engine draws from one stream for its whole life, so a match
/// replays exactly for the same seed while its games still differ.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn select_move(&mut self, game: &mut Game) -> SearchResult {
        let moves = game.legal_moves();
        let best_move = moves.choose(&mut self.rng).copied();

        SearchResult {
            best_move,
            score: 0,
            depth: 0,
            nodes: 1,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
