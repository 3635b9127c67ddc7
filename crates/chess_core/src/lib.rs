pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use fen::START_FEN;
pub use game::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use rules::*;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait: implemented by every automated opponent
// =============================================================================

/// Result of a move selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move (None if the side to move has no legal moves)
    pub best_move: Option<Move>,
    /// Score of the chosen move from the mover's point of view, in centipawns
    pub score: i32,
    /// Plies searched below each root move
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

/// Trait that all automated opponents implement.
///
/// Engines receive the live game and may play moves on it while thinking, but
/// must hand it back exactly as they found it.
pub trait Engine: Send {
    fn select_move(&mut self, game: &mut Game) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "chess-ai"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
