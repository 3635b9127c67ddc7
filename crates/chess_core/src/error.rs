//! Errors reported by the rules engine.

use thiserror::Error;

/// A FEN string that could not be parsed into a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks in FEN board section, found {0}")]
    RankCount(usize),

    #[error("rank {rank} of FEN board section does not describe 8 files")]
    RankWidth { rank: u8 },

    #[error("invalid piece character '{0}' in FEN")]
    InvalidPiece(char),

    #[error("invalid side to move '{0}' in FEN")]
    InvalidSideToMove(String),

    #[error("invalid castling character '{0}' in FEN")]
    InvalidCastling(char),

    #[error("invalid en passant square '{0}' in FEN")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}' in FEN")]
    InvalidCounter(String),

    #[error("position must contain exactly one king per side")]
    KingCount,
}

/// A move the rules engine refused to apply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("malformed move text '{0}'")]
    Malformed(String),

    #[error("illegal move {0}")]
    Illegal(String),
}
