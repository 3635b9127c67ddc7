//! A game in progress: a position plus the undo stack that lets every applied
//! move be taken back exactly.

use std::fmt;

use crate::{
    board::{Position, Undo},
    error::{FenError, MoveError},
    movegen::{legal_moves_from, legal_moves_into},
    rules::RulesEngine,
    types::*,
    uci::parse_uci_move,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Playing => f.write_str("in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::Draw(DrawReason::FiftyMoveRule) => f.write_str("draw by the fifty-move rule"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                f.write_str("draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                f.write_str("draw by threefold repetition")
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Ply {
    mv: Move,
    undo: Undo,
}

#[derive(Clone, Debug)]
pub struct Game {
    pos: Position,
    plies: Vec<Ply>,
    /// Repetition keys of every position reached, the starting one first.
    keys: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(pos: Position) -> Self {
        let key = pos.repetition_key();
        Self {
            pos,
            plies: Vec::new(),
            keys: vec![key],
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Moves applied since the game was created, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.plies.iter().map(|p| p.mv)
    }

    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    /// Parses and applies a move in coordinate notation. A pawn reaching the
    /// last rank without a piece letter becomes a queen.
    pub fn play_uci(&mut self, txt: &str) -> Result<Move, MoveError> {
        let mv = parse_uci_move(&self.pos, txt)?;
        self.apply(mv)?;
        Ok(mv)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.pos.repetition_key();
        self.keys.iter().filter(|&&k| k == current).count() >= 3
    }

    pub fn status(&mut self) -> GameStatus {
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut self.pos, &mut moves);
        if moves.is_empty() {
            return if self.pos.in_check(self.pos.side_to_move) {
                GameStatus::Checkmate {
                    winner: self.pos.side_to_move.other(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        match self.draw_reason() {
            Some(reason) => GameStatus::Draw(reason),
            None => GameStatus::Playing,
        }
    }

    fn draw_reason(&self) -> Option<DrawReason> {
        if self.pos.is_fifty_move_draw() {
            Some(DrawReason::FiftyMoveRule)
        } else if self.pos.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }
}

impl RulesEngine for Game {
    fn legal_moves_into(&mut self, from: Option<u8>, out: &mut Vec<Move>) {
        match from {
            Some(s) => legal_moves_from(&mut self.pos, s, out),
            None => legal_moves_into(&mut self.pos, out),
        }
    }

    fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        let mut candidates = Vec::with_capacity(28);
        legal_moves_from(&mut self.pos, mv.from, &mut candidates);
        if !candidates.contains(&mv) {
            return Err(MoveError::Illegal(mv.to_string()));
        }
        let undo = self.pos.make_move(mv);
        self.plies.push(Ply { mv, undo });
        self.keys.push(self.pos.repetition_key());
        Ok(())
    }

    fn undo(&mut self) -> Option<Move> {
        let ply = self.plies.pop()?;
        self.keys.pop();
        self.pos.unmake_move(ply.mv, ply.undo);
        Some(ply.mv)
    }

    fn side_to_move(&self) -> Color {
        self.pos.side_to_move
    }

    fn in_check(&self) -> bool {
        self.pos.in_check(self.pos.side_to_move)
    }

    fn is_game_over(&mut self) -> bool {
        self.status().is_over()
    }

    fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.pos.piece_at(sq)
    }

    fn to_fen(&self) -> String {
        self.pos.to_fen()
    }

    fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Game::from_position)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
