//! The capability surface a search needs from a rules engine.
//!
//! Searches only talk to positions through [`RulesEngine`], so they can run
//! against [`Game`](crate::Game) or against a small scripted stand-in in tests.

use std::ops::{Deref, DerefMut};

use crate::{
    error::{FenError, MoveError},
    types::{Color, Move, Piece},
};

pub trait RulesEngine {
    /// Legal moves of the side to move, optionally only those starting on
    /// `from`. `out` is cleared first.
    fn legal_moves_into(&mut self, from: Option<u8>, out: &mut Vec<Move>);

    /// Applies a legal move in place. Anything not in the legal move list is
    /// refused and leaves the position untouched.
    fn apply(&mut self, mv: Move) -> Result<(), MoveError>;

    /// Reverts the most recently applied move, returning it.
    fn undo(&mut self) -> Option<Move>;

    fn side_to_move(&self) -> Color;

    /// Whether the side to move is in check.
    fn in_check(&self) -> bool;

    /// No legal moves, or a draw by rule.
    fn is_game_over(&mut self) -> bool;

    fn piece_at(&self, sq: u8) -> Option<Piece>;

    fn to_fen(&self) -> String;

    fn from_fen(fen: &str) -> Result<Self, FenError>
    where
        Self: Sized;

    fn legal_moves(&mut self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.legal_moves_into(None, &mut out);
        out
    }

    /// Applies `mv` for the lifetime of the returned guard; dropping the guard
    /// undoes it, whichever way the caller leaves its scope.
    fn scoped(&mut self, mv: Move) -> Result<ScopedMove<'_, Self>, MoveError>
    where
        Self: Sized,
    {
        self.apply(mv)?;
        Ok(ScopedMove { rules: self, mv })
    }
}

/// A move applied to a [`RulesEngine`] that is undone on drop.
///
/// Derefs to the engine so recursion can continue on the child position.
pub struct ScopedMove<'a, R: RulesEngine> {
    rules: &'a mut R,
    mv: Move,
}

impl<R: RulesEngine> ScopedMove<'_, R> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl<R: RulesEngine> Deref for ScopedMove<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.rules
    }
}

impl<R: RulesEngine> DerefMut for ScopedMove<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.rules
    }
}

impl<R: RulesEngine> Drop for ScopedMove<'_, R> {
    fn drop(&mut self) {
        let undone = self.rules.undo();
        debug_assert_eq!(undone, Some(self.mv), "scoped move undone out of order");
    }
}
