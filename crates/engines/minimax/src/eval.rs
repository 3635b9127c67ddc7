//! Hand-tuned position evaluation.
//!
//! Scores are centipawns from White's point of view: positive favours White,
//! negative favours Black. All weights are compile-time constants.

use chess_core::{file_of, rank_of, Color, Move, PieceKind, RulesEngine};

pub type Score = i32;

/// Bound above any reachable evaluation; used to open the alpha-beta window.
pub const SCORE_INF: Score = 1_000_000;

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [Score; 6] = [100, 320, 330, 500, 900, 20_000];

/// Pawn placement bonus for White, listed from rank 8 down to rank 1.
/// Black reads it mirrored vertically.
#[rustfmt::skip]
pub const PAWN_TABLE: [[Score; 8]; 8] = [
    [ 0,  0,   0,   0,   0,   0,  0,  0],
    [50, 50,  50,  50,  50,  50, 50, 50],
    [10, 10,  20,  30,  30,  20, 10, 10],
    [ 5,  5,  10,  25,  25,  10,  5,  5],
    [ 0,  0,   0,  20,  20,   0,  0,  0],
    [ 5, -5, -10,   0,   0, -10, -5,  5],
    [ 5, 10,  10, -20, -20,  10, 10,  5],
    [ 0,  0,   0,   0,   0,   0,  0,  0],
];

/// d4, e4, d5, e5
pub const CENTER_SQUARES: [u8; 4] = [27, 28, 35, 36];
pub const CENTER_BONUS: Score = 10;
pub const MOBILITY_WEIGHT: Score = 5;
pub const CHECK_BONUS: Score = 50;
/// Capture threats count a tenth of the value won.
pub const THREAT_DIVISOR: Score = 10;

#[inline]
pub fn piece_value(kind: PieceKind) -> Score {
    PIECE_VALUES[kind.idx()]
}

/// Placement bonus of a pawn of colour `c` on `sq`, unsigned.
pub fn pawn_bonus(sq: u8, c: Color) -> Score {
    let row = match c {
        Color::White => 7 - rank_of(sq),
        Color::Black => rank_of(sq),
    };
    PAWN_TABLE[row as usize][file_of(sq) as usize]
}

/// The evaluation split into its terms, each already signed for White.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub material: Score,
    pub pawn_placement: Score,
    pub center: Score,
    pub mobility: Score,
    pub check: Score,
    pub threats: Score,
}

impl EvalBreakdown {
    pub fn total(&self) -> Score {
        self.material + self.pawn_placement + self.center + self.mobility + self.check + self.threats
    }
}

/// Scores a position through the rules engine's view of it.
pub trait Evaluator<R: RulesEngine> {
    fn evaluate(&self, rules: &mut R) -> Score;
}

/// Material, pawn placement, center control, mobility, check and capture
/// threats.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEvaluator;

impl<R: RulesEngine> Evaluator<R> for HeuristicEvaluator {
    fn evaluate(&self, rules: &mut R) -> Score {
        evaluate(rules)
    }
}

pub fn evaluate<R: RulesEngine>(rules: &mut R) -> Score {
    breakdown(rules).total()
}

/// Mobility, check and threat terms only look at the side to move, so the
/// same placement scores differently depending on whose turn it is.
pub fn breakdown<R: RulesEngine>(rules: &mut R) -> EvalBreakdown {
    let mover = rules.side_to_move();
    let mut moves = Vec::with_capacity(64);
    rules.legal_moves_into(None, &mut moves);

    let mut eb = EvalBreakdown::default();
    for sq in 0..64u8 {
        let Some(pc) = rules.piece_at(sq) else {
            continue;
        };
        let sign = pc.color.sign();
        eb.material += sign * piece_value(pc.kind);
        if pc.kind == PieceKind::Pawn {
            eb.pawn_placement += sign * pawn_bonus(sq, pc.color);
        }
        if CENTER_SQUARES.contains(&sq) {
            eb.center += sign * CENTER_BONUS;
        }
    }

    // Every legal move starts on one of the mover's pieces, so summing
    // per-piece move counts is the length of the list.
    eb.mobility = mover.sign() * MOBILITY_WEIGHT * moves.len() as Score;

    if rules.in_check() {
        eb.check = -mover.sign() * CHECK_BONUS;
    }

    eb.threats = mover.sign() * moves.iter().map(threat_gain).sum::<Score>();
    eb
}

/// Bonus for a capture of a more valuable piece by a cheaper one.
fn threat_gain(mv: &Move) -> Score {
    match mv.captured {
        Some(victim) if piece_value(victim) > piece_value(mv.piece) => {
            (piece_value(victim) - piece_value(mv.piece)) / THREAT_DIVISOR
        }
        _ => 0,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
