//! Depth-limited minimax with alpha-beta pruning.
//!
//! The position is shared: every child is reached by applying a move through
//! the rules engine and left by undoing it. Moves are wrapped in
//! [`ScopedMove`](chess_core::ScopedMove) so the undo also happens on cutoffs.

use chess_core::{Color, Move, RulesEngine};
use tracing::{debug, warn};

use crate::eval::{Evaluator, Score, SCORE_INF};
use crate::ordering::order_moves;

/// Counters collected during one selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions entered, root moves included
    pub nodes: u64,
    /// Positions handed to the evaluator
    pub evaluations: u64,
}

/// Alpha-beta search returning a White-perspective score.
///
/// # Arguments
/// * `rules` - Shared position, restored before returning
/// * `eval` - Leaf evaluator
/// * `depth` - Remaining plies
/// * `alpha` - Best score the maximizer can already guarantee
/// * `beta` - Best score the minimizer can already guarantee
/// * `maximizing` - Whether the side to move maximizes (White)
/// * `stats` - Node counters
pub fn search<R, E>(
    rules: &mut R,
    eval: &E,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    stats: &mut SearchStats,
) -> Score
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    stats.nodes += 1;

    if depth == 0 || rules.is_game_over() {
        stats.evaluations += 1;
        return eval.evaluate(rules);
    }

    let mut moves = rules.legal_moves();
    order_moves(&mut moves);

    let mut best = if maximizing { -SCORE_INF } else { SCORE_INF };
    for mv in moves {
        let value = match rules.scoped(mv) {
            Ok(mut child) => search(&mut *child, eval, depth - 1, alpha, beta, !maximizing, stats),
            Err(e) => {
                warn!(%mv, error = %e, "rules engine refused a generated move");
                continue;
            }
        };

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }
        if beta <= alpha {
            break; // cutoff: remaining siblings cannot change the result
        }
    }

    best
}

/// Full-width minimax over the same tree as [`search`], without pruning.
/// Visits every node; used to check that pruning never changes a score.
pub fn minimax<R, E>(rules: &mut R, eval: &E, depth: u8, maximizing: bool, stats: &mut SearchStats) -> Score
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    stats.nodes += 1;

    if depth == 0 || rules.is_game_over() {
        stats.evaluations += 1;
        return eval.evaluate(rules);
    }

    let mut best = if maximizing { -SCORE_INF } else { SCORE_INF };
    for mv in rules.legal_moves() {
        let Ok(mut child) = rules.scoped(mv) else {
            continue;
        };
        let value = minimax(&mut *child, eval, depth - 1, !maximizing, stats);
        best = if maximizing { best.max(value) } else { best.min(value) };
    }
    best
}

/// Picks the move for the side to move.
///
/// Each root move is searched `depth` plies deeper with a fresh window, and
/// its White-perspective score is turned into the mover's perspective. Ties
/// keep the earlier move in capture-first order.
///
/// Returns the move with its mover-perspective score, or None without legal
/// moves.
pub fn select_move<R, E>(rules: &mut R, eval: &E, depth: u8, stats: &mut SearchStats) -> Option<(Move, Score)>
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    let mut moves = rules.legal_moves();
    if moves.is_empty() {
        return None;
    }
    order_moves(&mut moves);

    let mover = rules.side_to_move();
    let mut best: Option<(Move, Score)> = None;

    for mv in moves {
        let white_score = match rules.scoped(mv) {
            Ok(mut child) => {
                let maximizing = child.side_to_move() == Color::White;
                search(&mut *child, eval, depth, -SCORE_INF, SCORE_INF, maximizing, stats)
            }
            Err(e) => {
                warn!(%mv, error = %e, "rules engine refused a root move");
                continue;
            }
        };
        let score = mover.sign() * white_score;
        debug!(%mv, score, "root move scored");

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
