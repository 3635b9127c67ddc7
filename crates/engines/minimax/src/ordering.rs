//! Move ordering: captures of valuable pieces first, so cutoffs come early.

use std::cmp::Reverse;

use chess_core::Move;

use crate::eval::{piece_value, Score};

/// Value of the piece `mv` takes, 0 for quiet moves.
#[inline]
pub fn capture_value(mv: &Move) -> Score {
    mv.captured.map_or(0, piece_value)
}

/// Sorts by descending captured value. The sort is stable, so moves of equal
/// value keep the rules engine's order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(capture_value(mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::PieceKind;

    fn mv(from: u8, piece: PieceKind, captured: Option<PieceKind>) -> Move {
        Move::new(from, from + 8, piece, captured)
    }

    #[test]
    fn test_captures_sorted_by_victim_value() {
        let mut moves = vec![
            mv(0, PieceKind::Queen, None),
            mv(1, PieceKind::Queen, Some(PieceKind::Pawn)),
            mv(2, PieceKind::Pawn, Some(PieceKind::Rook)),
            mv(3, PieceKind::Knight, None),
            mv(4, PieceKind::Bishop, Some(PieceKind::Queen)),
        ];
        order_moves(&mut moves);
        let froms: Vec<u8> = moves.iter().map(|m| m.from).collect();
        assert_eq!(froms, vec![4, 2, 1, 0, 3]);
    }

    #[test]
    fn test_attacker_value_does_not_matter_and_ties_stay_stable() {
        let mut moves = vec![
            mv(0, PieceKind::Queen, Some(PieceKind::Knight)),
            mv(1, PieceKind::Pawn, Some(PieceKind::Knight)),
            mv(2, PieceKind::Rook, Some(PieceKind::Knight)),
        ];
        order_moves(&mut moves);
        let froms: Vec<u8> = moves.iter().map(|m| m.from).collect();
        assert_eq!(froms, vec![0, 1, 2]);
    }
}
