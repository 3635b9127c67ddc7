use super::*;
use crate::movegen::legal_moves;

fn find(pos: &Position, uci: &str) -> Move {
    legal_moves(pos)
        .into_iter()
        .find(|m| m.to_string() == uci)
        .unwrap_or_else(|| panic!("{uci} not legal"))
}

#[test]
fn test_make_unmake_restores_castling_move() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
    let before = pos.clone();
    let mv = find(&pos, "e1g1");
    assert!(mv.is_castle);

    let undo = pos.make_move(mv);
    assert_eq!(pos.piece_at(5), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert!(!pos.castling.wk && !pos.castling.wq);
    assert!(pos.castling.bk && pos.castling.bq);

    pos.unmake_move(mv, undo);
    assert_eq!(pos, before);
}

#[test]
fn test_make_unmake_restores_en_passant_capture() {
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let before = pos.clone();
    let mv = find(&pos, "e5f6");
    assert!(mv.is_en_passant);
    assert_eq!(mv.captured, Some(PieceKind::Pawn));

    let undo = pos.make_move(mv);
    assert_eq!(pos.piece_at(37), None, "captured pawn on f5 is removed");

    pos.unmake_move(mv, undo);
    assert_eq!(pos, before);
}

#[test]
fn test_make_unmake_restores_promotion_capture() {
    let mut pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = pos.clone();
    let mv = find(&pos, "a7b8q");

    let undo = pos.make_move(mv);
    assert_eq!(pos.piece_at(57), Some(Piece::new(Color::White, PieceKind::Queen)));

    pos.unmake_move(mv, undo);
    assert_eq!(pos, before);
}

#[test]
fn test_rook_capture_on_corner_clears_castling_right() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = find(&pos, "a1a8");
    pos.make_move(mv);
    assert!(!pos.castling.wq);
    assert!(!pos.castling.bq);
    assert!(pos.castling.wk && pos.castling.bk);
}

#[test]
fn test_double_push_sets_en_passant_square() {
    let mut pos = Position::startpos();
    let mv = find(&pos, "e2e4");
    pos.make_move(mv);
    assert_eq!(pos.en_passant, coord_to_sq("e3"));
    assert_eq!(pos.side_to_move, Color::Black);
    assert_eq!(pos.halfmove_clock, 0);
}

#[test]
fn test_repetition_key_ignores_move_counters() {
    let a = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    let b = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 17 40").unwrap();
    let c = Position::from_fen("8/8/8/4k3/8/4K3/8/8 b - - 0 1").unwrap();
    assert_eq!(a.repetition_key(), b.repetition_key());
    assert_ne!(a.repetition_key(), c.repetition_key());
}

#[test]
fn test_en_passant_square_counts_only_when_capturable() {
    let mut pushed = Position::startpos();
    let mv = find(&pushed, "e2e4");
    pushed.make_move(mv);
    assert!(pushed.en_passant.is_some());
    let plain = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_eq!(pushed.repetition_key(), plain.repetition_key());

    for (with_ep, without) in [
        (
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3",
        ),
        (
            "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 2",
            "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq - 0 2",
        ),
    ] {
        let a = Position::from_fen(with_ep).unwrap();
        let b = Position::from_fen(without).unwrap();
        assert_ne!(a.repetition_key(), b.repetition_key(), "{with_ep}");
    }
}

#[test]
#[should_panic(expected = "no piece on origin square")]
fn test_make_move_from_empty_square_panics() {
    let mut pos = Position::startpos();
    let mv = find(&Position::startpos(), "e2e4");
    pos.set_piece(mv.from, None);
    pos.make_move(mv);
}
