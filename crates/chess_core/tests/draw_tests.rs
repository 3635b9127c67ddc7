//! Game-ending conditions as `Game::status` reports them.
//!
//! The search stops at any position where `is_game_over` holds, so every
//! case checks both the status and that flag.

use chess_core::{Color, DrawReason, Game, GameStatus, RulesEngine};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for mv in moves {
        game.play_uci(mv).unwrap_or_else(|e| panic!("{mv}: {e}"));
    }
}

// =============================================================================
// Checkmate and stalemate
// =============================================================================

#[test]
fn test_no_moves_without_check_is_stalemate() {
    for fen in [
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "6k1/6P1/6K1/8/8/8/8/8 b - - 0 1",
        "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
    ] {
        let mut g = game(fen);
        assert_eq!(g.status(), GameStatus::Stalemate, "{fen}");
        assert!(g.is_game_over());
        assert!(!g.in_check());
    }
}

#[test]
fn test_mate_reached_in_play() {
    let mut g = Game::new();
    play(&mut g, &["f2f3", "e7e5", "g2g4"]);
    assert_eq!(g.status(), GameStatus::Playing);

    play(&mut g, &["d8h4"]);
    assert_eq!(g.status(), GameStatus::Checkmate { winner: Color::Black });
    assert!(g.in_check());
    assert!(g.is_game_over());

    g.undo();
    assert!(!g.is_game_over());
}

#[test]
fn test_check_with_an_escape_keeps_playing() {
    let mut g = game("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(g.in_check());
    assert_eq!(g.status(), GameStatus::Playing);
    assert_eq!(g.legal_moves().len(), 1, "only g7g6 blocks");
}

// =============================================================================
// Fifty-move rule
// =============================================================================

#[test]
fn test_hundredth_quiet_halfmove_draws() {
    let mut g = game("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    assert_eq!(g.status(), GameStatus::Playing);

    play(&mut g, &["d3c3"]);
    assert_eq!(g.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    assert!(g.is_game_over());

    g.undo();
    assert_eq!(g.status(), GameStatus::Playing);
}

#[test]
fn test_pawn_move_or_capture_restarts_the_count() {
    let mut g = game("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    play(&mut g, &["e2e4"]);
    assert_eq!(g.position().halfmove_clock, 0);
    assert_eq!(g.status(), GameStatus::Playing);

    let mut g = game("8/8/8/4k3/2n5/3K4/4P3/8 w - - 99 60");
    play(&mut g, &["d3c4"]);
    assert_eq!(g.position().halfmove_clock, 0);
    assert_eq!(g.status(), GameStatus::Playing, "K+P v K is still playable");
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_material_that_cannot_mate() {
    let dead = [
        ("8/8/8/4k3/8/4K3/8/8 w - - 0 1", "K v K"),
        ("8/8/8/4k3/8/4KB2/8/8 w - - 0 1", "K+B v K"),
        ("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1", "K v K+N"),
        ("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "bishops on one colour"),
    ];
    for (fen, label) in dead {
        let mut g = game(fen);
        assert_eq!(g.status(), GameStatus::Draw(DrawReason::InsufficientMaterial), "{label}");
        assert!(g.is_game_over(), "{label}");
    }

    let alive = [
        ("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "bishops on both colours"),
        ("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1", "pawn"),
        ("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1", "rook"),
        ("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1", "two knights"),
    ];
    for (fen, label) in alive {
        assert_eq!(game(fen).status(), GameStatus::Playing, "{label}");
    }
}

#[test]
fn test_capturing_the_last_piece_draws() {
    let mut g = game("8/8/8/4k3/8/4K3/4r3/8 w - - 0 1");
    assert_eq!(g.status(), GameStatus::Playing);
    play(&mut g, &["e3e2"]);
    assert_eq!(g.status(), GameStatus::Draw(DrawReason::InsufficientMaterial));
}

// =============================================================================
// Threefold repetition
// =============================================================================

#[test]
fn test_threefold_repetition_detection() {
    // 1.e4 e5 2.Nf3 Nc6, then both knights shuffle home and back twice
    let mut g = Game::new();
    play(&mut g, &["e2e4", "e7e5", "g1f3", "b8c6"]);
    let target = g.position().repetition_key();

    for round in 1..=2 {
        play(&mut g, &["f3g1", "c6b8", "g1f3", "b8c6"]);
        assert_eq!(g.position().repetition_key(), target);
        let expected = if round == 1 {
            GameStatus::Playing
        } else {
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        };
        assert_eq!(g.status(), expected, "after round {round}");
    }
    assert!(g.is_game_over());
}

#[test]
fn test_uncapturable_en_passant_square_does_not_block_repetition() {
    // The position after 1.e4 recurs twice more; nothing could take on e3
    let mut g = Game::new();
    play(&mut g, &["e2e4"]);
    for _ in 0..2 {
        assert_eq!(g.status(), GameStatus::Playing);
        play(&mut g, &["g8f6", "g1f3", "f6g8", "f3g1"]);
    }
    assert_eq!(g.status(), GameStatus::Draw(DrawReason::ThreefoldRepetition));
}

#[test]
fn test_pawn_moves_between_shuffles_are_not_repetition() {
    let mut g = Game::new();
    play(&mut g, &["g1f3", "a7a6", "f3g1", "a6a5", "g1f3", "a5a4", "f3g1"]);
    assert_eq!(g.status(), GameStatus::Playing);
}
