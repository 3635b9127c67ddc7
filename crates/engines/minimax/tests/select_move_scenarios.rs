//! Move selection on real positions.

use chess_core::{Engine, Game, RulesEngine, START_FEN};
use minimax_engine::{minimax, search, HeuristicEvaluator, MinimaxEngine, SearchStats, SCORE_INF};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

#[test]
fn black_reply_from_start_is_legal_and_deterministic() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1";
    let mut g = game(fen);
    let mut engine = MinimaxEngine::new();

    let first = engine.select_move(&mut g);
    let second = engine.select_move(&mut g);

    let mv = first.best_move.expect("black has moves");
    assert!(g.legal_moves().contains(&mv));
    assert_eq!(first, second);
    assert_eq!(g.to_fen(), fen);
}

#[test]
fn white_moves_from_startpos() {
    let mut g = game(START_FEN);
    let result = MinimaxEngine::new().select_move(&mut g);
    assert!(g.legal_moves().contains(&result.best_move.unwrap()));
}

#[test]
fn rook_takes_hanging_queen() {
    let mut g = game("6k1/5ppp/8/8/1r1Q4/7P/5PP1/6K1 b - - 0 1");
    let result = MinimaxEngine::new().select_move(&mut g);
    assert_eq!(result.best_move.unwrap().to_string(), "b4d4");
}

#[test]
fn knight_takes_hanging_queen() {
    let mut g = game("6k1/5ppp/2n5/8/3Q4/8/5PPP/6K1 b - - 0 1");
    let result = MinimaxEngine::new().select_move(&mut g);
    assert_eq!(result.best_move.unwrap().to_string(), "c6d4");
}

#[test]
fn white_takes_hanging_queen_too() {
    let mut g = game("6k1/5ppp/8/3q4/8/4N3/5PPP/6K1 w - - 0 1");
    let result = MinimaxEngine::new().select_move(&mut g);
    assert_eq!(result.best_move.unwrap().to_string(), "e3d5");
    assert!(result.score > 0);
}

#[test]
fn checkmated_side_has_no_move() {
    let mut g = game("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    let result = MinimaxEngine::new().select_move(&mut g);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
    assert_eq!(result.nodes, 0);
}

#[test]
fn stalemated_side_has_no_move() {
    let mut g = game("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    let result = MinimaxEngine::new().select_move(&mut g);
    assert_eq!(result.best_move, None);
}

#[test]
fn chosen_moves_are_legal_across_positions() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1",
    ];
    let mut engine = MinimaxEngine::with_depth(1);
    for fen in fens {
        let mut g = game(fen);
        let mv = engine.select_move(&mut g).best_move.unwrap();
        assert!(g.legal_moves().contains(&mv), "{mv} illegal in {fen}");
        assert_eq!(g.to_fen(), fen);
    }
}

#[test]
fn pruning_matches_full_search_on_real_positions() {
    let cases = [
        ("6k1/5ppp/8/8/1r1Q4/7P/5PP1/6K1 b - - 0 1", 2),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 2),
        ("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1", 2),
        (START_FEN, 2),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 1),
    ];
    for (fen, depth) in cases {
        let mut g = game(fen);
        let maximizing = g.side_to_move() == chess_core::Color::White;

        let mut pruned = SearchStats::default();
        let ab = search(&mut g, &HeuristicEvaluator, depth, -SCORE_INF, SCORE_INF, maximizing, &mut pruned);
        let mut full = SearchStats::default();
        let mm = minimax(&mut g, &HeuristicEvaluator, depth, maximizing, &mut full);

        assert_eq!(ab, mm, "{fen}");
        assert!(pruned.nodes <= full.nodes);
        assert_eq!(g.to_fen(), fen);
    }
}
