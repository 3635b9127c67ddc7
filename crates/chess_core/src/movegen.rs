use crate::{
    board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position, promotion_rank},
    types::*,
};

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    for from in 0..64u8 {
        pseudo_moves_from(pos, from, out);
    }
    retain_legal(pos, out);
}

/// Legal moves of the piece standing on `from`. Empty when the square is empty
/// or holds a piece of the side not to move.
pub fn legal_moves_from(pos: &mut Position, from: u8, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves_from(pos, from, out);
    retain_legal(pos, out);
}

/// Drops moves that leave the mover's king attacked by playing each one on
/// the mutable position.
fn retain_legal(pos: &mut Position, out: &mut Vec<Move>) {
    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves_from(pos: &Position, from: u8, out: &mut Vec<Move>) {
    let pc = match pos.piece_at(from) {
        Some(p) if p.color == pos.side_to_move => p,
        _ => return,
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
        PieceKind::Knight => gen_steps(pos, from, pc, out, &KNIGHT_DELTAS),
        PieceKind::Bishop => gen_slider(pos, from, pc, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(pos, from, pc, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(pos, from, pc, out, &DIAGONALS);
            gen_slider(pos, from, pc, out, &ORTHOGONALS);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc, out, &KING_DELTAS);
            gen_castle(pos, from, pc.color, out);
        }
    }
}

fn push_pawn_move(out: &mut Vec<Move>, from: u8, to: u8, captured: Option<PieceKind>, c: Color) {
    if rank_of(to) == promotion_rank(c) {
        for pk in PROMOTIONS {
            let mut mv = Move::new(from, to, PieceKind::Pawn, captured);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        out.push(Move::new(from, to, PieceKind::Pawn, captured));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);

    let (dir, start_rank): (i8, i8) = match c {
        Color::White => (1, 1),
        Color::Black => (-1, 6),
    };

    // forward 1, then forward 2 from the start rank
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(out, from, to, None, c);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2, PieceKind::Pawn, None));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(out, from, to, Some(tpc.kind), c),
            Some(_) => {}
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to, PieceKind::Pawn, Some(PieceKind::Pawn));
                mv.is_en_passant = true;
                out.push(mv);
            }
            None => {}
        }
    }
}

/// Knight and king: single steps to empty or enemy squares.
fn gen_steps(pos: &Position, from: u8, pc: Piece, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc.kind, None)),
                Some(t) if t.color != pc.color => out.push(Move::new(from, to, pc.kind, Some(t.kind))),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, pc: Piece, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc.kind, None)),
                Some(t) if t.color != pc.color => {
                    out.push(Move::new(from, to, pc.kind, Some(t.kind)));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    // (king home, kingside right, queenside right)
    let (home, king_side, queen_side) = match c {
        Color::White => (4u8, pos.castling.wk, pos.castling.wq),
        Color::Black => (60u8, pos.castling.bk, pos.castling.bq),
    };
    if from != home || !(king_side || queen_side) {
        return;
    }

    // Can't castle out of check
    if pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let empty = |squares: &[u8]| squares.iter().all(|&s| pos.piece_at(home - 4 + s).is_none());
    let safe = |squares: &[u8]| {
        squares
            .iter()
            .all(|&s| !pos.is_square_attacked(home - 4 + s, enemy))
    };

    // Squares are given relative to the a-file of the king's rank.
    // King side: f and g empty and not attacked.
    if king_side && empty(&[5, 6]) && safe(&[5, 6]) {
        let mut mv = Move::new(home, home + 2, PieceKind::King, None);
        mv.is_castle = true;
        out.push(mv);
    }
    // Queen side: b, c and d empty; c and d not attacked.
    if queen_side && empty(&[1, 2, 3]) && safe(&[2, 3]) {
        let mut mv = Move::new(home, home - 2, PieceKind::King, None);
        mv.is_castle = true;
        out.push(mv);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
