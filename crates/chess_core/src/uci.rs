use crate::{board::Position, error::MoveError, movegen::legal_moves_from, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Parses coordinate notation (`e2e4`, `e7e8q`) against the legal moves of
/// `pos`, so castle and en-passant flags come out right.
///
/// A promotion written without a piece letter promotes to a queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, MoveError> {
    let malformed = || MoveError::Malformed(txt.to_string());
    let txt = txt.trim();
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return Err(malformed());
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(malformed)?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(malformed)?;
    let promo = match txt.chars().nth(4) {
        None => None,
        Some(c) => match PieceKind::from_char(c) {
            Some(k @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
                Some(k)
            }
            _ => return Err(malformed()),
        },
    };

    let mut tmp = pos.clone();
    let mut legals = Vec::with_capacity(32);
    legal_moves_from(&mut tmp, from, &mut legals);

    legals
        .into_iter()
        .filter(|m| m.to == to)
        .find(|m| m.promo == promo || (promo.is_none() && m.promo == Some(PieceKind::Queen)))
        .ok_or_else(|| MoveError::Illegal(txt.to_string()))
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
