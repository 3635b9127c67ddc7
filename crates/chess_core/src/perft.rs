use crate::{rules::RulesEngine, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`, playing
/// every move through the rules engine's apply/undo pair.
pub fn perft<R: RulesEngine>(rules: &mut R, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner<R: RulesEngine>(rules: &mut R, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        rules.legal_moves_into(None, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            match rules.scoped(mv) {
                Ok(mut child) => nodes += inner(&mut *child, depth - 1, rest),
                Err(e) => panic!("perft: generated move rejected: {e}"),
            }
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(rules, depth, &mut layers[..])
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide<R: RulesEngine>(rules: &mut R, depth: u8) -> Vec<(Move, u64)> {
    let moves = rules.legal_moves();
    if depth == 0 {
        return Vec::new();
    }
    moves
        .into_iter()
        .map(|mv| {
            let nodes = match rules.scoped(mv) {
                Ok(mut child) => perft(&mut *child, depth - 1),
                Err(e) => panic!("perft: generated move rejected: {e}"),
            };
            (mv, nodes)
        })
        .collect()
}
