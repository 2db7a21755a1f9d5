use crate::{board::Position, movegen::legal_moves, types::Color};

/// Pure perft node count.
/// Counts all legal positions reachable from the current one in exactly
/// `depth` plies.
pub fn perft(pos: &Position, side: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for mv in legal_moves(pos, side) {
        let next = pos.apply_move(mv, side);
        nodes += perft(&next, side.other(), depth - 1);
    }
    nodes
}
