//! Material, mobility and check evaluation

use chess_core::{legal_moves, Color, PieceKind, Position};

/// Evaluates the position from `side`'s perspective.
///
/// Returns a score in centipawns:
/// - Positive = good for `side`
/// - Negative = bad for `side`
/// - 0 = equal position
pub fn evaluate(pos: &Position, side: Color) -> i32 {
    let mut score = 0i32;

    for (_, pc) in pos.pieces() {
        let v = piece_value(pc.kind);
        score += if pc.color == side { v } else { -v };
    }

    // Mobility: two centipawns per legal-move advantage.
    let my_moves = legal_moves(pos, side).len() as i32;
    let opp_moves = legal_moves(pos, side.other()).len() as i32;
    score += 2 * (my_moves - opp_moves);

    if pos.in_check(side) {
        score -= 50;
    }
    if pos.in_check(side.other()) {
        score += 50;
    }

    score
}

/// Returns the material value of a piece in centipawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
