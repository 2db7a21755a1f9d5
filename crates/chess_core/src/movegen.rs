use crate::{board::Position, types::*};

/// Generate all legal moves for `side`: pseudo-legal moves filtered by
/// applying each candidate and rejecting those that leave the mover's own
/// king in check.
pub fn legal_moves(pos: &Position, side: Color) -> Vec<Move> {
    let mut moves = pseudo_legal_moves(pos, side);
    moves.retain(|&mv| !pos.apply_move(mv, side).in_check(side));
    moves
}

/// Legal moves restricted to a given origin square.
pub fn legal_moves_from(pos: &Position, side: Color, from: Square) -> Vec<Move> {
    let mut moves = legal_moves(pos, side);
    moves.retain(|m| m.from == from);
    moves
}

/// Geometrically valid moves for `side`, ignoring king safety. Board scan
/// order (a1 .. h8) fixes the emission order, which downstream consumers
/// rely on for deterministic tie-breaking.
pub fn pseudo_legal_moves(pos: &Position, side: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (sq, pc) in pos.pieces() {
        if pc.color != side {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, sq, pc.color, &mut out),
            PieceKind::Knight => gen_knight(pos, sq, pc.color, &mut out),
            PieceKind::Bishop => gen_slider(
                pos,
                sq,
                pc.color,
                &mut out,
                &[(1, 1), (1, -1), (-1, 1), (-1, -1)],
            ),
            PieceKind::Rook => gen_slider(
                pos,
                sq,
                pc.color,
                &mut out,
                &[(1, 0), (-1, 0), (0, 1), (0, -1)],
            ),
            PieceKind::Queen => gen_slider(
                pos,
                sq,
                pc.color,
                &mut out,
                &[
                    (1, 1),
                    (1, -1),
                    (-1, 1),
                    (-1, -1),
                    (1, 0),
                    (-1, 0),
                    (0, 1),
                    (0, -1),
                ],
            ),
            PieceKind::King => {
                gen_king(pos, sq, pc.color, &mut out);
                gen_castle(pos, sq, pc.color, &mut out);
            }
        }
    }
    out
}

fn push_promotions(from: Square, to: Square, out: &mut Vec<Move>) {
    for pk in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        out.push(Move::promoting(from, to, pk));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir: i8 = match c {
        Color::White => 1,
        Color::Black => -1,
    };
    let start_rank: i8 = match c {
        Color::White => 1,
        Color::Black => 6,
    };
    let promo_rank: i8 = match c {
        Color::White => 7,
        Color::Black => 0,
    };

    // forward 1
    if let Some(one) = from.offset(0, dir) {
        if pos.piece_at(one).is_none() {
            if one.rank() == promo_rank {
                push_promotions(from, one, out);
            } else {
                out.push(Move::new(from, one));
            }

            // forward 2 from start, both squares empty
            if from.rank() == start_rank {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if pos.piece_at(two).is_none() {
                        out.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    // diagonal captures + en-passant
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            if let Some(target) = pos.piece_at(to) {
                if target.color != c {
                    if to.rank() == promo_rank {
                        push_promotions(from, to, out);
                    } else {
                        out.push(Move::new(from, to));
                    }
                }
            } else if pos.en_passant == Some(to) {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
        }
    }
}

fn gen_knight(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let jumps = [
        (1, 2),
        (2, 1),
        (-1, 2),
        (-2, 1),
        (1, -2),
        (2, -1),
        (-1, -2),
        (-2, -1),
    ];
    for (df, dr) in jumps {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

fn gen_king(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let deltas = [
        (1, 1),
        (1, 0),
        (1, -1),
        (0, 1),
        (0, -1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
    ];
    for (df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let home_rank: i8 = match c {
        Color::White => 0,
        Color::Black => 7,
    };
    // Must be the king on its original square, and not currently in check.
    if Square::new(4, home_rank) != Some(from) {
        return;
    }
    if pos.in_check(c) {
        return;
    }

    let (ks_right, qs_right) = match c {
        Color::White => (pos.castling.wk, pos.castling.wq),
        Color::Black => (pos.castling.bk, pos.castling.bq),
    };

    if ks_right && can_castle_king_side(pos, c, home_rank) {
        if let Some(to) = Square::new(6, home_rank) {
            let mut mv = Move::new(from, to);
            mv.is_castle_king_side = true;
            out.push(mv);
        }
    }
    if qs_right && can_castle_queen_side(pos, c, home_rank) {
        if let Some(to) = Square::new(2, home_rank) {
            let mut mv = Move::new(from, to);
            mv.is_castle_queen_side = true;
            out.push(mv);
        }
    }
}

fn can_castle_king_side(pos: &Position, side: Color, rank: i8) -> bool {
    let (Some(f_sq), Some(g_sq), Some(h_sq)) = (
        Square::new(5, rank),
        Square::new(6, rank),
        Square::new(7, rank),
    ) else {
        return false;
    };
    if pos.piece_at(f_sq).is_some() || pos.piece_at(g_sq).is_some() {
        return false;
    }
    let enemy = side.other();
    if pos.is_square_attacked(f_sq, enemy) || pos.is_square_attacked(g_sq, enemy) {
        return false;
    }
    matches!(
        pos.piece_at(h_sq),
        Some(pc) if pc.color == side && pc.kind == PieceKind::Rook
    )
}

fn can_castle_queen_side(pos: &Position, side: Color, rank: i8) -> bool {
    let (Some(b_sq), Some(c_sq), Some(d_sq), Some(a_sq)) = (
        Square::new(1, rank),
        Square::new(2, rank),
        Square::new(3, rank),
        Square::new(0, rank),
    ) else {
        return false;
    };
    if pos.piece_at(b_sq).is_some() || pos.piece_at(c_sq).is_some() || pos.piece_at(d_sq).is_some()
    {
        return false;
    }
    // Only the king's transit squares matter; b-file may be attacked.
    let enemy = side.other();
    if pos.is_square_attacked(d_sq, enemy) || pos.is_square_attacked(c_sq, enemy) {
        return false;
    }
    matches!(
        pos.piece_at(a_sq),
        Some(pc) if pc.color == side && pc.kind == PieceKind::Rook
    )
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
