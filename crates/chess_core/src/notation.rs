//! Canonical text form for moves, consumed by move-list displays.

use crate::types::Move;

/// Castles render as "O-O"/"O-O-O"; everything else as origin plus
/// destination in algebraic form, with "=<letter>" appended for promotions.
pub fn move_to_text(mv: Move) -> String {
    if mv.is_castle_king_side {
        return "O-O".to_string();
    }
    if mv.is_castle_queen_side {
        return "O-O-O".to_string();
    }

    let mut s = String::new();
    s.push_str(&mv.from.to_algebraic());
    s.push_str(&mv.to.to_algebraic());
    if let Some(p) = mv.promotion {
        s.push('=');
        s.push(p.letter());
    }
    s
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
