//! Minimax Chess Engine
//!
//! Fixed-depth negamax search with alpha-beta pruning over a material,
//! mobility and check evaluation. Picks moves for the computer opponent
//! from an immutable position snapshot; it never touches live game state,
//! so callers may run it on a worker away from the interactive path.

mod eval;
mod search;

pub use eval::{evaluate, piece_value};
pub use search::{find_best_move, DEFAULT_DEPTH};
