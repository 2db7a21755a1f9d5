//! Game-session layer on top of the rules engine: turn alternation, move
//! validation, history with undo, capture bookkeeping and snapshot
//! persistence.

mod game;
mod snapshot;

pub use game::{ChessGame, GameMode};
pub use snapshot::{deserialize, serialize, SnapshotError};
