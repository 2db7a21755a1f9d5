pub mod board;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use movegen::*;
pub use notation::*;
pub use perft::perft;
pub use types::*;
