//! Perft timing harness, mainly for profiling move generation with
//! cargo-flamegraph.
//!
//!   cargo flamegraph --example perft_bench -p chess_core -- [depth] [fen]
//!
//! Without a FEN it sweeps a few standard positions at the given depth
//! (default 4).

use chess_core::{Position, perft};
use std::env;
use std::time::Instant;

const SWEEP: &[(&str, &str)] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
];

fn run(label: &str, fen: &str, depth: u8) {
    let (pos, side) = Position::from_fen(fen);
    let start = Instant::now();
    let nodes = perft(&pos, side, depth);
    let secs = start.elapsed().as_secs_f64();
    println!("{label}: perft({depth}) = {nodes} [{secs:.3}s, {:.0} nodes/s]", nodes as f64 / secs);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(fen) => run("custom", fen, depth),
        None => {
            for (label, fen) in SWEEP {
                run(label, fen, depth);
            }
        }
    }
}
