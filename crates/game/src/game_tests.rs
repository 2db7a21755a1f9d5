use super::*;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

fn game_from_fen(fen: &str) -> ChessGame {
    let (position, side) = Position::from_fen(fen);
    ChessGame::restore(GameMode::Pvp, position, side, Vec::new(), Vec::new())
}

#[test]
fn test_new_game_state() {
    let game = ChessGame::new_game(GameMode::VsAi);
    assert_eq!(game.mode(), GameMode::VsAi);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.position(), &Position::startpos());
    assert!(game.move_history().is_empty());
    assert!(game.captured_by(Color::White).is_empty());
    assert!(game.captured_by(Color::Black).is_empty());
    assert!(!game.is_game_over());
}

#[test]
fn test_try_make_move_applies_and_flips_side() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    assert!(game.try_make_move(mv("e2", "e4")));
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.move_history(), vec![mv("e2", "e4")]);
    assert!(game.position().piece_at(sq("e2")).is_none());
    assert_eq!(
        game.position().piece_at(sq("e4")),
        Some(Piece::new(PieceKind::Pawn, Color::White))
    );
}

#[test]
fn test_try_make_move_rejects_illegal() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    let before = game.position().clone();

    assert!(!game.try_make_move(mv("e2", "e5")));
    assert!(!game.try_make_move(mv("e7", "e5"))); // not White's piece
    assert!(!game.try_make_move(mv("d1", "d3"))); // queen is boxed in

    assert_eq!(game.position(), &before);
    assert_eq!(game.side_to_move(), Color::White);
    assert!(game.move_history().is_empty());
}

#[test]
fn test_try_make_move_requires_exact_castle_flag() {
    let mut game = game_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

    // A plain king hop onto the castle destination is not the castle move.
    assert!(!game.try_make_move(mv("e1", "g1")));

    let mut castle = mv("e1", "g1");
    castle.is_castle_king_side = true;
    assert!(game.try_make_move(castle));
    assert_eq!(
        game.position().piece_at(sq("f1")),
        Some(Piece::new(PieceKind::Rook, Color::White))
    );
}

#[test]
fn test_try_make_move_requires_en_passant_flag() {
    let mut game =
        game_from_fen("rnbqkbnr/pp2pppp/8/2ppP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");

    // The diagonal step onto the en-passant target must carry the flag.
    assert!(!game.try_make_move(mv("e5", "d6")));

    let mut ep = mv("e5", "d6");
    ep.is_en_passant = true;
    assert!(game.try_make_move(ep));
}

#[test]
fn test_promotion_defaults_to_queen() {
    let mut game = game_from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    assert!(game.requires_promotion(mv("a7", "a8")));
    assert!(!game.requires_promotion(mv("a7", "a6"))); // off the far rank
    assert!(game.try_make_move(mv("a7", "a8")));
    assert_eq!(
        game.position().piece_at(sq("a8")),
        Some(Piece::new(PieceKind::Queen, Color::White))
    );
    assert_eq!(
        game.move_history()[0].promotion,
        Some(PieceKind::Queen),
        "history records the normalized move"
    );
}

#[test]
fn test_promotion_honors_explicit_kind() {
    let mut game = game_from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    assert!(game.try_make_move(Move::promoting(sq("a7"), sq("a8"), PieceKind::Knight)));
    assert_eq!(
        game.position().piece_at(sq("a8")),
        Some(Piece::new(PieceKind::Knight, Color::White))
    );
}

#[test]
fn test_promotion_rejects_bogus_kind() {
    let mut game = game_from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    assert!(!game.try_make_move(Move::promoting(sq("a7"), sq("a8"), PieceKind::King)));
}

#[test]
fn test_capture_lists_keyed_by_capturing_side() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    assert!(game.try_make_move(mv("e2", "e4")));
    assert!(game.try_make_move(mv("d7", "d5")));
    assert!(game.try_make_move(mv("e4", "d5"))); // White takes a pawn

    assert_eq!(
        game.captured_by(Color::White),
        &[Piece::new(PieceKind::Pawn, Color::Black)]
    );
    assert!(game.captured_by(Color::Black).is_empty());

    assert!(game.try_make_move(mv("d8", "d5"))); // Black takes back
    assert_eq!(
        game.captured_by(Color::Black),
        &[Piece::new(PieceKind::Pawn, Color::White)]
    );
}

#[test]
fn test_en_passant_capture_bookkeeping_and_undo() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    assert!(game.try_make_move(mv("e2", "e4")));
    assert!(game.try_make_move(mv("a7", "a6")));
    assert!(game.try_make_move(mv("e4", "e5")));
    assert!(game.try_make_move(mv("d7", "d5")));

    let before = game.position().clone();
    let mut ep = mv("e5", "d6");
    ep.is_en_passant = true;
    assert!(game.try_make_move(ep));
    assert_eq!(
        game.captured_by(Color::White),
        &[Piece::new(PieceKind::Pawn, Color::Black)]
    );

    assert!(game.undo_last_ply());
    assert_eq!(game.position(), &before);
    assert_eq!(game.side_to_move(), Color::White);
    assert!(game.captured_by(Color::White).is_empty());
    assert_eq!(
        game.position().piece_at(sq("d5")),
        Some(Piece::new(PieceKind::Pawn, Color::Black)),
        "the en-passant victim is back"
    );
}

#[test]
fn test_undo_walks_back_to_the_start() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    let moves = [
        mv("e2", "e4"),
        mv("d7", "d5"),
        mv("e4", "d5"),
        mv("d8", "d5"),
        mv("b1", "c3"),
    ];
    for m in moves {
        assert!(game.try_make_move(m));
    }

    for _ in 0..moves.len() {
        assert!(game.undo_last_ply());
    }

    assert_eq!(game.position(), &Position::startpos());
    assert_eq!(game.side_to_move(), Color::White);
    assert!(game.move_history().is_empty());
    assert!(game.captured_by(Color::White).is_empty());
    assert!(game.captured_by(Color::Black).is_empty());

    // Nothing left to undo.
    assert!(!game.undo_last_ply());
}

#[test]
fn test_undo_is_single_ply() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    assert!(game.try_make_move(mv("e2", "e4")));
    assert!(game.try_make_move(mv("e7", "e5")));

    assert!(game.undo_last_ply());
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.move_history(), vec![mv("e2", "e4")]);
}

#[test]
fn test_fools_mate_is_checkmate() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    assert!(game.try_make_move(mv("f2", "f3")));
    assert!(game.try_make_move(mv("e7", "e5")));
    assert!(game.try_make_move(mv("g2", "g4")));
    assert!(game.try_make_move(mv("d8", "h4")));

    assert!(game.is_in_check(Color::White));
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(Color::Black));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_back_rank_mate_cannot_escape_capture_or_block() {
    // Queen on e2 guarded by the rook on e8; the white king has no move.
    let game = game_from_fen("k3r3/8/8/8/8/8/4q3/4K3 w - - 0 1");
    assert!(game.is_checkmate());
    assert_eq!(game.winner(), Some(Color::Black));
}

#[test]
fn test_stalemate_detection() {
    let game = game_from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(game.is_stalemate());
    assert!(!game.is_checkmate());
    assert!(game.is_game_over());
    assert_eq!(game.winner(), None);
}

#[test]
fn test_bare_kings_are_not_terminal() {
    let game = game_from_fen("k7/8/8/8/8/8/8/7K w - - 0 1");
    assert!(!game.is_stalemate());
    assert!(!game.is_checkmate());
    assert!(!game.is_game_over());
    assert!(!game.legal_moves().is_empty());
}

#[test]
fn test_legal_moves_from_matches_controller_side() {
    let game = ChessGame::new_game(GameMode::Pvp);
    let knight_moves = game.legal_moves_from(sq("g1"));
    assert_eq!(knight_moves.len(), 2);
    // Black pieces yield nothing while White is to move.
    assert!(game.legal_moves_from(sq("g8")).is_empty());
}

#[test]
fn test_capture_invariant_one_entry_per_captureful_ply() {
    let mut game = ChessGame::new_game(GameMode::Pvp);
    let moves = [
        mv("e2", "e4"),
        mv("d7", "d5"),
        mv("e4", "d5"),
        mv("d8", "d5"),
        mv("b1", "c3"),
        mv("d5", "d2"), // queen grabs a second pawn
    ];
    for m in moves {
        assert!(game.try_make_move(m));
    }

    let total_captures =
        game.captured_by(Color::White).len() + game.captured_by(Color::Black).len();
    assert_eq!(total_captures, 3);

    while game.undo_last_ply() {}
    assert_eq!(
        game.captured_by(Color::White).len() + game.captured_by(Color::Black).len(),
        0
    );
}
