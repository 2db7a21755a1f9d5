use chess_core::{legal_moves, legal_moves_from, Color, Move, Piece, PieceKind, Position, Square};

/// Session kind: two humans, or human versus the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Pvp,
    VsAi,
}

/// One applied ply: everything needed to take it back.
#[derive(Clone, Debug)]
struct HistoryEntry {
    mv: Move,
    position_before: Position,
    side_before: Color,
    captured: Option<Piece>,
}

/// A chess game in progress. Holds the current position, the side to move,
/// the ordered move history and one capture list per color (insertion order
/// is capture order, keyed by the capturing side). State changes only
/// through `try_make_move` and `undo_last_ply`.
#[derive(Debug)]
pub struct ChessGame {
    mode: GameMode,
    position: Position,
    side_to_move: Color,
    history: Vec<HistoryEntry>,
    captured_by_white: Vec<Piece>,
    captured_by_black: Vec<Piece>,
}

impl ChessGame {
    /// Fresh game: initial position, White to move, empty history.
    pub fn new_game(mode: GameMode) -> ChessGame {
        ChessGame::restore(mode, Position::startpos(), Color::White, Vec::new(), Vec::new())
    }

    /// Rebuild a session around a restored position. History starts empty,
    /// so undo cannot reach past a restore point.
    pub(crate) fn restore(
        mode: GameMode,
        position: Position,
        side_to_move: Color,
        captured_by_white: Vec<Piece>,
        captured_by_black: Vec<Piece>,
    ) -> ChessGame {
        ChessGame {
            mode,
            position,
            side_to_move,
            history: Vec::new(),
            captured_by_white,
            captured_by_black,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Moves played so far, oldest first.
    pub fn move_history(&self) -> Vec<Move> {
        self.history.iter().map(|e| e.mv).collect()
    }

    /// Pieces captured by `color`, in capture order.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position, self.side_to_move)
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        legal_moves_from(&self.position, self.side_to_move, from)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.position.in_check(color)
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.position.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate()
    }

    /// The side that delivered mate; `None` unless the game ended in
    /// checkmate.
    pub fn winner(&self) -> Option<Color> {
        if self.is_checkmate() {
            Some(self.side_to_move.other())
        } else {
            None
        }
    }

    /// True when `mv` moves a pawn onto its far rank, i.e. the caller must
    /// settle on a promotion kind before submitting it.
    pub fn requires_promotion(&self, mv: Move) -> bool {
        let piece = match self.position.piece_at(mv.from) {
            Some(p) => p,
            None => return false,
        };
        if piece.kind != PieceKind::Pawn {
            return false;
        }
        let promo_rank = match piece.color {
            Color::White => 7,
            Color::Black => 0,
        };
        mv.to.rank() == promo_rank
    }

    /// Validates `mv` against the legal-move set by exact structural
    /// equality and applies it on a match. A promoting move submitted
    /// without a promotion kind is normalized to the queen. Returns false,
    /// leaving the game untouched, when no legal move matches.
    pub fn try_make_move(&mut self, mv: Move) -> bool {
        let legal = self.legal_moves();

        let chosen = if legal.contains(&mv) {
            mv
        } else if mv.promotion.is_none() && self.requires_promotion(mv) {
            let queened = Move {
                promotion: Some(PieceKind::Queen),
                ..mv
            };
            if legal.contains(&queened) {
                queened
            } else {
                return false;
            }
        } else {
            return false;
        };

        let captured = captured_piece(&self.position, chosen, self.side_to_move);

        self.history.push(HistoryEntry {
            mv: chosen,
            position_before: self.position.clone(),
            side_before: self.side_to_move,
            captured,
        });

        self.position = self.position.apply_move(chosen, self.side_to_move);
        let mover = self.side_to_move;
        self.side_to_move = mover.other();

        if let Some(piece) = captured {
            self.captured_list_mut(mover).push(piece);
        }

        true
    }

    /// Takes back the most recent ply, restoring position and side to move
    /// verbatim. Returns false when there is nothing to undo.
    pub fn undo_last_ply(&mut self) -> bool {
        let entry = match self.history.pop() {
            Some(e) => e,
            None => return false,
        };
        self.position = entry.position_before;
        self.side_to_move = entry.side_before;

        // After restoration the side to move is the side that played the
        // undone ply, so its capture list is the one that shrinks.
        if entry.captured.is_some() {
            self.captured_list_mut(self.side_to_move).pop();
        }
        true
    }

    fn captured_list_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.captured_by_white,
            Color::Black => &mut self.captured_by_black,
        }
    }
}

/// What `mv` captures, accounting for en-passant taking a pawn that is not
/// on the destination square.
fn captured_piece(position: &Position, mv: Move, side: Color) -> Option<Piece> {
    if mv.is_en_passant {
        let dir = match side {
            Color::White => -1,
            Color::Black => 1,
        };
        mv.to.offset(0, dir).and_then(|sq| position.piece_at(sq))
    } else {
        position.piece_at(mv.to)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
