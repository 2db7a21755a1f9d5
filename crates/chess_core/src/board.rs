use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub fn none() -> Self {
        CastlingRights {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }
}

/// Immutable board state: occupancy, castling rights, en-passant target and
/// move counters. Side to move is tracked by the caller and passed into every
/// operation that needs it; transitions produce a fresh `Position` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square skipped by the last double pawn push
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::all();

        // Pawns
        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(PieceKind::Pawn, Color::White));
            p.board[48 + f] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(kind, Color::White));
            p.board[56 + f] = Some(Piece::new(kind, Color::Black));
        }
        p
    }

    /// Empty board, no castling rights, clocks at their initial values.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Forsyth-Edwards Notation parser used by tests and diagnostics.
    /// Returns the position together with the side to move. Panics on
    /// malformed input; runtime state restoration goes through the snapshot
    /// record instead.
    pub fn from_fen(fen: &str) -> (Self, Color) {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        assert!(parts.len() >= 4, "Invalid FEN: expected at least 4 fields");

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut pos = Position::empty();
        let ranks: Vec<&str> = board_part.split('/').collect();
        assert!(ranks.len() == 8, "Invalid FEN board section");

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_letter(ch)
                        .unwrap_or_else(|| panic!("Invalid piece char in FEN: {}", ch));
                    let sq =
                        Square::new(file, rank).expect("Square out of bounds while parsing FEN");
                    pos.board[sq.index()] = Some(Piece::new(kind, color));
                    file += 1;
                }
                assert!(file <= 8, "Too many files in FEN rank");
            }
            assert!(file == 8, "Not enough files in FEN rank");
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => panic!("Invalid side to move in FEN: {}", stm_part),
        };

        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => panic!("Invalid castling char in FEN: {}", c),
                }
            }
        }

        pos.en_passant = if ep_part == "-" {
            None
        } else {
            Square::from_algebraic(ep_part)
        };

        pos.halfmove_clock = halfmove_part.parse().expect("Invalid halfmove clock in FEN");
        pos.fullmove_number = fullmove_part
            .parse()
            .expect("Invalid fullmove number in FEN");

        (pos, side_to_move)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Functional single-square update; the receiver is left untouched.
    pub fn with_piece(&self, sq: Square, pc: Option<Piece>) -> Position {
        let mut next = self.clone();
        next.board[sq.index()] = pc;
        next
    }

    /// All occupied squares in rank-major order (a1 .. h8).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| Square::from_index(i).and_then(|sq| pc.map(|p| (sq, p))))
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        // Pawn attacks: the target is attacked from one rank behind the
        // pawn's advance direction.
        let pawn_dirs: &[(i8, i8)] = match by {
            Color::White => &[(-1, -1), (1, -1)],
            Color::Black => &[(-1, 1), (1, 1)],
        };
        for &(df, dr) in pawn_dirs {
            if let Some(s) = target.offset(df, dr)
                && let Some(pc) = self.piece_at(s)
                && pc.color == by
                && pc.kind == PieceKind::Pawn
            {
                return true;
            }
        }

        // Knight attacks
        let knight = [
            (1, 2),
            (2, 1),
            (-1, 2),
            (-2, 1),
            (1, -2),
            (2, -1),
            (-1, -2),
            (-2, -1),
        ];
        for (df, dr) in knight {
            if let Some(s) = target.offset(df, dr)
                && let Some(pc) = self.piece_at(s)
                && pc.color == by
                && pc.kind == PieceKind::Knight
            {
                return true;
            }
        }

        // King adjacency
        let king = [
            (1, 1),
            (1, 0),
            (1, -1),
            (0, 1),
            (0, -1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
        ];
        for (df, dr) in king {
            if let Some(s) = target.offset(df, dr)
                && let Some(pc) = self.piece_at(s)
                && pc.color == by
                && pc.kind == PieceKind::King
            {
                return true;
            }
        }

        // Sliding: bishop/rook/queen rays from the target outward, stopping
        // at the first occupied square in each direction.
        let diag = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        let ortho = [(1, 0), (-1, 0), (0, 1), (0, -1)];

        for (df, dr) in diag {
            let mut cur = target;
            while let Some(s) = cur.offset(df, dr) {
                if let Some(pc) = self.piece_at(s) {
                    if pc.color == by
                        && (pc.kind == PieceKind::Bishop || pc.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                cur = s;
            }
        }
        for (df, dr) in ortho {
            let mut cur = target;
            while let Some(s) = cur.offset(df, dr) {
                if let Some(pc) = self.piece_at(s) {
                    if pc.color == by
                        && (pc.kind == PieceKind::Rook || pc.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                cur = s;
            }
        }

        false
    }

    /// Applies an already-validated move for `side` and returns the successor
    /// position. The move must come from the legal-move set; this performs no
    /// legality checking of its own. Panics if the origin square is empty,
    /// which cannot happen for a legal move.
    pub fn apply_move(&self, mv: Move, side: Color) -> Position {
        let moving = self.piece_at(mv.from).expect("no piece on from-square");
        let target_piece = self.piece_at(mv.to);

        let mut next = self.clone();
        next.board[mv.from.index()] = None;

        // En-passant: the captured pawn sits behind the destination square.
        if mv.is_en_passant {
            let dir = match side {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cap_sq) = mv.to.offset(0, dir) {
                next.board[cap_sq.index()] = None;
            }
        }

        // Castling: relocate the rook from its corner.
        if mv.is_castle_king_side || mv.is_castle_queen_side {
            let rank: i8 = match side {
                Color::White => 0,
                Color::Black => 7,
            };
            let (rook_from, rook_to) = if mv.is_castle_king_side { (7, 5) } else { (0, 3) };
            if let (Some(rf), Some(rt)) = (Square::new(rook_from, rank), Square::new(rook_to, rank))
            {
                next.board[rf.index()] = None;
                next.board[rt.index()] = Some(Piece::new(PieceKind::Rook, side));
            }
        }

        let placed = match (moving.kind, mv.promotion) {
            (PieceKind::Pawn, Some(promo)) => Piece::new(promo, moving.color),
            _ => moving,
        };
        next.board[mv.to.index()] = Some(placed);

        next.castling = updated_castling(&self.castling, moving, mv.from, target_piece, mv.to);
        next.en_passant = en_passant_target(moving, mv.from, mv.to);

        let resets_clock = moving.kind == PieceKind::Pawn || target_piece.is_some() || mv.is_en_passant;
        next.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        next.fullmove_number = if side == Color::Black {
            self.fullmove_number + 1
        } else {
            self.fullmove_number
        };

        next
    }
}

/// The square a double pawn push skips over, if this move is one.
fn en_passant_target(moving: Piece, from: Square, to: Square) -> Option<Square> {
    if moving.kind != PieceKind::Pawn {
        return None;
    }
    if (to.rank() - from.rank()).abs() != 2 {
        return None;
    }
    Square::new(from.file(), (from.rank() + to.rank()) / 2)
}

/// Rights only ever degrade: a king move drops both of its side's rights, a
/// rook leaving or being captured on its home corner drops that wing.
fn updated_castling(
    current: &CastlingRights,
    moving: Piece,
    from: Square,
    captured: Option<Piece>,
    to: Square,
) -> CastlingRights {
    let mut cr = current.clone();

    if moving.kind == PieceKind::King {
        match moving.color {
            Color::White => {
                cr.wk = false;
                cr.wq = false;
            }
            Color::Black => {
                cr.bk = false;
                cr.bq = false;
            }
        }
    }

    if moving.kind == PieceKind::Rook {
        match moving.color {
            Color::White => {
                if from.index() == 0 {
                    cr.wq = false;
                }
                if from.index() == 7 {
                    cr.wk = false;
                }
            }
            Color::Black => {
                if from.index() == 56 {
                    cr.bq = false;
                }
                if from.index() == 63 {
                    cr.bk = false;
                }
            }
        }
    }

    if let Some(cp) = captured
        && cp.kind == PieceKind::Rook
    {
        match cp.color {
            Color::White => {
                if to.index() == 0 {
                    cr.wq = false;
                }
                if to.index() == 7 {
                    cr.wk = false;
                }
            }
            Color::Black => {
                if to.index() == 56 {
                    cr.bq = false;
                }
                if to.index() == 63 {
                    cr.bk = false;
                }
            }
        }
    }

    cr
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
