//! Delimited-record persistence for a game session.
//!
//! Format (single line, nine `|`-separated fields):
//!
//! `mode|side|castling4|epOrDash|half|full|board64|capturesWhite|capturesBlack`
//!
//! The 64-character board runs rank 1 to rank 8, files a to h, with `.` for
//! an empty square, uppercase letters for White and lowercase for Black
//! using K/Q/R/B/N/P. The capture fields reuse the same letters in capture
//! order. Decoding fails as a unit: a bad record installs no state and the
//! caller falls back to a fresh game.

use chess_core::{CastlingRights, Color, Piece, PieceKind, Position, Square};
use thiserror::Error;

use crate::game::{ChessGame, GameMode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("expected 9 fields, found {0}")]
    FieldCount(usize),
    #[error("unknown game mode `{0}`")]
    UnknownMode(String),
    #[error("unknown side `{0}`")]
    UnknownSide(String),
    #[error("castling flags must be four '0'/'1' characters, got `{0}`")]
    BadCastling(String),
    #[error("invalid en-passant square `{0}`")]
    BadEnPassant(String),
    #[error("invalid counter `{0}`")]
    BadCounter(String),
    #[error("board encoding must be 64 characters, found {0}")]
    BadBoardLength(usize),
    #[error("invalid piece character `{0}`")]
    BadPieceChar(char),
}

/// Encode the session into a single-line record.
pub fn serialize(game: &ChessGame) -> String {
    let pos = game.position();

    let mode = match game.mode() {
        GameMode::Pvp => "PVP",
        GameMode::VsAi => "VS_AI",
    };
    let side = match game.side_to_move() {
        Color::White => "WHITE",
        Color::Black => "BLACK",
    };

    let cr = &pos.castling;
    let castling: String = [cr.wk, cr.wq, cr.bk, cr.bq]
        .iter()
        .map(|&v| if v { '1' } else { '0' })
        .collect();

    let ep = pos
        .en_passant
        .map(|sq| sq.to_algebraic())
        .unwrap_or_else(|| "-".to_string());

    let board: String = (0..64)
        .filter_map(Square::from_index)
        .map(|sq| piece_char(pos.piece_at(sq)))
        .collect();

    let cap_white: String = game
        .captured_by(Color::White)
        .iter()
        .map(|&p| piece_char(Some(p)))
        .collect();
    let cap_black: String = game
        .captured_by(Color::Black)
        .iter()
        .map(|&p| piece_char(Some(p)))
        .collect();

    format!(
        "{mode}|{side}|{castling}|{ep}|{}|{}|{board}|{cap_white}|{cap_black}",
        pos.halfmove_clock, pos.fullmove_number
    )
}

/// Decode a record produced by [`serialize`]. The restored game carries the
/// exact position, side to move and capture lists, but an empty move
/// history.
pub fn deserialize(s: &str) -> Result<ChessGame, SnapshotError> {
    let parts: Vec<&str> = s.split('|').collect();
    if parts.len() != 9 {
        return Err(SnapshotError::FieldCount(parts.len()));
    }

    let mode = match parts[0] {
        "PVP" => GameMode::Pvp,
        "VS_AI" => GameMode::VsAi,
        other => return Err(SnapshotError::UnknownMode(other.to_string())),
    };
    let side = match parts[1] {
        "WHITE" => Color::White,
        "BLACK" => Color::Black,
        other => return Err(SnapshotError::UnknownSide(other.to_string())),
    };

    let castling = parse_castling(parts[2])?;
    let en_passant = match parts[3] {
        "-" => None,
        text => Some(
            Square::from_algebraic(text)
                .ok_or_else(|| SnapshotError::BadEnPassant(text.to_string()))?,
        ),
    };
    let halfmove_clock: u32 = parts[4]
        .parse()
        .map_err(|_| SnapshotError::BadCounter(parts[4].to_string()))?;
    let fullmove_number: u32 = parts[5]
        .parse()
        .map_err(|_| SnapshotError::BadCounter(parts[5].to_string()))?;

    let board_text = parts[6];
    let board_len = board_text.chars().count();
    if board_len != 64 {
        return Err(SnapshotError::BadBoardLength(board_len));
    }

    let mut position = Position::empty();
    for (idx, ch) in board_text.chars().enumerate() {
        if let (Some(piece), Some(sq)) = (parse_piece_char(ch)?, Square::from_index(idx)) {
            position = position.with_piece(sq, Some(piece));
        }
    }
    position.castling = castling;
    position.en_passant = en_passant;
    position.halfmove_clock = halfmove_clock;
    position.fullmove_number = fullmove_number;

    let captured_white = parse_captures(parts[7])?;
    let captured_black = parse_captures(parts[8])?;

    Ok(ChessGame::restore(
        mode,
        position,
        side,
        captured_white,
        captured_black,
    ))
}

fn parse_castling(text: &str) -> Result<CastlingRights, SnapshotError> {
    let flags: Vec<char> = text.chars().collect();
    if flags.len() != 4 || flags.iter().any(|&c| c != '0' && c != '1') {
        return Err(SnapshotError::BadCastling(text.to_string()));
    }
    Ok(CastlingRights {
        wk: flags[0] == '1',
        wq: flags[1] == '1',
        bk: flags[2] == '1',
        bq: flags[3] == '1',
    })
}

fn piece_char(p: Option<Piece>) -> char {
    match p {
        None => '.',
        Some(p) => {
            let c = p.kind.letter();
            if p.color == Color::White {
                c
            } else {
                c.to_ascii_lowercase()
            }
        }
    }
}

fn parse_piece_char(c: char) -> Result<Option<Piece>, SnapshotError> {
    if c == '.' {
        return Ok(None);
    }
    let kind = PieceKind::from_letter(c).ok_or(SnapshotError::BadPieceChar(c))?;
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Ok(Some(Piece::new(kind, color)))
}

fn parse_captures(text: &str) -> Result<Vec<Piece>, SnapshotError> {
    text.chars()
        .map(|c| parse_piece_char(c)?.ok_or(SnapshotError::BadPieceChar(c)))
        .collect()
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
