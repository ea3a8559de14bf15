//! Full-board rules, backed by the `chess-engine` crate.
//!
//! Catalog positions are FEN strings. Only piece placement and side to move
//! are read; castling is disabled and en passant ignored since a
//! mate-in-one catalog never needs either.

use chess_engine::{Board, BoardBuilder, Evaluate, Move, Position};
use thiserror::Error;

use super::types::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position string is empty")]
    Empty,
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} covers {files} files instead of 8")]
    RankWidth { rank: usize, files: usize },
    #[error("unknown piece letter {0:?}")]
    PieceLetter(char),
    #[error("unknown side to move {0:?}")]
    SideToMove(String),
    #[error("position has no {0:?} king")]
    MissingKing(Color),
}

/// What the catalog composer needs from a chess rules implementation.
pub trait RulesEngine {
    type Board;

    fn parse(&self, position: &str) -> Result<Self::Board, PositionError>;

    fn occupant(&self, board: &Self::Board, square: Square) -> Option<Piece>;

    /// Destinations of every fully legal move starting on `origin` for the
    /// side to move.
    fn legal_moves(&self, board: &Self::Board, origin: Square) -> Vec<Square>;
}

/// Parsed FEN placement: occupied squares plus the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub pieces: Vec<(Square, Piece)>,
    pub side_to_move: Color,
}

/// Parse the placement and side-to-move fields of a FEN string.
pub fn parse_fen(fen: &str) -> Result<Placement, PositionError> {
    let mut fields = fen.split_whitespace();
    let board_field = fields.next().ok_or(PositionError::Empty)?;

    let side_to_move = match fields.next() {
        None | Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => return Err(PositionError::SideToMove(other.to_string())),
    };

    let ranks: Vec<&str> = board_field.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::RankCount(ranks.len()));
    }

    let mut pieces = Vec::new();
    // FEN lists rank 8 first
    for (i, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0usize;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let piece = piece_from_letter(c)?;
            if file < 8 {
                pieces.push((Square::new(file as u8, rank), piece));
            }
            file += 1;
        }
        if file != 8 {
            return Err(PositionError::RankWidth {
                rank: rank as usize + 1,
                files: file,
            });
        }
    }

    for color in [Color::White, Color::Black] {
        let has_king = pieces
            .iter()
            .any(|(_, p)| p.kind == PieceKind::King && p.color == color);
        if !has_king {
            return Err(PositionError::MissingKing(color));
        }
    }

    Ok(Placement {
        pieces,
        side_to_move,
    })
}

fn piece_from_letter(c: char) -> Result<Piece, PositionError> {
    let kind = match c.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return Err(PositionError::PieceLetter(c)),
    };
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Ok(Piece::new(kind, color))
}

/// `RulesEngine` over `chess_engine::Board`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessEngineRules;

impl RulesEngine for ChessEngineRules {
    type Board = Board;

    fn parse(&self, position: &str) -> Result<Board, PositionError> {
        let placement = parse_fen(position)?;
        let board = placement
            .pieces
            .iter()
            .fold(BoardBuilder::default(), |builder, &(square, piece)| {
                builder.piece(to_engine_piece(piece, square))
            })
            .build();
        Ok(board.set_turn(to_engine_color(placement.side_to_move)))
    }

    fn occupant(&self, board: &Board, square: Square) -> Option<Piece> {
        board.get_piece(to_position(square)).map(from_engine_piece)
    }

    fn legal_moves(&self, board: &Board, origin: Square) -> Vec<Square> {
        let mut destinations: Vec<Square> = board
            .get_legal_moves()
            .into_iter()
            .filter_map(|m| match m {
                Move::Piece(from, to)
                    if from.get_row() == origin.rank as i32
                        && from.get_col() == origin.file as i32 =>
                {
                    Some(from_position(to))
                }
                _ => None,
            })
            .collect();
        destinations.sort();
        destinations.dedup();
        destinations
    }
}

fn to_position(square: Square) -> Position {
    Position::new(square.rank as i32, square.file as i32)
}

fn from_position(pos: Position) -> Square {
    Square::new(pos.get_col() as u8, pos.get_row() as u8)
}

fn to_engine_color(color: Color) -> chess_engine::Color {
    match color {
        Color::White => chess_engine::Color::White,
        Color::Black => chess_engine::Color::Black,
    }
}

fn from_engine_color(color: chess_engine::Color) -> Color {
    match color {
        chess_engine::Color::White => Color::White,
        chess_engine::Color::Black => Color::Black,
    }
}

fn to_engine_piece(piece: Piece, square: Square) -> chess_engine::Piece {
    let color = to_engine_color(piece.color);
    let pos = to_position(square);
    match piece.kind {
        PieceKind::Pawn => chess_engine::Piece::Pawn(color, pos),
        PieceKind::Knight => chess_engine::Piece::Knight(color, pos),
        PieceKind::Bishop => chess_engine::Piece::Bishop(color, pos),
        PieceKind::Rook => chess_engine::Piece::Rook(color, pos),
        PieceKind::Queen => chess_engine::Piece::Queen(color, pos),
        PieceKind::King => chess_engine::Piece::King(color, pos),
    }
}

fn from_engine_piece(piece: chess_engine::Piece) -> Piece {
    let kind = match piece {
        chess_engine::Piece::Pawn(..) => PieceKind::Pawn,
        chess_engine::Piece::Knight(..) => PieceKind::Knight,
        chess_engine::Piece::Bishop(..) => PieceKind::Bishop,
        chess_engine::Piece::Rook(..) => PieceKind::Rook,
        chess_engine::Piece::Queen(..) => PieceKind::Queen,
        chess_engine::Piece::King(..) => PieceKind::King,
    };
    Piece::new(kind, from_engine_color(piece.get_color()))
}
