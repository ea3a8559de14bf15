//! Puzzle data structures: squares, board extents, pieces and the puzzle record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MEDIUM_BOARD_MAX_LEVEL, SMALL_BOARD_MAX_LEVEL};

pub const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Error returned when a square label such as `"b2"` cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("square label must be two characters, got {0:?}")]
    Length(String),
    #[error("unknown file {0:?}")]
    File(char),
    #[error("unknown rank {0:?}")]
    Rank(char),
}

/// A board coordinate. Both indices are 0-based: file 0 = `a`, rank 0 = `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    /// Both indices must be below 8; labels and board iteration rely on it.
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8, "square off the 8x8 grid");
        Self { file, rank }
    }

    /// Offset this square by a signed delta. Returns `None` when the result
    /// leaves the board.
    pub fn offset(self, d_file: i8, d_rank: i8, dims: BoardDimensions) -> Option<Square> {
        let file = self.file as i8 + d_file;
        let rank = self.rank as i8 + d_rank;
        if dims.contains(file, rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn file_char(self) -> char {
        FILES[self.file as usize]
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError::Length(s.to_string()));
        };
        let file_idx = FILES
            .iter()
            .position(|&c| c == file)
            .ok_or(ParseSquareError::File(file))?;
        let rank_idx = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseSquareError::Rank(rank)),
        };
        Ok(Square::new(file_idx as u8, rank_idx))
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// Extent of the play area, anchored at `a1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDimensions {
    pub cols: u8,
    pub rows: u8,
}

impl BoardDimensions {
    pub const SMALL: Self = Self { cols: 3, rows: 3 };
    pub const MEDIUM: Self = Self { cols: 4, rows: 4 };
    pub const WIDE: Self = Self { cols: 8, rows: 4 };
    pub const FULL_BOARD: Self = Self { cols: 8, rows: 8 };

    /// Board extent for a difficulty level. Levels saturate: anything at or
    /// below the first tier is 3x3, anything above the second tier is 4x8.
    pub fn for_level(level: u32) -> Self {
        if level <= SMALL_BOARD_MAX_LEVEL {
            Self::SMALL
        } else if level <= MEDIUM_BOARD_MAX_LEVEL {
            Self::MEDIUM
        } else {
            Self::WIDE
        }
    }

    pub fn contains(&self, file: i8, rank: i8) -> bool {
        file >= 0 && file < self.cols as i8 && rank >= 0 && rank < self.rows as i8
    }

    pub fn contains_square(&self, square: Square) -> bool {
        square.file < self.cols && square.rank < self.rows
    }

    /// Every square on the board, file-major (a1, a2, ..., b1, ...).
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.cols).flat_map(move |file| (0..self.rows).map(move |rank| Square::new(file, rank)))
    }

    pub fn is_small(&self) -> bool {
        *self == Self::SMALL
    }

    /// Corner squares, file-major.
    pub fn corners(&self) -> Vec<Square> {
        let last_file = self.cols - 1;
        let last_rank = self.rows - 1;
        vec![
            Square::new(0, 0),
            Square::new(0, last_rank),
            Square::new(last_file, 0),
            Square::new(last_file, last_rank),
        ]
    }

    /// Squares on the outer ring of the board, corners included.
    pub fn edge_squares(self) -> impl Iterator<Item = Square> {
        self.squares().filter(move |sq| {
            sq.file == 0 || sq.rank == 0 || sq.file == self.cols - 1 || sq.rank == self.rows - 1
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Bishop,
    Knight,
    Queen,
    /// Only ever a target or a catalog occupant, never picked as the moving piece.
    King,
}

impl PieceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "Pawn",
            Self::Rook => "Rook",
            Self::Bishop => "Bishop",
            Self::Knight => "Knight",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// The player's side on reduced boards.
    pub const fn white(kind: PieceKind) -> Self {
        Self::new(kind, Color::White)
    }
}

/// What an occupied non-player square stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyRole {
    Plain,
    Blocker,
    King,
    /// Same-coloured support piece on a catalog board.
    Helper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    pub square: Square,
    pub capturable: bool,
    pub role: EnemyRole,
    /// Concrete occupant, when known. Generic reduced-board enemies leave it empty.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub piece: Option<Piece>,
}

impl EnemyPlacement {
    pub fn plain(square: Square, capturable: bool) -> Self {
        Self {
            square,
            capturable,
            role: EnemyRole::Plain,
            piece: None,
        }
    }

    pub fn blocker(square: Square) -> Self {
        Self {
            square,
            capturable: false,
            role: EnemyRole::Blocker,
            piece: None,
        }
    }

    pub fn king(square: Square, color: Color, capturable: bool) -> Self {
        Self {
            square,
            capturable,
            role: EnemyRole::King,
            piece: Some(Piece::new(PieceKind::King, color)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleType {
    Capture,
    Checkmate,
}

/// A composed puzzle. Built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub piece: Piece,
    pub piece_position: Square,
    pub enemy_pieces: Vec<EnemyPlacement>,
    /// Every square the player may pick and be scored correct.
    pub valid_squares: Vec<Square>,
    pub solution: Square,
    pub all_valid_moves: Vec<Square>,
    pub board_dimensions: BoardDimensions,
    pub puzzle_type: PuzzleType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub king_position: Option<Square>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub external_position_id: Option<String>,
    /// FEN of the full-board position for catalog puzzles.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<String>,
}

impl Puzzle {
    pub fn is_correct(&self, square: Square) -> bool {
        self.valid_squares.contains(&square)
    }

    pub fn is_solvable(&self) -> bool {
        !self.valid_squares.is_empty()
    }

    pub fn capturable_count(&self) -> usize {
        self.enemy_pieces.iter().filter(|e| e.capturable).count()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_position == square || self.enemy_pieces.iter().any(|e| e.square == square)
    }
}
