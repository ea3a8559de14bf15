//! Attack geometry on reduced boards.
//!
//! Attack sets ignore occupancy entirely: sliders always reach the board edge
//! and nothing blocks or captures. On 3x3 to 4x8 boards with a handful of
//! pieces, raw reach is what the puzzles score against.

use super::types::{BoardDimensions, PieceKind, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Squares a piece of `kind` standing on `from` threatens.
///
/// `from` must lie inside `dims`; the composers only ever pass squares they
/// drew from the board. The result never contains `from` and never repeats a
/// square.
pub fn attack_squares(kind: PieceKind, from: Square, dims: BoardDimensions) -> Vec<Square> {
    debug_assert!(dims.contains_square(from), "{from} is off a {dims:?} board");

    match kind {
        PieceKind::Pawn => pawn_attacks(from, dims),
        PieceKind::Rook => slide(from, &ORTHOGONAL, dims),
        PieceKind::Bishop => slide(from, &DIAGONAL, dims),
        PieceKind::Queen => {
            let mut attacks = slide(from, &ORTHOGONAL, dims);
            attacks.extend(slide(from, &DIAGONAL, dims));
            attacks
        }
        PieceKind::Knight => step(from, &KNIGHT_OFFSETS, dims),
        PieceKind::King => step(from, &KING_OFFSETS, dims),
    }
}

/// Whether a piece of `kind` on `from` threatens `target`.
pub fn attacks(kind: PieceKind, from: Square, target: Square, dims: BoardDimensions) -> bool {
    from != target && attack_squares(kind, from, dims).contains(&target)
}

/// Forward diagonals only (toward higher ranks). Nothing from the last rank.
fn pawn_attacks(from: Square, dims: BoardDimensions) -> Vec<Square> {
    [(-1, 1), (1, 1)]
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr, dims))
        .collect()
}

fn slide(from: Square, directions: &[(i8, i8)], dims: BoardDimensions) -> Vec<Square> {
    let mut squares = Vec::new();
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(next) = current.offset(df, dr, dims) {
            squares.push(next);
            current = next;
        }
    }
    squares
}

fn step(from: Square, offsets: &[(i8, i8)], dims: BoardDimensions) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr, dims))
        .collect()
}
