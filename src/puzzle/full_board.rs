//! Full-board checkmate puzzles drawn from the catalog.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use super::catalog::{Catalog, CatalogEntry, CatalogError};
use super::checkmate::compose_checkmate_simple;
use super::rules::{PositionError, RulesEngine};
use super::types::{
    BoardDimensions, EnemyPlacement, EnemyRole, Piece, PieceKind, Puzzle, PuzzleType, Square,
};
use crate::constants::CATALOG_FALLBACK_LEVEL;

/// Why a catalog entry could not be turned into a puzzle.
#[derive(Debug, Error)]
pub enum CatalogMismatch {
    #[error(transparent)]
    Move(#[from] CatalogError),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),
    #[error("{from}-{to} is not legal in this position")]
    IllegalMove { from: Square, to: Square },
}

/// Compose a full-board checkmate puzzle from a random catalog entry.
///
/// Never fails: an empty catalog or an entry the rules engine disagrees with
/// falls back to a reduced-board checkmate at `CATALOG_FALLBACK_LEVEL`.
pub fn compose_checkmate_from_catalog<E: RulesEngine, R: Rng>(
    level: u32,
    catalog: &Catalog,
    rules: &E,
    rng: &mut R,
) -> Puzzle {
    let Some(entry) = catalog.draw(rng) else {
        warn!(level, "catalog is empty, using reduced-board checkmate");
        return compose_checkmate_simple(CATALOG_FALLBACK_LEVEL, rng);
    };

    match puzzle_from_entry(entry, rules) {
        Ok(puzzle) => {
            debug!(level, id = %entry.id, "drew catalog position");
            puzzle
        }
        Err(reason) => {
            warn!(level, id = %entry.id, %reason, "catalog entry unusable, using reduced-board checkmate");
            compose_checkmate_simple(CATALOG_FALLBACK_LEVEL, rng)
        }
    }
}

/// Build the puzzle for one catalog entry.
///
/// Only the catalog's own move is scored correct, even if the position has
/// other mates.
pub fn puzzle_from_entry<E: RulesEngine>(
    entry: &CatalogEntry,
    rules: &E,
) -> Result<Puzzle, CatalogMismatch> {
    let (from, to) = entry.parse_move()?;
    let board = rules.parse(&entry.position)?;

    let piece = rules
        .occupant(&board, from)
        .ok_or(CatalogMismatch::EmptyOrigin(from))?;

    let all_valid_moves = rules.legal_moves(&board, from);
    if !all_valid_moves.contains(&to) {
        return Err(CatalogMismatch::IllegalMove { from, to });
    }

    let dims = BoardDimensions::FULL_BOARD;
    let occupants: Vec<(Square, Piece)> = dims
        .squares()
        .filter(|&sq| sq != from)
        .filter_map(|sq| rules.occupant(&board, sq).map(|p| (sq, p)))
        .collect();

    let king_position = occupants
        .iter()
        .find(|(_, p)| p.kind == PieceKind::King && p.color != piece.color)
        .map(|&(sq, _)| sq);

    let enemy_pieces = occupants
        .into_iter()
        .map(|(square, occupant)| classify(square, occupant, piece))
        .collect();

    Ok(Puzzle {
        piece,
        piece_position: from,
        enemy_pieces,
        valid_squares: vec![to],
        solution: to,
        all_valid_moves,
        board_dimensions: dims,
        puzzle_type: PuzzleType::Checkmate,
        king_position,
        external_position_id: Some(entry.id.clone()),
        position: Some(entry.position.clone()),
    })
}

fn classify(square: Square, occupant: Piece, mover: Piece) -> EnemyPlacement {
    let role = if occupant.color == mover.color {
        EnemyRole::Helper
    } else if occupant.kind == PieceKind::King {
        EnemyRole::King
    } else {
        EnemyRole::Plain
    };
    EnemyPlacement {
        square,
        capturable: role == EnemyRole::King,
        role,
        piece: Some(occupant),
    }
}
