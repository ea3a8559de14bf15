//! Entry points that route a request to the right composer.

use rand::Rng;

use super::capture::compose_capture;
use super::catalog::Catalog;
use super::checkmate::compose_checkmate_simple;
use super::full_board::compose_checkmate_from_catalog;
use super::rules::RulesEngine;
use super::types::{Puzzle, PuzzleType};
use crate::constants::CATALOG_MIN_LEVEL;

/// Checkmate puzzle for `level`: reduced board below the catalog level,
/// catalog positions from there on.
pub fn compose_checkmate<E: RulesEngine, R: Rng>(
    level: u32,
    catalog: &Catalog,
    rules: &E,
    rng: &mut R,
) -> Puzzle {
    if level < CATALOG_MIN_LEVEL {
        compose_checkmate_simple(level, rng)
    } else {
        compose_checkmate_from_catalog(level, catalog, rules, rng)
    }
}

pub fn compose_puzzle<E: RulesEngine, R: Rng>(
    level: u32,
    puzzle_type: PuzzleType,
    catalog: &Catalog,
    rules: &E,
    rng: &mut R,
) -> Puzzle {
    match puzzle_type {
        PuzzleType::Capture => compose_capture(level, rng),
        PuzzleType::Checkmate => compose_checkmate(level, catalog, rules, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::rules::ChessEngineRules;
    use crate::puzzle::types::BoardDimensions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_checkmate_routing_by_level() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);

        for level in 1..CATALOG_MIN_LEVEL {
            let puzzle = compose_checkmate(level, &catalog, &ChessEngineRules, &mut rng);
            assert!(puzzle.external_position_id.is_none());
            assert_eq!(puzzle.board_dimensions, BoardDimensions::for_level(level));
        }

        for level in CATALOG_MIN_LEVEL..CATALOG_MIN_LEVEL + 5 {
            let puzzle = compose_checkmate(level, &catalog, &ChessEngineRules, &mut rng);
            assert!(puzzle.external_position_id.is_some());
            assert_eq!(puzzle.board_dimensions, BoardDimensions::FULL_BOARD);
        }
    }

    #[test]
    fn test_compose_puzzle_respects_type() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for level in 1..=8 {
            let capture =
                compose_puzzle(level, PuzzleType::Capture, &catalog, &ChessEngineRules, &mut rng);
            assert_eq!(capture.puzzle_type, PuzzleType::Capture);
            let mate =
                compose_puzzle(level, PuzzleType::Checkmate, &catalog, &ChessEngineRules, &mut rng);
            assert_eq!(mate.puzzle_type, PuzzleType::Checkmate);
        }
    }
}
