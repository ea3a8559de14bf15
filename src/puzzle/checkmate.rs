//! Reduced-board "find the checkmate" puzzles.
//!
//! The king sits on a corner or edge and the player's piece is placed on the
//! first square (file-major) that attacks it. Escape squares are not checked:
//! "mate" here means the piece lands on the king. Full-board puzzles with
//! real mates come from the catalog instead.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use super::geometry::{attack_squares, attacks};
use super::types::{
    BoardDimensions, Color, EnemyPlacement, Piece, PieceKind, Puzzle, PuzzleType, Square,
};
use crate::constants::{BLOCKER_START_LEVEL, CHECKMATE_MINOR_PIECE_LEVEL, MAX_BLOCKERS};

/// Pieces that deliver mate at a level: heavy pieces first, minors later.
pub fn checkmate_repertoire(level: u32) -> Vec<PieceKind> {
    let mut pieces = vec![PieceKind::Rook, PieceKind::Queen];
    if level >= CHECKMATE_MINOR_PIECE_LEVEL {
        pieces.push(PieceKind::Bishop);
        pieces.push(PieceKind::Knight);
    }
    pieces
}

/// Where the enemy king may stand: corners on 3x3, the whole edge otherwise.
pub fn king_squares(dims: BoardDimensions) -> Vec<Square> {
    if dims.is_small() {
        dims.corners()
    } else {
        dims.edge_squares().collect()
    }
}

/// First square, scanning file-major, from which `kind` attacks `king`.
pub fn find_attacking_square(
    kind: PieceKind,
    king: Square,
    dims: BoardDimensions,
) -> Option<Square> {
    dims.squares()
        .filter(|&sq| sq != king)
        .find(|&sq| attacks(kind, sq, king, dims))
}

/// Deterministic placement used when no attacking square exists.
///
/// Rooks go two ranks along the king's file (wrapping). Everything else goes
/// to the center square. The result is not guaranteed to attack the king.
pub fn fallback_square(kind: PieceKind, king: Square, dims: BoardDimensions) -> Square {
    match kind {
        PieceKind::Rook => Square::new(king.file, (king.rank + 2) % dims.rows),
        _ => Square::new(dims.cols / 2, dims.rows / 2),
    }
}

/// Number of non-capturable blockers on boards wider than 3 columns.
pub fn blocker_count(level: u32, dims: BoardDimensions) -> usize {
    if level <= BLOCKER_START_LEVEL || dims.cols <= 3 {
        return 0;
    }
    ((level - BLOCKER_START_LEVEL) as usize).min(MAX_BLOCKERS)
}

/// Compose a reduced-board checkmate puzzle.
///
/// `valid_squares` is `[king]` when the piece attacks the king and empty on
/// the fallback path; the solution is always the king square.
pub fn compose_checkmate_simple<R: Rng>(level: u32, rng: &mut R) -> Puzzle {
    let dims = BoardDimensions::for_level(level);
    let repertoire = checkmate_repertoire(level);
    let kind = repertoire[rng.gen_range(0..repertoire.len())];

    let candidates = king_squares(dims);
    let king = candidates[rng.gen_range(0..candidates.len())];

    let piece_position = find_attacking_square(kind, king, dims).unwrap_or_else(|| {
        let fallback = fallback_square(kind, king, dims);
        warn!(?kind, %king, %fallback, "no attacking square for checkmate, using fallback");
        fallback
    });

    let attack_set = attack_squares(kind, piece_position, dims);
    let king_reachable = attack_set.contains(&king);

    let free: Vec<Square> = dims
        .squares()
        .filter(|&sq| sq != king && sq != piece_position)
        .collect();
    let blockers = free
        .choose_multiple(rng, blocker_count(level, dims))
        .map(|&sq| EnemyPlacement::blocker(sq));

    let enemy_pieces: Vec<EnemyPlacement> =
        std::iter::once(EnemyPlacement::king(king, Color::Black, king_reachable))
            .chain(blockers)
            .collect();

    let valid_squares = if king_reachable { vec![king] } else { Vec::new() };

    Puzzle {
        piece: Piece::white(kind),
        piece_position,
        enemy_pieces,
        valid_squares,
        solution: king,
        all_valid_moves: attack_set,
        board_dimensions: dims,
        puzzle_type: PuzzleType::Checkmate,
        king_position: Some(king),
        external_position_id: None,
        position: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::types::EnemyRole;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    #[test]
    fn test_king_squares_small_board_corners() {
        let squares = king_squares(BoardDimensions::SMALL);
        assert_eq!(squares, vec![sq("a1"), sq("a3"), sq("c1"), sq("c3")]);
    }

    #[test]
    fn test_king_squares_medium_board_edges() {
        let squares = king_squares(BoardDimensions::MEDIUM);
        assert_eq!(squares.len(), 12);
        assert!(!squares.contains(&sq("b2")));
        assert!(squares.contains(&sq("b1")));
    }

    #[test]
    fn test_find_attacking_square_first_match() {
        // a1 is excluded (king), a2 is the first square a rook sees the king from
        let found = find_attacking_square(PieceKind::Rook, sq("a1"), BoardDimensions::SMALL);
        assert_eq!(found, Some(sq("a2")));

        let found = find_attacking_square(PieceKind::Knight, sq("a1"), BoardDimensions::SMALL);
        assert_eq!(found, Some(sq("b3")));
    }

    #[test]
    fn test_find_attacking_square_pawn_cannot_reach_first_rank() {
        let found = find_attacking_square(PieceKind::Pawn, sq("a1"), BoardDimensions::SMALL);
        assert_eq!(found, None);
    }

    #[test]
    fn test_fallback_square() {
        let dims = BoardDimensions::SMALL;
        assert_eq!(fallback_square(PieceKind::Rook, sq("a1"), dims), sq("a3"));
        assert_eq!(fallback_square(PieceKind::Rook, sq("c3"), dims), sq("c2"));
        assert_eq!(fallback_square(PieceKind::Pawn, sq("a1"), dims), sq("b2"));
        assert_eq!(
            fallback_square(PieceKind::Queen, sq("a1"), BoardDimensions::MEDIUM),
            sq("c3")
        );
    }

    #[test]
    fn test_blocker_count() {
        assert_eq!(blocker_count(1, BoardDimensions::SMALL), 0);
        assert_eq!(blocker_count(4, BoardDimensions::SMALL), 0);
        assert_eq!(blocker_count(4, BoardDimensions::MEDIUM), 1);
        assert_eq!(blocker_count(5, BoardDimensions::MEDIUM), 2);
        assert_eq!(blocker_count(9, BoardDimensions::WIDE), 2);
    }

    #[test]
    fn test_compose_checkmate_simple_invariants() {
        let mut rng = create_test_rng();
        for level in 1..=4 {
            for _ in 0..100 {
                let puzzle = compose_checkmate_simple(level, &mut rng);
                let dims = puzzle.board_dimensions;
                let king = puzzle.king_position.unwrap();

                assert_eq!(puzzle.puzzle_type, PuzzleType::Checkmate);
                assert_eq!(puzzle.solution, king);
                assert_eq!(puzzle.valid_squares, vec![king]);
                assert!(puzzle.all_valid_moves.contains(&king));
                assert!(attacks(puzzle.piece.kind, puzzle.piece_position, king, dims));
                assert_ne!(puzzle.piece.kind, PieceKind::Pawn);

                let kings: Vec<_> = puzzle
                    .enemy_pieces
                    .iter()
                    .filter(|e| e.role == EnemyRole::King)
                    .collect();
                assert_eq!(kings.len(), 1);
                assert_eq!(kings[0].square, king);
                assert!(kings[0].capturable);
            }
        }
    }

    #[test]
    fn test_compose_checkmate_simple_blockers() {
        let mut rng = create_test_rng();
        for _ in 0..100 {
            let puzzle = compose_checkmate_simple(4, &mut rng);
            let king = puzzle.king_position.unwrap();
            let blockers: Vec<_> = puzzle
                .enemy_pieces
                .iter()
                .filter(|e| e.role == EnemyRole::Blocker)
                .collect();
            assert_eq!(blockers.len(), 1);
            for blocker in blockers {
                assert!(!blocker.capturable);
                assert_ne!(blocker.square, king);
                assert_ne!(blocker.square, puzzle.piece_position);
            }
        }

        for _ in 0..20 {
            let puzzle = compose_checkmate_simple(2, &mut rng);
            assert_eq!(puzzle.enemy_pieces.len(), 1);
        }
    }

    #[test]
    fn test_small_board_king_always_cornered() {
        let mut rng = create_test_rng();
        let corners = BoardDimensions::SMALL.corners();
        for _ in 0..50 {
            let puzzle = compose_checkmate_simple(1, &mut rng);
            assert!(corners.contains(&puzzle.king_position.unwrap()));
        }
    }
}
