//! "Find the capture" puzzles: one white piece, a few enemies, at least one
//! of them inside the piece's attack set.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::geometry::attack_squares;
use super::types::{
    BoardDimensions, EnemyPlacement, Piece, PieceKind, Puzzle, PuzzleType, Square,
};
use crate::constants::{BASE_ENEMY_COUNT, QUEEN_UNLOCK_LEVEL, SMALL_BOARD_ENEMY_CAP};

/// Curated 3x3 starting squares, chosen so every piece has some reach.
const SMALL_ROOK_SQUARES: [Square; 3] = [Square::new(1, 1), Square::new(0, 0), Square::new(2, 2)];
const SMALL_BISHOP_SQUARES: [Square; 1] = [Square::new(1, 1)];
const SMALL_KNIGHT_SQUARES: [Square; 4] = [
    Square::new(0, 0),
    Square::new(2, 0),
    Square::new(0, 2),
    Square::new(2, 2),
];
const SMALL_PAWN_SQUARES: [Square; 4] = [
    Square::new(0, 0),
    Square::new(1, 0),
    Square::new(2, 0),
    Square::new(1, 1),
];
const SMALL_CENTER: [Square; 1] = [Square::new(1, 1)];

/// b2, b3, c2, c3
const MEDIUM_CENTER_SQUARES: [Square; 4] = [
    Square::new(1, 1),
    Square::new(1, 2),
    Square::new(2, 1),
    Square::new(2, 2),
];

/// Pieces the player may be handed at a level. Queen joins above the unlock level.
pub fn capture_repertoire(level: u32) -> Vec<PieceKind> {
    let mut pieces = vec![
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];
    if level > QUEEN_UNLOCK_LEVEL {
        pieces.push(PieceKind::Queen);
    }
    pieces
}

/// How many enemies to put on the board.
pub fn enemy_count(level: u32, dims: BoardDimensions, available: usize) -> usize {
    let wanted = if dims.is_small() {
        SMALL_BOARD_ENEMY_CAP
    } else {
        BASE_ENEMY_COUNT + (level / 2) as usize
    };
    wanted.min(available)
}

/// Pick the player's starting square.
///
/// - 3x3: curated per piece kind
/// - 4x4: one of the four center squares
/// - wider: near the middle, jittered by one file either way and one rank down
pub fn starting_square<R: Rng>(kind: PieceKind, dims: BoardDimensions, rng: &mut R) -> Square {
    if dims.is_small() {
        let curated: &[Square] = match kind {
            PieceKind::Rook => &SMALL_ROOK_SQUARES,
            PieceKind::Bishop => &SMALL_BISHOP_SQUARES,
            PieceKind::Knight => &SMALL_KNIGHT_SQUARES,
            PieceKind::Pawn => &SMALL_PAWN_SQUARES,
            PieceKind::Queen | PieceKind::King => &SMALL_CENTER,
        };
        return curated[rng.gen_range(0..curated.len())];
    }

    if dims == BoardDimensions::MEDIUM {
        return MEDIUM_CENTER_SQUARES[rng.gen_range(0..MEDIUM_CENTER_SQUARES.len())];
    }

    let file = (dims.cols / 2) as i8 + rng.gen_range(-1..=1);
    let rank = (dims.rows / 2) as i8 + rng.gen_range(-1..=0);
    Square::new(
        file.clamp(0, dims.cols as i8 - 1) as u8,
        rank.clamp(0, dims.rows as i8 - 1) as u8,
    )
}

/// Compose a capture puzzle for `level`.
///
/// Always returns a solvable puzzle: when a draw leaves the piece with no
/// capturable square (a knight boxed into a corner, a pawn on the last rank),
/// piece and placement are drawn again. A rook always has reach on every
/// board tier, so the loop terminates.
pub fn compose_capture<R: Rng>(level: u32, rng: &mut R) -> Puzzle {
    let dims = BoardDimensions::for_level(level);
    let repertoire = capture_repertoire(level);

    let mut attempt = 1u32;
    loop {
        let kind = repertoire[rng.gen_range(0..repertoire.len())];
        let position = starting_square(kind, dims, rng);
        if let Some(puzzle) = build_capture(level, dims, kind, position, rng) {
            return puzzle;
        }
        debug!(attempt, ?kind, %position, "capture draw had no reachable square, retrying");
        attempt += 1;
    }
}

/// Place enemies around a fixed piece. `None` when the piece reaches nothing.
pub fn build_capture<R: Rng>(
    level: u32,
    dims: BoardDimensions,
    kind: PieceKind,
    position: Square,
    rng: &mut R,
) -> Option<Puzzle> {
    let attacks = attack_squares(kind, position, dims);

    let mut open_squares: Vec<Square> = dims.squares().filter(|&sq| sq != position).collect();
    open_squares.shuffle(rng);

    // Force one enemy into reach so the puzzle is solvable
    let reachable: Vec<Square> = attacks
        .iter()
        .copied()
        .filter(|sq| open_squares.contains(sq))
        .collect();
    let forced = *reachable.choose(rng)?;

    let count = enemy_count(level, dims, open_squares.len());
    let enemy_pieces: Vec<EnemyPlacement> = std::iter::once(forced)
        .chain(open_squares.iter().copied().filter(|&sq| sq != forced))
        .take(count)
        .map(|sq| EnemyPlacement::plain(sq, attacks.contains(&sq)))
        .collect();

    let valid_squares: Vec<Square> = enemy_pieces
        .iter()
        .filter(|enemy| enemy.capturable)
        .map(|enemy| enemy.square)
        .collect();
    let solution = *valid_squares.choose(rng)?;

    Some(Puzzle {
        piece: Piece::white(kind),
        piece_position: position,
        enemy_pieces,
        all_valid_moves: valid_squares.clone(),
        valid_squares,
        solution,
        board_dimensions: dims,
        puzzle_type: PuzzleType::Capture,
        king_position: None,
        external_position_id: None,
        position: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_repertoire_gates_queen() {
        assert!(!capture_repertoire(1).contains(&PieceKind::Queen));
        assert!(!capture_repertoire(3).contains(&PieceKind::Queen));
        assert!(capture_repertoire(4).contains(&PieceKind::Queen));
        assert_eq!(capture_repertoire(1).len(), 4);
        assert!(!capture_repertoire(10).contains(&PieceKind::King));
    }

    #[test]
    fn test_enemy_count_small_board_clamped() {
        assert_eq!(enemy_count(1, BoardDimensions::SMALL, 8), 2);
        assert_eq!(enemy_count(3, BoardDimensions::SMALL, 8), 2);
        assert_eq!(enemy_count(3, BoardDimensions::SMALL, 1), 1);
    }

    #[test]
    fn test_enemy_count_grows_with_level() {
        assert_eq!(enemy_count(4, BoardDimensions::MEDIUM, 15), 4);
        assert_eq!(enemy_count(6, BoardDimensions::MEDIUM, 15), 5);
        assert_eq!(enemy_count(9, BoardDimensions::WIDE, 31), 6);
        assert_eq!(enemy_count(100, BoardDimensions::WIDE, 31), 31);
    }

    #[test]
    fn test_starting_square_medium_is_central() {
        let mut rng = create_test_rng();
        for _ in 0..50 {
            let sq = starting_square(PieceKind::Rook, BoardDimensions::MEDIUM, &mut rng);
            assert!(MEDIUM_CENTER_SQUARES.contains(&sq));
        }
    }

    #[test]
    fn test_starting_square_wide_near_middle() {
        let mut rng = create_test_rng();
        for _ in 0..100 {
            let sq = starting_square(PieceKind::Knight, BoardDimensions::WIDE, &mut rng);
            assert!((3..=5).contains(&sq.file), "file {}", sq.file);
            assert!((1..=2).contains(&sq.rank), "rank {}", sq.rank);
        }
    }

    #[test]
    fn test_small_board_starts_have_reach() {
        let dims = BoardDimensions::SMALL;
        let mut rng = create_test_rng();
        for kind in capture_repertoire(3) {
            for _ in 0..20 {
                let from = starting_square(kind, dims, &mut rng);
                assert!(
                    !attack_squares(kind, from, dims).is_empty(),
                    "{kind:?} on {from} reaches nothing"
                );
            }
        }
    }

    #[test]
    fn test_build_capture_none_without_reach() {
        let mut rng = create_test_rng();
        let puzzle = build_capture(
            1,
            BoardDimensions::SMALL,
            PieceKind::Knight,
            Square::new(1, 1),
            &mut rng,
        );
        assert!(puzzle.is_none());
    }

    #[test]
    fn test_build_capture_places_forced_target() {
        let mut rng = create_test_rng();
        let puzzle = build_capture(
            1,
            BoardDimensions::SMALL,
            PieceKind::Rook,
            Square::new(0, 0),
            &mut rng,
        )
        .unwrap();

        assert_eq!(puzzle.enemy_pieces.len(), 2);
        assert!(puzzle.enemy_pieces[0].capturable);
        assert!(puzzle.valid_squares.contains(&puzzle.solution));
        assert_eq!(puzzle.valid_squares, puzzle.all_valid_moves);
        assert!(!puzzle
            .enemy_pieces
            .iter()
            .any(|e| e.square == puzzle.piece_position));
    }

    #[test]
    fn test_compose_capture_invariants() {
        let mut rng = create_test_rng();
        for level in 1..=10 {
            for _ in 0..50 {
                let puzzle = compose_capture(level, &mut rng);
                let dims = puzzle.board_dimensions;
                assert_eq!(dims, BoardDimensions::for_level(level));
                assert_eq!(puzzle.puzzle_type, PuzzleType::Capture);
                assert!(puzzle.is_solvable());
                assert!(puzzle.valid_squares.contains(&puzzle.solution));

                let attacks = attack_squares(puzzle.piece.kind, puzzle.piece_position, dims);
                for sq in &puzzle.valid_squares {
                    assert!(attacks.contains(sq));
                }
                for enemy in &puzzle.enemy_pieces {
                    assert_eq!(enemy.capturable, attacks.contains(&enemy.square));
                    assert!(dims.contains_square(enemy.square));
                }
            }
        }
    }

    #[test]
    fn test_compose_capture_enemies_distinct() {
        let mut rng = create_test_rng();
        for _ in 0..100 {
            let puzzle = compose_capture(8, &mut rng);
            let mut squares: Vec<Square> = puzzle.enemy_pieces.iter().map(|e| e.square).collect();
            squares.sort();
            squares.dedup();
            assert_eq!(squares.len(), puzzle.enemy_pieces.len());
            assert!(!squares.contains(&puzzle.piece_position));
        }
    }

    #[test]
    fn test_compose_capture_seeded_reproducible() {
        let a = compose_capture(5, &mut ChaCha8Rng::seed_from_u64(7));
        let b = compose_capture(5, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
