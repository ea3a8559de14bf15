//! Batch runner: composes puzzles with one shared RNG.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::config::GeneratorConfig;
use super::report::BatchReport;
use crate::puzzle::{compose_puzzle, Catalog, ChessEngineRules};

/// Compose `config.count` puzzles and summarise them.
pub fn run_batch(config: &GeneratorConfig, catalog: &Catalog) -> BatchReport {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let rules = ChessEngineRules;

    info!(
        count = config.count,
        level = config.level,
        mode = config.mode.name(),
        catalog_entries = catalog.len(),
        "starting batch"
    );

    let puzzles: Vec<_> = (0..config.count)
        .map(|index| {
            let puzzle_type = config.mode.puzzle_type(index);
            let puzzle = compose_puzzle(config.level, puzzle_type, catalog, &rules, &mut rng);
            debug!(
                index,
                piece = puzzle.piece.kind.name(),
                from = %puzzle.piece_position,
                solution = %puzzle.solution,
                "composed puzzle"
            );
            puzzle
        })
        .collect();

    BatchReport::from_puzzles(config.level, config.mode, puzzles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorMode;
    use crate::puzzle::PuzzleType;

    #[test]
    fn test_run_batch_count_and_mode() {
        let config = GeneratorConfig {
            count: 40,
            level: 2,
            mode: GeneratorMode::Mixed,
            seed: Some(42),
            ..Default::default()
        };
        let report = run_batch(&config, &Catalog::builtin());
        assert_eq!(report.puzzles.len(), 40);
        assert_eq!(report.capture_count, 20);
        assert_eq!(report.checkmate_count, 20);
        assert_eq!(report.puzzles[0].puzzle_type, PuzzleType::Capture);
        assert_eq!(report.puzzles[1].puzzle_type, PuzzleType::Checkmate);
    }

    #[test]
    fn test_run_batch_seeded_reproducible() {
        let config = GeneratorConfig {
            count: 25,
            level: 6,
            seed: Some(99),
            ..Default::default()
        };
        let a = run_batch(&config, &Catalog::builtin());
        let b = run_batch(&config, &Catalog::builtin());
        assert_eq!(a.puzzles, b.puzzles);
    }

    #[test]
    fn test_run_batch_catalog_hits() {
        let mut config = GeneratorConfig::checkmate_sweep(6);
        config.count = 30;
        config.seed = Some(7);
        let report = run_batch(&config, &Catalog::builtin());
        assert_eq!(report.catalog_hits, 30);
        assert_eq!(report.unsolvable, 0);
    }
}
