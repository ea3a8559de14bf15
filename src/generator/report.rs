//! Batch report generation.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::config::GeneratorMode;
use crate::puzzle::{Puzzle, PuzzleType, Square};

/// Summary of a batch of composed puzzles.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub level: u32,
    pub mode: &'static str,

    pub capture_count: u32,
    pub checkmate_count: u32,

    /// Puzzles with an empty `valid_squares` (reduced-board checkmate fallback)
    pub unsolvable: u32,
    /// Checkmate puzzles built from a catalog entry
    pub catalog_hits: u32,

    pub piece_distribution: BTreeMap<&'static str, u32>,
    pub distinct_solutions: BTreeSet<Square>,
    pub avg_enemies: f64,
    pub avg_valid_squares: f64,

    pub puzzles: Vec<Puzzle>,
}

impl BatchReport {
    pub fn from_puzzles(level: u32, mode: GeneratorMode, puzzles: Vec<Puzzle>) -> Self {
        let total = puzzles.len().max(1) as f64;

        let count_type =
            |t: PuzzleType| puzzles.iter().filter(|p| p.puzzle_type == t).count() as u32;
        let capture_count = count_type(PuzzleType::Capture);
        let checkmate_count = count_type(PuzzleType::Checkmate);

        let unsolvable = puzzles.iter().filter(|p| !p.is_solvable()).count() as u32;
        let catalog_hits = puzzles
            .iter()
            .filter(|p| p.external_position_id.is_some())
            .count() as u32;

        let mut piece_distribution = BTreeMap::new();
        for puzzle in &puzzles {
            *piece_distribution.entry(puzzle.piece.kind.name()).or_insert(0) += 1;
        }

        let distinct_solutions = puzzles.iter().map(|p| p.solution).collect();

        let avg_enemies = puzzles
            .iter()
            .map(|p| p.enemy_pieces.len() as f64)
            .sum::<f64>()
            / total;
        let avg_valid_squares = puzzles
            .iter()
            .map(|p| p.valid_squares.len() as f64)
            .sum::<f64>()
            / total;

        Self {
            level,
            mode: mode.name(),
            capture_count,
            checkmate_count,
            unsolvable,
            catalog_hits,
            piece_distribution,
            distinct_solutions,
            avg_enemies,
            avg_valid_squares,
            puzzles,
        }
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                      PUZZLE BATCH REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Level {} ({}): {} puzzles, {} capture, {} checkmate\n\n",
            self.level,
            self.mode,
            self.puzzles.len(),
            self.capture_count,
            self.checkmate_count
        ));

        report.push_str("── PIECES ───────────────────────────────────────────────────────\n");
        for (piece, count) in &self.piece_distribution {
            report.push_str(&format!("  {:<10} {}\n", piece, count));
        }

        report.push_str("\n── SOLUTIONS ────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Distinct squares:    {}\n",
            self.distinct_solutions.len()
        ));
        report.push_str(&format!("  Avg enemies:         {:.2}\n", self.avg_enemies));
        report.push_str(&format!(
            "  Avg valid squares:   {:.2}\n",
            self.avg_valid_squares
        ));
        report.push_str(&format!("  Unsolvable:          {}\n", self.unsolvable));
        if self.checkmate_count > 0 {
            report.push_str(&format!(
                "  Catalog positions:   {}/{}\n",
                self.catalog_hits, self.checkmate_count
            ));
        }

        report
    }

    /// Full report, puzzles included, as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::compose_capture;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample(count: usize, level: u32) -> Vec<Puzzle> {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        (0..count).map(|_| compose_capture(level, &mut rng)).collect()
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport::from_puzzles(3, GeneratorMode::Capture, sample(100, 3));
        assert_eq!(report.capture_count, 100);
        assert_eq!(report.checkmate_count, 0);
        assert_eq!(report.unsolvable, 0);
        assert_eq!(report.catalog_hits, 0);
        assert_eq!(report.piece_distribution.values().sum::<u32>(), 100);
        assert!(report.distinct_solutions.len() > 1);
        assert!((report.avg_enemies - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_empty_batch() {
        let report = BatchReport::from_puzzles(1, GeneratorMode::Mixed, Vec::new());
        assert_eq!(report.avg_enemies, 0.0);
        assert!(report.distinct_solutions.is_empty());
    }

    #[test]
    fn test_report_text_and_json() {
        let report = BatchReport::from_puzzles(5, GeneratorMode::Capture, sample(10, 5));
        let text = report.to_text();
        assert!(text.contains("PUZZLE BATCH REPORT"));
        assert!(text.contains("Level 5 (capture)"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["level"], 5);
        assert_eq!(json["puzzles"].as_array().unwrap().len(), 10);
    }
}
