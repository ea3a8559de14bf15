//! Batch generation configuration.

use std::path::PathBuf;

use crate::puzzle::PuzzleType;

/// Which composer a batch uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMode {
    Capture,
    Checkmate,
    /// Alternate capture and checkmate, starting with capture.
    Mixed,
}

impl GeneratorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "capture" => Some(Self::Capture),
            "checkmate" | "mate" => Some(Self::Checkmate),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }

    /// Puzzle type for the `index`-th puzzle of a batch.
    pub fn puzzle_type(&self, index: u32) -> PuzzleType {
        match self {
            Self::Capture => PuzzleType::Capture,
            Self::Checkmate => PuzzleType::Checkmate,
            Self::Mixed if index % 2 == 0 => PuzzleType::Capture,
            Self::Mixed => PuzzleType::Checkmate,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Checkmate => "checkmate",
            Self::Mixed => "mixed",
        }
    }
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of puzzles to compose
    pub count: u32,

    /// Difficulty level every puzzle is composed at
    pub level: u32,

    pub mode: GeneratorMode,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// External catalog file (None = built-in positions)
    pub catalog_path: Option<PathBuf>,

    /// Log verbosity (0 = warnings, 1 = info, 2 = debug)
    pub verbosity: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 10,
            level: 1,
            mode: GeneratorMode::Capture,
            seed: None,
            catalog_path: None,
            verbosity: 0,
        }
    }
}

impl GeneratorConfig {
    /// Many capture puzzles at one level, for checking solvability and spread.
    pub fn capture_sweep(level: u32) -> Self {
        Self {
            count: 1000,
            level,
            mode: GeneratorMode::Capture,
            ..Default::default()
        }
    }

    /// Checkmate puzzles at one level; catalog-backed from level 5.
    pub fn checkmate_sweep(level: u32) -> Self {
        Self {
            count: 200,
            level,
            mode: GeneratorMode::Checkmate,
            ..Default::default()
        }
    }
}
