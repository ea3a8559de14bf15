//! Batch puzzle generation for balance checks and catalog smoke runs.
//!
//! Composes many puzzles in one go and summarises what came out:
//! - which pieces the player was handed
//! - how spread out the solutions are
//! - whether anything unsolvable slipped through
//! - how often catalog positions were used versus the reduced-board fallback

mod config;
mod report;
mod runner;

pub use config::{GeneratorConfig, GeneratorMode};
pub use report::BatchReport;
pub use runner::run_batch;
