//! Chess Drills - procedurally generated chess puzzles
//!
//! Small-board "find the capture" and "find the checkmate" puzzles, plus
//! full-board mate-in-one positions drawn from a catalog.

pub mod build_info;
pub mod constants;
pub mod generator;
pub mod puzzle;

pub use puzzle::{
    compose_capture, compose_checkmate, compose_checkmate_from_catalog, compose_checkmate_simple,
    compose_puzzle, Catalog, ChessEngineRules, Puzzle, PuzzleType,
};
