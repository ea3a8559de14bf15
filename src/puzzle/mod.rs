//! Puzzle composition: attack geometry, capture and checkmate composers,
//! and the full-board catalog.

pub mod capture;
pub mod catalog;
pub mod checkmate;
pub mod compose;
pub mod full_board;
pub mod geometry;
pub mod rules;
pub mod types;

pub use capture::compose_capture;
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use checkmate::compose_checkmate_simple;
pub use compose::{compose_checkmate, compose_puzzle};
pub use full_board::{compose_checkmate_from_catalog, CatalogMismatch};
pub use geometry::attack_squares;
pub use rules::{ChessEngineRules, PositionError, RulesEngine};
pub use types::*;
