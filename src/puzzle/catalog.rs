//! Catalog of pre-verified mate-in-one positions for full-board puzzles.
//!
//! Each entry is a FEN position plus the mating move as `from-to`
//! (`"a1-a8"`). The built-in set is small; larger catalogs are loaded from a
//! JSON array of `{ "id", "position", "move" }` records.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{ParseSquareError, Square};
use crate::constants::CATALOG_WINDOW;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("entry {id}: move {mating_move:?} is not of the form from-to")]
    MoveFormat { id: String, mating_move: String },
    #[error("entry {id}: {source}")]
    Square {
        id: String,
        #[source]
        source: ParseSquareError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    /// FEN of the position before the mating move.
    pub position: String,
    #[serde(rename = "move")]
    pub mating_move: String,
}

impl CatalogEntry {
    pub fn new(id: &str, position: &str, mating_move: &str) -> Self {
        Self {
            id: id.to_string(),
            position: position.to_string(),
            mating_move: mating_move.to_string(),
        }
    }

    /// Split the mating move into origin and destination. Accepts `a1-a8`
    /// and the compact `a1a8`.
    pub fn parse_move(&self) -> Result<(Square, Square), CatalogError> {
        let text = self.mating_move.trim();
        let (from, to) = match text.split_once('-') {
            Some(parts) => parts,
            None if text.len() == 4 && text.is_ascii() => text.split_at(2),
            None => {
                return Err(CatalogError::MoveFormat {
                    id: self.id.clone(),
                    mating_move: self.mating_move.clone(),
                })
            }
        };
        let square = |label: &str| {
            label.parse::<Square>().map_err(|source| CatalogError::Square {
                id: self.id.clone(),
                source,
            })
        };
        Ok((square(from)?, square(to)?))
    }
}

/// Built-in positions: (id, FEN, mating move)
static BUILTIN_ENTRIES: &[(&str, &str, &str)] = &[
    // Back rank: the f7-g7-h7 pawns box the king in, Ra8#
    (
        "builtin-back-rank-rook",
        "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
        "a1-a8",
    ),
    // King on b6 covers a7/b7, queen seals the eighth rank: Qg8#
    (
        "builtin-queen-corner",
        "k7/8/1K6/8/8/8/8/6Q1 w - - 0 1",
        "g1-g8",
    ),
    // Opposition: Ke6 takes d7/e7/f7, Rh8#
    (
        "builtin-rook-opposition",
        "4k3/8/4K3/8/8/8/8/7R w - - 0 1",
        "h1-h8",
    ),
    // Black to move, mirrored back rank: Ra1#
    (
        "builtin-black-back-rank",
        "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1",
        "a8-a1",
    ),
    // Rook and pawns smother the king: Nf7#
    (
        "builtin-knight-smother",
        "6rk/6pp/8/6N1/8/8/8/6K1 w - - 0 1",
        "g5-f7",
    ),
    // Queen down the b-file to the back rank: Qb8#
    (
        "builtin-queen-back-rank",
        "7k/6pp/8/8/8/8/8/1Q4K1 w - - 0 1",
        "b1-b8",
    ),
    // Long diagonal, own bishop and pawn take g8/h7: Be5#
    (
        "builtin-bishop-diagonal",
        "6bk/7p/8/8/5B2/8/8/6K1 w - - 0 1",
        "f4-e5",
    ),
    // Rb7 holds the seventh rank: Ra8#
    (
        "builtin-rook-ladder",
        "7k/1R6/8/8/8/8/8/R5K1 w - - 0 1",
        "a1-a8",
    ),
];

/// Ordered, read-only list of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ENTRIES
                .iter()
                .map(|&(id, position, mating_move)| CatalogEntry::new(id, position, mating_move))
                .collect(),
        )
    }

    /// Load a catalog from a JSON array. Every move string is checked up
    /// front so a bad entry fails the load instead of a later draw.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        for entry in &entries {
            entry.parse_move()?;
        }
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick an entry uniformly from the first `CATALOG_WINDOW` entries.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<&CatalogEntry> {
        let window = self.entries.len().min(CATALOG_WINDOW);
        if window == 0 {
            return None;
        }
        self.entries.get(rng.gen_range(0..window))
    }
}
