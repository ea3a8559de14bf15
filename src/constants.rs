// Board tiers (level -> dimensions)
pub const SMALL_BOARD_MAX_LEVEL: u32 = 3; // 3x3
pub const MEDIUM_BOARD_MAX_LEVEL: u32 = 6; // 4x4, anything above is 4x8

// Piece repertoire
pub const QUEEN_UNLOCK_LEVEL: u32 = 3; // queen joins once level is above this
pub const CHECKMATE_MINOR_PIECE_LEVEL: u32 = 3; // bishop and knight deliver mate from here

// Capture puzzles
pub const BASE_ENEMY_COUNT: usize = 2;
pub const SMALL_BOARD_ENEMY_CAP: usize = 2;

// Reduced-board checkmate puzzles
pub const BLOCKER_START_LEVEL: u32 = 3; // blockers appear once level is above this
pub const MAX_BLOCKERS: usize = 2;

// Catalog (full-board) checkmate puzzles
pub const CATALOG_MIN_LEVEL: u32 = 5;
pub const CATALOG_WINDOW: usize = 1000;
pub const CATALOG_FALLBACK_LEVEL: u32 = 4;
