//! Constants for board geometry, search scores, and pacing.
//!
//! The board is a flat array of 9 cells in row-major order:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length.
pub const N: usize = 3;

/// Total number of cells.
pub const CELLS: usize = N * N;

/// The 8 winning triples, in the order they are checked.
///
/// Rows first, then columns, then the two diagonals. The first matching
/// triple is reported as the winning line, so this order must not change.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Search Scores
// =============================================================================

/// Score of a position won by the automated (maximizing) player.
pub const WIN_SCORE: i32 = 10;

/// Score of a position won by the human (minimizing) player.
pub const LOSS_SCORE: i32 = -10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

// =============================================================================
// Pacing
// =============================================================================

/// Default delay before the automated player replies, in milliseconds.
pub const AI_DELAY_MS: u64 = 220;
