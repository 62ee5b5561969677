//! Constants for board dimensions, search parameters, and rendering.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest legal number of rows or columns. A 1-wide board has no distinct
/// start and target edge.
pub const MIN_DIMENSION: usize = 2;

/// Relative offsets `(d_row, d_col)` of the six hex neighbours.
/// Order: right, left, upper left, upper right, lower left, lower right.
pub const HEX_DELTAS: [(isize, isize); 6] = [(0, 1), (0, -1), (-1, 0), (-1, 1), (1, -1), (1, 0)];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default lookahead depth (plies expanded before rollouts take over).
pub const DEFAULT_DEPTH: usize = 2;

/// Default number of rollout trials per leaf.
pub const DEFAULT_TRIALS: usize = 10;

// =============================================================================
// Rendering
// =============================================================================

/// Empty cell.
pub const GLYPH_EMPTY: char = '.';

/// Cell owned by player A (first player, connects left to right).
pub const GLYPH_A: char = 'X';

/// Cell owned by player B (second player, connects top to bottom).
pub const GLYPH_B: char = 'O';
