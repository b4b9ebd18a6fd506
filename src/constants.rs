//! Constants for board geometry, stone supply, and search parameters.
//!
//! The board is a fixed 4x4 grid. Coordinates are `(row, col)` with row 0 on
//! the north edge and column 0 on the west edge.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const BOARD_SIZE: usize = 4;

/// Maximum number of pieces that can be picked up in a single move.
pub const MAX_CARRY: usize = 4;

/// Maximum number of squares a move may travel.
pub const MAX_STEPS: usize = BOARD_SIZE - 1;

/// Axis-aligned step directions as `(drow, dcol)`.
/// Order: South, North, East, West
pub const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// =============================================================================
// Stone Supply
// =============================================================================

/// Stones each player starts with.
pub const DEFAULT_STONES: u32 = 15;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Exploration weight for the UCT formula.
pub const DEFAULT_UCT_WEIGHT: f64 = 2.0;

/// Default number of search iterations per move.
pub const DEFAULT_ITERATIONS: usize = 150;

/// Rollouts per expansion for the multi-simulation variant.
pub const DEFAULT_LEAF_SIMULATIONS: usize = 3;
