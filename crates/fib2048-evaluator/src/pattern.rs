//! N-tuple patterns: fixed groups of cells read as one mixed-radix feature.
//!
//! A pattern maps a board to an index into its weight table. The tile index
//! in each listed cell is one digit, most significant first, in base `cap`.
//! Tiles at or above `cap` are clamped to `cap - 1`, so the index always fits
//! a table of `cap.pow(arity)` entries.
//!
//! ```text
//!  PATTERNS[0]       PATTERNS[1]       PATTERNS[2]       PATTERNS[3]
//!  # # . .           . # # .           . . # .           . . . #
//!  # # . .           . # # .           . . # .           . . . #
//!  # # . .           . # # .           . . # .           . . . #
//!  . . . .           . . . .           . . # .           . . . #
//! ```

use fib2048_engine::Board;

/// A fixed tuple of cell positions (row-major, `0..16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    cells: &'static [usize],
}

/// The four patterns of the network, in table order.
pub const PATTERNS: [Pattern; 4] = [
    Pattern::new(&[0, 1, 4, 5, 8, 9]),
    Pattern::new(&[1, 2, 5, 6, 9, 10]),
    Pattern::new(&[2, 6, 10, 14]),
    Pattern::new(&[3, 7, 11, 15]),
];

impl Pattern {
    #[must_use]
    pub const fn new(cells: &'static [usize]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &'static [usize] {
        self.cells
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.cells.len()
    }

    /// Number of weight table entries for radix `cap`, or `None` on overflow.
    ///
    /// ```
    /// use fib2048_evaluator::pattern::PATTERNS;
    ///
    /// assert_eq!(PATTERNS[0].table_len(24), Some(191_102_976));
    /// assert_eq!(PATTERNS[2].table_len(24), Some(331_776));
    /// assert_eq!(PATTERNS[0].table_len(usize::MAX), None);
    /// ```
    #[must_use]
    pub fn table_len(&self, cap: usize) -> Option<usize> {
        cap.checked_pow(u32::try_from(self.arity()).ok()?)
    }

    /// Reads the pattern's cells on `board` as a base-`cap` number.
    ///
    /// `cap` must be at least 1.
    #[must_use]
    pub fn feature_index(&self, board: &Board, cap: usize) -> usize {
        self.cells.iter().fold(0, |index, &pos| {
            let digit = usize::from(board[pos]).min(cap - 1);
            index * cap + digit
        })
    }
}
