//! Afterstate evaluation and greedy slide selection for Fibonacci 2048.
//!
//! The crate has two levels, mirroring how a player decides a move:
//!
//! 1. **Afterstate Evaluation** ([`afterstate_evaluator`]) - scores the board a
//!    slide produces, together with the reward the slide earned.
//! 2. **Slide Selection** ([`slide_evaluator`]) - tries every legal direction on
//!    a copy of the board and keeps the best-scoring one.
//!
//! ```text
//! Slide Selection (pick a direction)
//!     ↓ uses
//! Afterstate Evaluation (score one afterstate)
//!     ↓ implemented by
//! N-tuple network | heuristic modes
//! ```
//!
//! # N-tuple Network
//!
//! The learned evaluator is a linear [`n_tuple::NTupleNetwork`]: four
//! [`pattern`]s each index their own [`weight_table`], and every pattern is
//! read under the four board rotations of [`symmetry`]. An afterstate's value
//! is the sum of those 16 lookups. Weight tables persist in a little-endian
//! binary format (see [`weight_table`]).
//!
//! # Heuristic Players
//!
//! [`heuristic_player::HeuristicPlayer`] is a non-learning player driven by a
//! fixed rule (reward, free space, monotonic runs or corner tiles). It is the
//! baseline the learning player is compared with.
//!
//! ```
//! use fib2048_engine::{Board, Direction};
//! use fib2048_evaluator::{n_tuple::NTupleNetwork, slide_evaluator};
//!
//! let network = NTupleNetwork::zeroed(4).unwrap();
//! let board = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
//! let choice = slide_evaluator::select_best_slide(&network, &board, Direction::ALL).unwrap();
//! assert_eq!(choice.reward(), 2);
//! ```

use std::{io, path::PathBuf};

pub mod afterstate_evaluator;
pub mod heuristic_player;
pub mod n_tuple;
pub mod pattern;
pub mod slide_evaluator;
pub mod symmetry;
pub mod weight_table;

/// A feature radix the network cannot use.
///
/// The radix must be at least 2 and small enough for every table to fit in
/// memory addressable on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("feature radix {cap} is out of range")]
pub struct InvalidCapError {
    pub cap: usize,
}

/// Failure reading or writing weight tables.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum WeightsIoError {
    #[display("cannot access weight file {}", path.display())]
    #[from(ignore)]
    File { path: PathBuf, source: io::Error },
    #[display("weight data is unreadable or truncated")]
    Io(io::Error),
    #[display("expected {expected} weight tables, found {found}")]
    #[from(ignore)]
    TableCount { expected: usize, found: usize },
    #[display("weight table {table} has {found} entries, expected {expected}")]
    #[from(ignore)]
    TableSize {
        table: usize,
        expected: usize,
        found: usize,
    },
    #[display("{_0}")]
    Cap(InvalidCapError),
}

impl WeightsIoError {
    pub(crate) fn file(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::File { path, source }
    }
}
