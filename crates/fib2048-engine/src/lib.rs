//! Board state machine and turn plumbing for a Fibonacci-merge variant of 2048.
//!
//! - [`core`] holds the 4×4 [`Board`], the face-value table and the slide/merge rule.
//! - [`engine`] holds [`Action`]s, the [`Agent`] trait with its [`AgentConfig`],
//!   the tile-spawning [`RandomEnvironment`] and the [`Episode`] driver.
//!
//! ```
//! use fib2048_engine::{Board, Direction};
//!
//! let mut board: Board = "1 1 0 0  0 0 0 0  0 0 0 0  0 0 0 0".parse().unwrap();
//! let reward = board.try_slide(Direction::Left).unwrap();
//! assert_eq!(reward, 2);
//! assert_eq!(board[0], 2);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("position {pos} is outside the 4x4 grid")]
pub struct PositionOutOfRangeError {
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tile index {index} cannot be placed (only 1 or 2 may spawn)")]
pub struct InvalidTileError {
    pub index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("sliding {direction} does not change the board")]
pub struct IllegalSlideError {
    pub direction: Direction,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum PlaceError {
    #[display("{_0}")]
    PositionOutOfRange(PositionOutOfRangeError),
    #[display("{_0}")]
    InvalidTile(InvalidTileError),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum ApplyActionError {
    #[display("{_0}")]
    IllegalSlide(IllegalSlideError),
    #[display("{_0}")]
    Place(PlaceError),
    #[display("no action to apply")]
    #[from(ignore)]
    NoAction,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected 16 cells, found only {found}")]
    MissingCells { found: usize },
    #[display("cell {pos}: `{text}` is not a valid number")]
    InvalidNumber { pos: usize, text: String },
    #[display("cell {pos}: {value} is not a tile face value")]
    NotAFaceValue { pos: usize, value: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid action notation `{input}`")]
pub struct ParseActionError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction `{input}`")]
pub struct ParseDirectionError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid value `{value}` for agent option `{key}`")]
pub struct ParseConfigError {
    pub key: String,
    pub value: String,
}
