//! Rotational symmetries used to share weights across board orientations.

use fib2048_engine::Board;

/// One of the four rotations of the board.
///
/// Reflections are not part of the set: each pattern is looked up under the
/// four rotations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    Reverse,
    Clockwise,
    CounterClockwise,
}

impl Symmetry {
    /// All symmetries, in the order estimation and updates visit them.
    pub const ALL: [Self; 4] = [
        Self::Identity,
        Self::Reverse,
        Self::CounterClockwise,
        Self::Clockwise,
    ];

    pub fn apply(self, board: &mut Board) {
        match self {
            Self::Identity => {}
            Self::Reverse => board.reverse(),
            Self::Clockwise => board.rotate_clockwise(),
            Self::CounterClockwise => board.rotate_counterclockwise(),
        }
    }

    /// Exactly cancels [`Symmetry::apply`].
    pub fn undo(self, board: &mut Board) {
        self.inverse().apply(board);
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Reverse => Self::Reverse,
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// Returns a transformed copy of `board`.
    #[must_use]
    pub fn transformed(self, board: &Board) -> Board {
        let mut board = *board;
        self.apply(&mut board);
        board
    }
}
