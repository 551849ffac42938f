use std::{fmt, ops::Index, str::FromStr};

use crate::{
    InvalidTileError, ParseBoardError, PlaceError, PositionOutOfRangeError,
    core::tile::{MAX_TILE_INDEX, fibonacci, index_of},
};

/// 4×4 grid of tile indices.
///
/// Cells are addressed either by row and column or by a 1-d position in
/// row-major order:
///
/// ```text
///  ( 0) ( 1) ( 2) ( 3)
///  ( 4) ( 5) ( 6) ( 7)
///  ( 8) ( 9) (10) (11)
///  (12) (13) (14) (15)
/// ```
///
/// Each cell holds an index into the face-value table (see [`fibonacci`]);
/// index 0 is an empty cell. Boards are small `Copy` values, so exploring a
/// candidate move is done on a copy.
///
/// The derived ordering is lexicographic over the 16 cells in position order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Board {
    tiles: [[u8; 4]; 4],
}

impl Board {
    /// Number of cells.
    pub const SIZE: usize = 16;

    pub const EMPTY: Self = Self { tiles: [[0; 4]; 4] };

    /// Creates a board from rows of tile indices.
    ///
    /// # Panics
    ///
    /// Panics if any index is greater than [`MAX_TILE_INDEX`].
    #[must_use]
    pub fn from_rows(tiles: [[u8; 4]; 4]) -> Self {
        assert!(
            tiles.iter().flatten().all(|&t| t <= MAX_TILE_INDEX),
            "tile index out of range"
        );
        Self { tiles }
    }

    #[must_use]
    pub fn rows(&self) -> &[[u8; 4]; 4] {
        &self.tiles
    }

    /// Iterates over all cells in position order.
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.tiles.iter().flatten().copied()
    }

    #[must_use]
    pub fn get(&self, pos: usize) -> Option<u8> {
        (pos < Self::SIZE).then(|| self.tiles[pos / 4][pos % 4])
    }

    /// Writes a tile index into a cell.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than [`MAX_TILE_INDEX`].
    pub fn set(&mut self, pos: usize, index: u8) -> Result<(), PositionOutOfRangeError> {
        assert!(index <= MAX_TILE_INDEX, "tile index out of range");
        if pos >= Self::SIZE {
            return Err(PositionOutOfRangeError { pos });
        }
        self.tiles[pos / 4][pos % 4] = index;
        Ok(())
    }

    /// Places a freshly spawned tile (index 1 or 2) at `pos`.
    pub fn place(&mut self, pos: usize, index: u8) -> Result<(), PlaceError> {
        if index != 1 && index != 2 {
            return Err(InvalidTileError { index }.into());
        }
        self.set(pos, index)?;
        Ok(())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [[u8; 4]; 4] {
        &mut self.tiles
    }

    /// Swaps cells across the main diagonal.
    pub fn transpose(&mut self) {
        for r in 0..4 {
            for c in r + 1..4 {
                let tmp = self.tiles[r][c];
                self.tiles[r][c] = self.tiles[c][r];
                self.tiles[c][r] = tmp;
            }
        }
    }

    /// Mirrors each row left to right.
    pub fn reflect_horizontal(&mut self) {
        for row in &mut self.tiles {
            row.reverse();
        }
    }

    /// Mirrors each column top to bottom.
    pub fn reflect_vertical(&mut self) {
        self.tiles.reverse();
    }

    pub fn rotate_clockwise(&mut self) {
        self.transpose();
        self.reflect_horizontal();
    }

    pub fn rotate_counterclockwise(&mut self) {
        self.transpose();
        self.reflect_vertical();
    }

    /// Rotates by 180 degrees.
    pub fn reverse(&mut self) {
        self.reflect_horizontal();
        self.reflect_vertical();
    }

    /// Rotates clockwise by `times` quarter turns; negative values turn counter-clockwise.
    pub fn rotate(&mut self, times: i32) {
        match times.rem_euclid(4) {
            1 => self.rotate_clockwise(),
            2 => self.reverse(),
            3 => self.rotate_counterclockwise(),
            _ => {}
        }
    }

    #[must_use]
    pub fn num_empty(&self) -> usize {
        self.cells().filter(|&t| t == 0).count()
    }

    pub fn empty_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells()
            .enumerate()
            .filter_map(|(pos, t)| (t == 0).then_some(pos))
    }

    #[must_use]
    pub fn max_index(&self) -> u8 {
        self.cells().max().unwrap_or(0)
    }

    /// Sum of the face values of all tiles.
    #[must_use]
    pub fn face_sum(&self) -> u64 {
        self.cells().map(|t| u64::from(fibonacci(t))).sum()
    }

    /// Length of the longest run of neighbouring cells whose indices step by
    /// exactly one in the same direction, scanned along rows and columns.
    ///
    /// Column runs start counting from zero, so a column contributes one less
    /// than an identical row would until its first break.
    #[must_use]
    pub fn monotonic(&self) -> usize {
        let mut max_length = 0;
        for row in &self.tiles {
            for step in [1, -1] {
                let mut length = 1;
                for c in 0..3 {
                    if i32::from(row[c]) - i32::from(row[c + 1]) == step {
                        length += 1;
                        max_length = max_length.max(length);
                    } else {
                        length = 1;
                    }
                }
            }
        }
        for c in 0..4 {
            for step in [1, -1] {
                let mut length = 0;
                for r in 0..3 {
                    if i32::from(self.tiles[r][c]) - i32::from(self.tiles[r + 1][c]) == step {
                        length += 1;
                        max_length = max_length.max(length);
                    } else {
                        length = 1;
                    }
                }
            }
        }
        max_length
    }

    /// Sum of the indices in the four corners.
    #[must_use]
    pub fn corner_sum(&self) -> u32 {
        [(0, 0), (0, 3), (3, 0), (3, 3)]
            .into_iter()
            .map(|(r, c)| u32::from(self.tiles[r][c]))
            .sum()
    }
}

impl Index<usize> for Board {
    type Output = u8;

    fn index(&self, pos: usize) -> &u8 {
        &self.tiles[pos / 4][pos % 4]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+------------------------+")?;
        for row in &self.tiles {
            write!(f, "|")?;
            for &t in row {
                write!(f, "{:>6}", fibonacci(t))?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+------------------------+")
    }
}

/// Parses 16 face values separated by anything that is not a digit.
///
/// This accepts the output of [`Board`]'s `Display` implementation as well as
/// plain whitespace-separated lists.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::EMPTY;
        let mut numbers = s
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty());
        for pos in 0..Self::SIZE {
            let text = numbers
                .next()
                .ok_or(ParseBoardError::MissingCells { found: pos })?;
            let value = text
                .parse::<u32>()
                .map_err(|_| ParseBoardError::InvalidNumber {
                    pos,
                    text: text.to_owned(),
                })?;
            let index = index_of(value).ok_or(ParseBoardError::NotAFaceValue { pos, value })?;
            board.tiles[pos / 4][pos % 4] = index;
        }
        Ok(board)
    }
}
