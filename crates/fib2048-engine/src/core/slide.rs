//! Slide/merge rule.
//!
//! Sliding left is the primitive: each row is compacted toward column 0 while
//! merging neighbouring tiles whose indices differ by exactly one (or two
//! index-1 tiles). A merge of `a` and `b` creates index `max(a, b) + 1` and
//! scores its face value. The other directions reuse the primitive under a
//! reflection or rotation:
//!
//! | direction | before | primitive | after |
//! |-----------|--------|-----------|-------|
//! | left  | -                    | slide left  | - |
//! | right | reflect horizontally | slide left  | reflect horizontally |
//! | up    | rotate clockwise     | slide right | rotate counter-clockwise |
//! | down  | rotate clockwise     | slide left  | rotate counter-clockwise |
//!
//! Up and down deliberately share the clockwise frame. A slide that leaves
//! every cell unchanged is illegal.

use std::str::FromStr;

use crate::{
    IllegalSlideError, ParseDirectionError,
    core::{
        board::Board,
        tile::{MAX_TILE_INDEX, fibonacci},
    },
};

/// Score gained by a single slide: the sum of face values of merged tiles.
pub type Reward = u32;

/// Slide direction, numbered by opcode `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Direction {
    #[display("up")]
    Up,
    #[display("right")]
    Right,
    #[display("down")]
    Down,
    #[display("left")]
    Left,
}

impl Direction {
    /// All directions in opcode order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Maps the low two bits of `opcode` to a direction.
    #[must_use]
    pub fn from_opcode(opcode: u32) -> Self {
        Self::ALL[(opcode & 0b11) as usize]
    }

    #[must_use]
    pub fn opcode(self) -> u32 {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Single-letter notation (`U`, `R`, `D`, `L`).
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Right => 'R',
            Self::Down => 'D',
            Self::Left => 'L',
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u" | "up" | "0" => Ok(Self::Up),
            "r" | "right" | "1" => Ok(Self::Right),
            "d" | "down" | "2" => Ok(Self::Down),
            "l" | "left" | "3" => Ok(Self::Left),
            _ => Err(ParseDirectionError {
                input: s.to_owned(),
            }),
        }
    }
}

impl Board {
    /// Slides all tiles toward `direction`, merging where the rule allows.
    ///
    /// Returns the reward of the slide. If no cell would change the slide is
    /// illegal and the board is left untouched.
    ///
    /// ```
    /// use fib2048_engine::{Board, Direction};
    ///
    /// let mut board = Board::from_rows([[0, 0, 1, 2], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(board.try_slide(Direction::Left), Ok(3));
    /// assert_eq!(board.rows()[0], [3, 0, 0, 0]);
    /// assert!(board.try_slide(Direction::Left).is_err());
    /// ```
    pub fn try_slide(&mut self, direction: Direction) -> Result<Reward, IllegalSlideError> {
        let before = *self;
        let reward = match direction {
            Direction::Left => self.slide_left_unchecked(),
            Direction::Right => self.slide_right_unchecked(),
            Direction::Up => {
                self.rotate_clockwise();
                let reward = self.slide_right_unchecked();
                self.rotate_counterclockwise();
                reward
            }
            Direction::Down => {
                self.rotate_clockwise();
                let reward = self.slide_left_unchecked();
                self.rotate_counterclockwise();
                reward
            }
        };
        if *self == before {
            return Err(IllegalSlideError { direction });
        }
        Ok(reward)
    }

    /// Like [`Self::try_slide`], but leaves `self` untouched and returns the afterstate.
    pub fn slid(&self, direction: Direction) -> Result<(Board, Reward), IllegalSlideError> {
        let mut after = *self;
        let reward = after.try_slide(direction)?;
        Ok((after, reward))
    }

    /// Opcode-based slide returning `-1` for an illegal move.
    ///
    /// Opcodes follow [`Direction::ALL`]; only the low two bits are used.
    pub fn slide(&mut self, opcode: u32) -> i64 {
        match self.try_slide(Direction::from_opcode(opcode)) {
            Ok(reward) => i64::from(reward),
            Err(_) => -1,
        }
    }

    /// Returns `true` if at least one direction is legal.
    #[must_use]
    pub fn can_slide(&self) -> bool {
        Direction::ALL.into_iter().any(|d| self.slid(d).is_ok())
    }

    fn slide_left_unchecked(&mut self) -> Reward {
        self.rows_mut().iter_mut().map(slide_row_left).sum()
    }

    fn slide_right_unchecked(&mut self) -> Reward {
        self.reflect_horizontal();
        let reward = self.slide_left_unchecked();
        self.reflect_horizontal();
        reward
    }
}

fn can_merge(hold: u8, tile: u8) -> bool {
    hold.max(tile) < MAX_TILE_INDEX && (hold.abs_diff(tile) == 1 || (hold == 1 && tile == 1))
}

fn slide_row_left(row: &mut [u8; 4]) -> Reward {
    let tiles = *row;
    *row = [0; 4];
    let mut score = 0;
    let mut top = 0;
    let mut hold = 0;
    for tile in tiles {
        if tile == 0 {
            continue;
        }
        if hold == 0 {
            hold = tile;
            continue;
        }
        if can_merge(hold, tile) {
            let merged = hold.max(tile) + 1;
            row[top] = merged;
            score += fibonacci(merged);
            hold = 0;
        } else {
            row[top] = hold;
            hold = tile;
        }
        top += 1;
    }
    if hold != 0 {
        row[top] = hold;
    }
    score
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn row(tiles: [u8; 4]) -> ([u8; 4], Reward) {
        let mut row = tiles;
        let reward = slide_row_left(&mut row);
        (row, reward)
    }

    fn random_board(rng: &mut Pcg32) -> Board {
        let mut board = Board::EMPTY;
        for pos in 0..Board::SIZE {
            if rng.random_bool(0.7) {
                board.set(pos, rng.random_range(1..=6)).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_slide_row_left() {
        assert_eq!(row([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
        assert_eq!(row([1, 1, 0, 0]), ([2, 0, 0, 0], 2));
        assert_eq!(row([0, 1, 0, 1]), ([2, 0, 0, 0], 2));
        assert_eq!(row([1, 2, 0, 0]), ([3, 0, 0, 0], 3));
        assert_eq!(row([3, 2, 0, 0]), ([4, 0, 0, 0], 5));
        assert_eq!(row([2, 2, 0, 0]), ([2, 2, 0, 0], 0));
        assert_eq!(row([1, 1, 1, 0]), ([2, 1, 0, 0], 2));
        assert_eq!(row([1, 1, 2, 3]), ([2, 4, 0, 0], 2 + 5));
        assert_eq!(row([1, 3, 5, 7]), ([1, 3, 5, 7], 0));
        assert_eq!(row([0, 0, 4, 1]), ([4, 1, 0, 0], 0));
    }

    #[test]
    fn test_merge_stops_at_table_end() {
        assert_eq!(
            row([MAX_TILE_INDEX, MAX_TILE_INDEX - 1, 0, 0]),
            ([MAX_TILE_INDEX, MAX_TILE_INDEX - 1, 0, 0], 0)
        );
        assert_eq!(
            row([MAX_TILE_INDEX - 1, MAX_TILE_INDEX - 2, 0, 0]),
            ([MAX_TILE_INDEX, 0, 0, 0], fibonacci(MAX_TILE_INDEX))
        );
    }

    #[test]
    fn test_adjacent_ones_merge_left() {
        let mut board = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(board.try_slide(Direction::Left), Ok(2));
        assert_eq!(board, Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]));
    }

    #[test]
    fn test_directions() {
        let board = Board::from_rows([[1, 0, 0, 2], [0, 0, 0, 0], [0, 3, 0, 0], [1, 0, 0, 0]]);

        let (left, reward) = board.slid(Direction::Left).unwrap();
        assert_eq!(reward, 3);
        assert_eq!(
            left,
            Board::from_rows([[3, 0, 0, 0], [0, 0, 0, 0], [3, 0, 0, 0], [1, 0, 0, 0]])
        );

        let (right, reward) = board.slid(Direction::Right).unwrap();
        assert_eq!(reward, 3);
        assert_eq!(
            right,
            Board::from_rows([[0, 0, 0, 3], [0, 0, 0, 0], [0, 0, 0, 3], [0, 0, 0, 1]])
        );

        let (up, reward) = board.slid(Direction::Up).unwrap();
        assert_eq!(reward, 2);
        assert_eq!(
            up,
            Board::from_rows([[2, 3, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])
        );

        let (down, reward) = board.slid(Direction::Down).unwrap();
        assert_eq!(reward, 2);
        assert_eq!(
            down,
            Board::from_rows([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 3, 0, 2]])
        );
    }

    #[test]
    fn test_vertical_merge_order_follows_slide_side() {
        // Column 0 holds 2, 1, 1 from top to bottom.
        let board = Board::from_rows([[2, 0, 0, 0], [1, 0, 0, 0], [1, 0, 0, 0], [0; 4]]);
        let (up, reward) = board.slid(Direction::Up).unwrap();
        assert_eq!(reward, 3);
        assert_eq!(
            up,
            Board::from_rows([[3, 0, 0, 0], [1, 0, 0, 0], [0; 4], [0; 4]])
        );
        let (down, reward) = board.slid(Direction::Down).unwrap();
        assert_eq!(reward, 2);
        assert_eq!(
            down,
            Board::from_rows([[0; 4], [0; 4], [2, 0, 0, 0], [2, 0, 0, 0]])
        );
    }

    #[test]
    fn test_shift_without_merge_is_legal_with_zero_reward() {
        let mut board = Board::from_rows([[0, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(board.try_slide(Direction::Left), Ok(0));
        assert_eq!(board[0], 1);
    }

    #[test]
    fn test_illegal_slide_leaves_board_unchanged() {
        let original = Board::from_rows([[1, 3, 5, 7], [0; 4], [0; 4], [0; 4]]);
        let mut board = original;
        assert_eq!(
            board.try_slide(Direction::Left),
            Err(IllegalSlideError {
                direction: Direction::Left
            })
        );
        assert_eq!(board, original);
        assert_eq!(board.slide(Direction::Left.opcode()), -1);
        assert_eq!(board.slide(Direction::Up.opcode()), -1);
        assert_eq!(board, original);
        assert_eq!(board.slide(Direction::Down.opcode()), 0);
    }

    #[test]
    fn test_empty_board_has_no_legal_slide() {
        for direction in Direction::ALL {
            assert!(Board::EMPTY.slid(direction).is_err());
        }
        assert!(!Board::EMPTY.can_slide());
    }

    #[test]
    fn test_blocked_board_cannot_slide() {
        let board = Board::from_rows([[1, 3, 1, 3], [3, 1, 3, 1], [1, 3, 1, 3], [3, 1, 3, 1]]);
        assert!(!board.can_slide());
    }

    #[test]
    fn test_illegal_slide_is_idempotent() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let board = random_board(&mut rng);
            for direction in Direction::ALL {
                if let Ok((after, _)) = board.slid(direction) {
                    // Sliding again in the same direction may still merge, but
                    // once a slide is illegal it stays illegal.
                    let mut settled = after;
                    while settled.try_slide(direction).is_ok() {}
                    assert!(settled.slid(direction).is_err());
                } else {
                    let mut copy = board;
                    assert!(copy.try_slide(direction).is_err());
                    assert_eq!(copy, board);
                    assert!(copy.try_slide(direction).is_err());
                    assert_eq!(copy, board);
                }
            }
        }
    }

    /// Lines of `board` read in the order tiles travel when sliding `direction`.
    fn lines(board: &Board, direction: Direction) -> [[u8; 4]; 4] {
        let rows = board.rows();
        std::array::from_fn(|i| {
            std::array::from_fn(|j| match direction {
                Direction::Left => rows[i][j],
                Direction::Right => rows[i][3 - j],
                Direction::Up => rows[j][i],
                Direction::Down => rows[3 - j][i],
            })
        })
    }

    /// Pairs neighbouring tiles of a line greedily from the front.
    ///
    /// Returns the compacted line and the indices created by merges.
    fn pair_up(line: [u8; 4]) -> ([u8; 4], Vec<u8>) {
        let tiles: Vec<u8> = line.into_iter().filter(|&t| t != 0).collect();
        let mut out = [0; 4];
        let mut created = Vec::new();
        let mut i = 0;
        for slot in &mut out {
            let Some(&a) = tiles.get(i) else { break };
            match tiles.get(i + 1) {
                Some(&b) if a.abs_diff(b) == 1 || (a == 1 && b == 1) => {
                    *slot = a.max(b) + 1;
                    created.push(*slot);
                    i += 2;
                }
                _ => {
                    *slot = a;
                    i += 1;
                }
            }
        }
        (out, created)
    }

    #[test]
    fn test_merges_conserve_face_sum() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let board = random_board(&mut rng);
            let tiles_before = Board::SIZE - board.num_empty();
            for direction in Direction::ALL {
                let Ok((after, reward)) = board.slid(direction) else {
                    continue;
                };
                let (expected, created): (Vec<_>, Vec<_>) =
                    lines(&board, direction).into_iter().map(pair_up).unzip();
                let created: Vec<u8> = created.into_iter().flatten().collect();

                assert_eq!(lines(&after, direction).to_vec(), expected);
                let tiles_after = Board::SIZE - after.num_empty();
                assert_eq!(tiles_before - tiles_after, created.len());
                assert_eq!(
                    reward,
                    created.iter().map(|&t| fibonacci(t)).sum::<Reward>()
                );
                // Each merge consumes two tiles whose faces add up to the new tile.
                assert_eq!(after.face_sum(), board.face_sum());
            }
        }
    }

    #[test]
    fn test_direction_opcodes() {
        for (opcode, direction) in (0..4).zip(Direction::ALL) {
            assert_eq!(Direction::from_opcode(opcode), direction);
            assert_eq!(direction.opcode(), opcode);
        }
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("L".parse::<Direction>(), Ok(Direction::Left));
        assert!("north".parse::<Direction>().is_err());
    }
}
