use std::{fmt, str::FromStr};

use crate::{
    ApplyActionError, ParseActionError,
    core::{Board, Direction, Reward},
};

/// A move made by either side of the game.
///
/// Players emit [`Action::Slide`], the environment emits [`Action::Place`], and
/// either emits [`Action::None`] when it has nothing legal to do.
///
/// The text form is `#U`/`#R`/`#D`/`#L` for slides, a hex position followed by
/// the tile index for placements (`51` places index 1 at position 5) and `N`
/// for no action.
///
/// ```
/// use fib2048_engine::{Action, Direction};
///
/// assert_eq!(Action::Slide(Direction::Up).to_string(), "#U");
/// assert_eq!("a2".parse(), Ok(Action::Place { pos: 10, tile: 2 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Action {
    #[default]
    None,
    Slide(Direction),
    Place {
        pos: usize,
        tile: u8,
    },
}

impl Action {
    /// Applies the action to `board` and returns the reward it earns.
    ///
    /// Placements always earn 0. On error the board is unchanged.
    pub fn apply(self, board: &mut Board) -> Result<Reward, ApplyActionError> {
        match self {
            Self::Slide(direction) => Ok(board.try_slide(direction)?),
            Self::Place { pos, tile } => {
                board.place(pos, tile)?;
                Ok(0)
            }
            Self::None => Err(ApplyActionError::NoAction),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "N"),
            Self::Slide(direction) => write!(f, "#{}", direction.symbol()),
            Self::Place { pos, tile } => write!(f, "{pos:x}{tile}"),
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseActionError {
            input: s.to_owned(),
        };
        let s = s.trim();
        if s == "N" {
            return Ok(Self::None);
        }
        if let Some(rest) = s.strip_prefix('#') {
            let direction = match rest {
                "U" => Direction::Up,
                "R" => Direction::Right,
                "D" => Direction::Down,
                "L" => Direction::Left,
                _ => return Err(err()),
            };
            return Ok(Self::Slide(direction));
        }

        let mut chars = s.chars();
        let (Some(p), Some(t), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let pos = p.to_digit(16).ok_or_else(err)? as usize;
        let tile = t.to_digit(10).ok_or_else(err)?;
        let tile = u8::try_from(tile).map_err(|_| err())?;
        Ok(Self::Place { pos, tile })
    }
}
