pub use self::{board::*, slide::*, tile::*};

pub(crate) mod board;
pub(crate) mod slide;
pub(crate) mod tile;
