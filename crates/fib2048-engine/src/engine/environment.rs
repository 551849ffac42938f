use rand::{Rng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::{
    ParseConfigError,
    core::Board,
    engine::{Action, Agent, AgentConfig},
};

/// Environment that spawns a tile on a random empty cell.
///
/// Each turn it shuffles the 16 positions and places a tile on the first
/// empty one: index 1 with probability 0.9, index 2 otherwise. A full board
/// yields [`Action::None`].
///
/// Both draws come from one `Pcg32` seeded by the `seed` option, so a fixed
/// seed replays the same placements.
#[derive(Debug, Clone)]
pub struct RandomEnvironment {
    config: AgentConfig,
    rng: Pcg32,
    space: [usize; Board::SIZE],
}

impl RandomEnvironment {
    pub const DEFAULTS: &'static str = "name=random role=environment";

    pub fn new(args: &str) -> Result<Self, ParseConfigError> {
        Ok(Self::from_config(AgentConfig::parse(Self::DEFAULTS, args)?))
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(AgentConfig::new("random", "environment").with_seed(seed))
    }

    fn from_config(config: AgentConfig) -> Self {
        let rng = config.rng();
        Self {
            config,
            rng,
            space: std::array::from_fn(|i| i),
        }
    }
}

impl Agent for RandomEnvironment {
    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn take_action(&mut self, board: &Board) -> Action {
        self.space.shuffle(&mut self.rng);
        for &pos in &self.space {
            if board[pos] != 0 {
                continue;
            }
            let tile = if self.rng.random_range(0..10) != 0 { 1 } else { 2 };
            return Action::Place { pos, tile };
        }
        Action::None
    }
}
