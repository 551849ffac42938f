//! Turn plumbing around the board.
//!
//! - [`Action`] - tagged move: slide, tile placement, or none
//! - [`Agent`] - capability set shared by players and environments
//! - [`AgentConfig`] - typed `key=value` agent configuration
//! - [`RandomEnvironment`] - spawns a 1-tile (90%) or 2-tile (10%) on a random empty cell
//! - [`Episode`] / [`EpisodeStats`] - alternates player and environment turns
//!
//! # Game Flow
//!
//! 1. Both agents open the episode
//! 2. The environment places two initial tiles
//! 3. Player and environment alternate; the player slides, the environment places
//! 4. The episode ends when an agent has no action (or its action cannot be applied)
//! 5. Both agents close the episode (learning agents train here)
//!
//! ```
//! use fib2048_engine::{Agent, AgentConfig, Action, Board, Direction, Episode, RandomEnvironment};
//!
//! struct AlwaysLeft(AgentConfig);
//!
//! impl Agent for AlwaysLeft {
//!     fn config(&self) -> &AgentConfig {
//!         &self.0
//!     }
//!
//!     fn take_action(&mut self, board: &Board) -> Action {
//!         match board.slid(Direction::Left) {
//!             Ok(_) => Action::Slide(Direction::Left),
//!             Err(_) => Action::None,
//!         }
//!     }
//! }
//!
//! let mut player = AlwaysLeft(AgentConfig::default());
//! let mut env = RandomEnvironment::with_seed(1);
//! let stats = Episode::new().play(&mut player, &mut env, None);
//! assert!(stats.steps() >= 2);
//! ```

pub use self::{action::*, agent::*, agent_config::*, environment::*, episode::*};

mod action;
mod agent;
mod agent_config;
mod environment;
mod episode;
