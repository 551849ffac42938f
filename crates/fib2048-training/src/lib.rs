//! Online TD(0) training of the n-tuple network.
//!
//! # How Training Works
//!
//! 1. **Play** - [`td_player::TdPlayer`] picks each slide greedily by
//!    `reward + V(afterstate)` and records the reward and afterstate
//! 2. **Back up** - at the end of the episode [`td_learner::TdLearner`] walks
//!    the recorded trajectory from last to first, pulling each afterstate's
//!    value toward `reward + V(next afterstate)` (the final one toward 0)
//! 3. **Repeat** - the next episode starts with an empty trajectory
//!
//! A learning rate (`alpha`) of 0 turns the player into a pure evaluator that
//! never modifies its weights.
//!
//! # Weight Lifecycle
//!
//! ```text
//! init ──► zeroed tables ─┐
//!                         ├─► play/learn ──► save (on finish)
//! load ──► file tables  ──┘
//! ```
//!
//! # Example
//!
//! ```
//! use fib2048_engine::{Episode, RandomEnvironment};
//! use fib2048_training::td_player::TdPlayer;
//!
//! let mut player = TdPlayer::new("init alpha=0.1 cap=4")?;
//! let mut env = RandomEnvironment::with_seed(1);
//! for _ in 0..3 {
//!     let stats = Episode::new().play(&mut player, &mut env, None);
//!     assert!(stats.moves() > 0);
//! }
//! player.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use fib2048_engine::ParseConfigError;
use fib2048_evaluator::WeightsIoError;

pub mod td_learner;
pub mod td_player;

/// Failure constructing a [`td_player::TdPlayer`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TdPlayerError {
    #[display("invalid learning player options: {_0}")]
    Config(ParseConfigError),
    #[display("cannot load learning player weights: {_0}")]
    Weights(WeightsIoError),
}
