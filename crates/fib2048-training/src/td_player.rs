//! The learning player.
//!
//! Options (see [`AgentConfig`]):
//!
//! - `init` - start from zeroed weight tables
//! - `load=<path>` - start from a weight file (takes precedence over `init`)
//! - `save=<path>` - write the weights when the player is finished
//! - `alpha=<f32>` - learning rate, 0 (the default) disables learning
//! - `cap=<n>` - feature radix, default [`DEFAULT_MAX_INDEX`]
//!
//! Without `init` or `load` the player has no tables and never moves.

use fib2048_engine::{Action, Agent, AgentConfig, Board, Direction, ParseConfigError};
use fib2048_evaluator::{
    WeightsIoError,
    n_tuple::{DEFAULT_MAX_INDEX, NTupleNetwork},
    slide_evaluator,
};

use crate::{TdPlayerError, td_learner::TdLearner};

/// Greedy n-tuple player trained by backward TD(0) at the end of each episode.
#[derive(Debug, Clone)]
pub struct TdPlayer {
    config: AgentConfig,
    network: Option<NTupleNetwork>,
    learner: TdLearner,
}

impl TdPlayer {
    pub const DEFAULTS: &'static str = "name=td role=player";

    pub fn new(args: &str) -> Result<Self, TdPlayerError> {
        Self::from_config(AgentConfig::parse(Self::DEFAULTS, args)?)
    }

    /// Builds the player, allocating (`init`) or loading (`load`) its tables.
    pub fn from_config(config: AgentConfig) -> Result<Self, TdPlayerError> {
        let cap = match config.property("cap") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|&cap| NTupleNetwork::table_lens(cap).is_ok())
                .ok_or_else(|| ParseConfigError {
                    key: "cap".to_owned(),
                    value: value.to_owned(),
                })?,
            None => DEFAULT_MAX_INDEX,
        };
        let network = if let Some(path) = config.load() {
            Some(NTupleNetwork::load(path, cap)?)
        } else if config.init().is_some() {
            Some(NTupleNetwork::zeroed(cap).map_err(WeightsIoError::from)?)
        } else {
            None
        };
        let learner = TdLearner::new(config.alpha());
        Ok(Self {
            config,
            network,
            learner,
        })
    }

    /// Wraps an existing network.
    #[must_use]
    pub fn with_network(config: AgentConfig, network: NTupleNetwork) -> Self {
        let learner = TdLearner::new(config.alpha());
        Self {
            config,
            network: Some(network),
            learner,
        }
    }

    #[must_use]
    pub fn network(&self) -> Option<&NTupleNetwork> {
        self.network.as_ref()
    }

    #[must_use]
    pub fn learner(&self) -> &TdLearner {
        &self.learner
    }

    /// Consumes the player, writing its weights to `save` if configured.
    ///
    /// A player without tables has nothing to write; `save` is then skipped
    /// with a warning.
    pub fn finish(self) -> Result<(), WeightsIoError> {
        let Some(path) = self.config.save() else {
            return Ok(());
        };
        match &self.network {
            Some(network) => network.save(path)?,
            None => tracing::warn!(
                path = %path.display(),
                "no weight tables to save (neither `init` nor `load` was given)"
            ),
        }
        Ok(())
    }
}

impl Agent for TdPlayer {
    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn open_episode(&mut self) {
        self.learner.clear();
    }

    fn close_episode(&mut self) {
        if let Some(network) = &mut self.network {
            self.learner.backup(network);
        } else {
            self.learner.clear();
        }
    }

    fn take_action(&mut self, board: &Board) -> Action {
        let Some(network) = &self.network else {
            return Action::None;
        };
        let Some(choice) = slide_evaluator::select_best_slide(network, board, Direction::ALL)
        else {
            return Action::None;
        };
        self.learner.record(choice.reward(), *choice.after());
        Action::Slide(choice.direction())
    }
}
