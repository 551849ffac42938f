//! Non-learning players driven by a fixed rule.
//!
//! The mode is taken from the `mode` option, or from a bare mode token in the
//! agent arguments (`"space"` is the same as `"mode=space"`):
//!
//! | mode        | choice                                              |
//! |-------------|-----------------------------------------------------|
//! | `first`     | first legal slide (default)                         |
//! | `moron`     | never moves                                         |
//! | `score`     | largest reward                                      |
//! | `space`     | most empty cells afterwards                         |
//! | `monotonic` | reward plus the longest monotone run                |
//! | `corner`    | reward plus the corner tile indices                 |
//!
//! Directions are examined in an order shuffled each turn by the player's own
//! `Pcg32`, so ties fall on a random direction.

use std::str::FromStr;

use fib2048_engine::{Action, Agent, AgentConfig, Board, Direction, ParseConfigError};
use rand::seq::SliceRandom as _;
use rand_pcg::Pcg32;

use crate::{afterstate_evaluator::Heuristic, slide_evaluator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum HeuristicMode {
    #[default]
    #[display("first")]
    First,
    #[display("moron")]
    Moron,
    #[display("score")]
    Score,
    #[display("space")]
    Space,
    #[display("monotonic")]
    Monotonic,
    #[display("corner")]
    Corner,
}

impl HeuristicMode {
    pub const ALL: [Self; 6] = [
        Self::First,
        Self::Moron,
        Self::Score,
        Self::Space,
        Self::Monotonic,
        Self::Corner,
    ];

    /// Resolves the mode from `mode=<name>` or a bare `<name>` token.
    pub fn from_config(config: &AgentConfig) -> Result<Self, ParseConfigError> {
        if let Some(value) = config.property("mode") {
            return value.parse();
        }
        let bare = config
            .properties()
            .filter(|(key, value)| key == value)
            .find_map(|(key, _)| key.parse().ok());
        Ok(bare.unwrap_or_default())
    }

    fn heuristic(self) -> Option<Heuristic> {
        match self {
            Self::First | Self::Moron => None,
            Self::Score => Some(Heuristic::Reward),
            Self::Space => Some(Heuristic::Space),
            Self::Monotonic => Some(Heuristic::Monotonic),
            Self::Corner => Some(Heuristic::Corner),
        }
    }
}

impl FromStr for HeuristicMode {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.to_string() == s)
            .ok_or_else(|| ParseConfigError {
                key: "mode".to_owned(),
                value: s.to_owned(),
            })
    }
}

/// Player choosing slides by a [`HeuristicMode`].
#[derive(Debug, Clone)]
pub struct HeuristicPlayer {
    config: AgentConfig,
    mode: HeuristicMode,
    rng: Pcg32,
    order: [Direction; 4],
}

impl HeuristicPlayer {
    pub const DEFAULTS: &'static str = "name=dummy role=player";

    pub fn new(args: &str) -> Result<Self, ParseConfigError> {
        let config = AgentConfig::parse(Self::DEFAULTS, args)?;
        let mode = HeuristicMode::from_config(&config)?;
        let rng = config.rng();
        Ok(Self {
            config,
            mode,
            rng,
            order: Direction::ALL,
        })
    }

    #[must_use]
    pub fn mode(&self) -> HeuristicMode {
        self.mode
    }
}

impl Agent for HeuristicPlayer {
    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn take_action(&mut self, board: &Board) -> Action {
        self.order.shuffle(&mut self.rng);
        let choice = match self.mode {
            HeuristicMode::Moron => None,
            HeuristicMode::First => slide_evaluator::first_legal_slide(board, self.order),
            mode => mode
                .heuristic()
                .and_then(|h| slide_evaluator::select_best_slide(&h, board, self.order)),
        };
        choice.map_or(Action::None, |c| Action::Slide(c.direction()))
    }
}
