use std::time::{Duration, Instant};

use crate::{
    ApplyActionError,
    core::{Board, Reward},
    engine::{Action, Agent},
};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Turn {
    Player,
    Environment,
}

/// One game from an empty board to the first turn without an action.
///
/// The environment moves twice to set up the board, then player and
/// environment alternate.
#[derive(Debug, Clone, Default)]
pub struct Episode {
    board: Board,
    score: u64,
    steps: usize,
    moves: usize,
}

impl Episode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of actions applied so far (placements included).
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns who moves next.
    #[must_use]
    pub fn turn(&self) -> Turn {
        if self.steps < 2 || self.steps % 2 == 1 {
            Turn::Environment
        } else {
            Turn::Player
        }
    }

    /// Applies `action` for the side to move.
    ///
    /// On error nothing is recorded and the board is unchanged.
    pub fn apply(&mut self, action: Action) -> Result<Reward, ApplyActionError> {
        let reward = action.apply(&mut self.board)?;
        if self.turn().is_player() {
            self.moves += 1;
        }
        self.score += u64::from(reward);
        self.steps += 1;
        Ok(reward)
    }

    /// Plays the episode to the end and returns its statistics.
    ///
    /// The episode ends when the side to move returns [`Action::None`], its
    /// action cannot be applied, it reports a win, or `limit` actions have been
    /// applied. Both agents are opened before the first turn and closed after
    /// the last.
    pub fn play<P, E>(mut self, player: &mut P, env: &mut E, limit: Option<usize>) -> EpisodeStats
    where
        P: Agent + ?Sized,
        E: Agent + ?Sized,
    {
        let started = Instant::now();
        player.open_episode();
        env.open_episode();
        tracing::debug!(player = player.name(), env = env.name(), "episode opened");

        while limit.is_none_or(|limit| self.steps < limit) {
            let proceed = match self.turn() {
                Turn::Player => self.take_turn(player),
                Turn::Environment => self.take_turn(env),
            };
            if !proceed {
                break;
            }
        }

        env.close_episode();
        player.close_episode();

        let stats = EpisodeStats {
            score: self.score,
            steps: self.steps,
            moves: self.moves,
            board: self.board,
            duration: started.elapsed(),
        };
        tracing::debug!(
            score = stats.score,
            moves = stats.moves,
            max_tile = stats.max_tile(),
            "episode closed"
        );
        stats
    }

    fn take_turn<A>(&mut self, agent: &mut A) -> bool
    where
        A: Agent + ?Sized,
    {
        let action = agent.take_action(&self.board);
        if let Err(err) = self.apply(action) {
            tracing::trace!(agent = agent.name(), %action, %err, "no further action");
            return false;
        }
        !agent.check_for_win(&self.board)
    }
}

/// Outcome of a finished [`Episode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeStats {
    score: u64,
    steps: usize,
    moves: usize,
    board: Board,
    duration: Duration,
}

impl EpisodeStats {
    /// Sum of all slide rewards.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of actions applied, placements included.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of player slides.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Largest tile index on the final board.
    #[must_use]
    pub fn max_tile(&self) -> u8 {
        self.board.max_index()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
