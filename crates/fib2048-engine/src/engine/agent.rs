use crate::{
    core::Board,
    engine::{Action, AgentConfig},
};

/// Capability set shared by players and environments.
///
/// The episode driver calls [`Agent::open_episode`] before the first turn,
/// [`Agent::take_action`] on each of the agent's turns, and
/// [`Agent::close_episode`] after the last one.
pub trait Agent {
    fn config(&self) -> &AgentConfig;

    fn open_episode(&mut self) {}

    fn close_episode(&mut self) {}

    /// Chooses the next action for `board`, or [`Action::None`] if there is none.
    fn take_action(&mut self, board: &Board) -> Action;

    /// Returns `true` if `board` counts as a win for this agent, ending the episode.
    fn check_for_win(&self, _board: &Board) -> bool {
        false
    }

    fn name(&self) -> &str {
        self.config().name()
    }

    fn role(&self) -> &str {
        self.config().role()
    }
}

impl<A> Agent for Box<A>
where
    A: Agent + ?Sized,
{
    fn config(&self) -> &AgentConfig {
        (**self).config()
    }

    fn open_episode(&mut self) {
        (**self).open_episode();
    }

    fn close_episode(&mut self) {
        (**self).close_episode();
    }

    fn take_action(&mut self, board: &Board) -> Action {
        (**self).take_action(board)
    }

    fn check_for_win(&self, board: &Board) -> bool {
        (**self).check_for_win(board)
    }
}
