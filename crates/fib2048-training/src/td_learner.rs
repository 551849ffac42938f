//! Backward TD(0) over one episode's afterstates.
//!
//! # Algorithm
//!
//! With a trajectory of `(reward[i], after[i])` for `i = 0..n`:
//!
//! 1. `after[n-1]` is pulled toward 0 (no reward follows the last move)
//! 2. for `i = n-2` down to `0`, `after[i]` is pulled toward
//!    `reward[i] + V(after[i+1])`
//!
//! Each pull is [`NTupleNetwork::adjust`] with the learner's `alpha`. Walking
//! backward lets the terminal correction reach early states in one pass.

use fib2048_engine::{Board, Reward};
use fib2048_evaluator::n_tuple::NTupleNetwork;

/// One move of the learning player: the reward earned and the afterstate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub reward: Reward,
    pub after: Board,
}

/// Moves made by the learning player in the current episode, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trajectory {
    steps: Vec<Step>,
}

impl Trajectory {
    pub fn push(&mut self, reward: Reward, after: Board) {
        self.steps.push(Step { reward, after });
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Learning rate plus the trajectory it will be applied to.
#[derive(Debug, Clone, Default)]
pub struct TdLearner {
    alpha: f32,
    trajectory: Trajectory,
}

impl TdLearner {
    #[must_use]
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            trajectory: Trajectory::default(),
        }
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn record(&mut self, reward: Reward, after: Board) {
        self.trajectory.push(reward, after);
    }

    pub fn clear(&mut self) {
        self.trajectory.clear();
    }

    /// Runs the backward pass over the recorded trajectory and clears it.
    ///
    /// Nothing is updated when the trajectory is empty or `alpha` is 0.
    /// Returns the number of afterstates updated.
    pub fn backup(&mut self, network: &mut NTupleNetwork) -> usize {
        let trajectory = std::mem::take(&mut self.trajectory);
        let steps = trajectory.steps();
        let Some(last) = steps.last() else {
            return 0;
        };
        if self.alpha == 0.0 {
            return 0;
        }

        let mut total_error = network.adjust(&last.after, 0.0, self.alpha).abs();
        for (step, next) in steps.iter().zip(&steps[1..]).rev() {
            #[expect(clippy::cast_precision_loss)]
            let target = step.reward as f32 + network.estimate(&next.after);
            total_error += network.adjust(&step.after, target, self.alpha).abs();
        }

        #[expect(clippy::cast_precision_loss)]
        let mean_abs_error = total_error / steps.len() as f32;
        tracing::debug!(steps = steps.len(), mean_abs_error, "td backup");
        steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: usize = 5;

    fn boards() -> [Board; 3] {
        [
            Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Board::from_rows([[2, 1, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Board::from_rows([[3, 2, 1, 0], [1, 0, 0, 0], [0; 4], [0; 4]]),
        ]
    }

    #[test]
    fn test_record_and_clear() {
        let mut learner = TdLearner::new(0.1);
        let [a, b, _] = boards();
        learner.record(2, a);
        learner.record(0, b);
        assert_eq!(learner.trajectory().len(), 2);
        assert_eq!(learner.trajectory().steps()[0], Step { reward: 2, after: a });
        learner.clear();
        assert!(learner.trajectory().is_empty());
    }

    #[test]
    fn test_empty_trajectory() {
        let mut learner = TdLearner::new(0.1);
        let mut network = NTupleNetwork::zeroed(CAP).unwrap();
        let before = network.clone();
        assert_eq!(learner.backup(&mut network), 0);
        assert_eq!(network, before);
    }

    #[test]
    fn test_zero_alpha_never_learns() {
        let mut learner = TdLearner::new(0.0);
        let mut network = NTupleNetwork::zeroed(CAP).unwrap();
        let before = network.clone();
        for (i, board) in boards().into_iter().enumerate() {
            learner.record(u32::try_from(i).unwrap() + 1, board);
        }
        assert_eq!(learner.backup(&mut network), 0);
        assert_eq!(network, before);
        assert!(learner.trajectory().is_empty());
    }

    #[test]
    fn test_backup_propagates_reward() {
        let mut learner = TdLearner::new(0.05);
        let mut network = NTupleNetwork::zeroed(CAP).unwrap();
        let [a, b, c] = boards();
        learner.record(0, a);
        learner.record(8, b);
        learner.record(0, c);

        assert_eq!(learner.backup(&mut network), 3);
        assert!(learner.trajectory().is_empty());
        // The final afterstate only picks up weight it shares with `b`.
        assert!(network.estimate(&c) >= 0.0);
        // The rewarded move's afterstate moves up toward 8.
        assert!(network.estimate(&b) > 0.0);
        // The first afterstate bootstraps from the updated value of `b`.
        assert!(network.estimate(&a) > 0.0);
    }

    #[test]
    fn test_single_step_targets_zero() {
        let mut network = NTupleNetwork::zeroed(CAP).unwrap();
        let [a, ..] = boards();
        let mut learner = TdLearner::new(0.1);
        learner.record(5, a);
        learner.backup(&mut network);
        assert!(network.estimate(&a).abs() < f32::EPSILON);

        let mut warm = TdLearner::new(0.1);
        network.adjust(&a, 4.0, 0.5);
        let value = network.estimate(&a);
        warm.record(5, a);
        warm.backup(&mut network);
        assert!(network.estimate(&a) < value);
    }
}
