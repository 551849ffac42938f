//! Afterstate evaluation: scoring the board a slide produces.
//!
//! A player compares candidate slides by `evaluate(afterstate, reward)`;
//! higher is better. The learned evaluator scores `reward + V(afterstate)`,
//! the heuristic ones score a fixed board property.

use std::fmt;

use fib2048_engine::{Board, Reward};

use crate::n_tuple::NTupleNetwork;

/// Scores a candidate slide by its afterstate and reward.
pub trait AfterstateEvaluator: fmt::Debug {
    fn evaluate(&self, after: &Board, reward: Reward) -> f32;
}

impl AfterstateEvaluator for NTupleNetwork {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate(&self, after: &Board, reward: Reward) -> f32 {
        reward as f32 + self.estimate(after)
    }
}

/// Fixed board rule used by [`crate::heuristic_player::HeuristicPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// The slide's reward.
    Reward,
    /// Empty cells left by the slide.
    Space,
    /// Reward plus the longest monotone run.
    Monotonic,
    /// Reward plus the corner tile indices.
    Corner,
}

impl AfterstateEvaluator for Heuristic {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate(&self, after: &Board, reward: Reward) -> f32 {
        let score = match self {
            Self::Reward => u64::from(reward),
            Self::Space => after.num_empty() as u64,
            Self::Monotonic => u64::from(reward) + after.monotonic() as u64,
            Self::Corner => u64::from(reward) + u64::from(after.corner_sum()),
        };
        score as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_adds_reward() {
        let network = NTupleNetwork::zeroed(3).unwrap();
        let board = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!((network.evaluate(&board, 5) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_heuristics() {
        let board = Board::from_rows([[3, 0, 0, 1], [0; 4], [0; 4], [2, 0, 0, 0]]);
        assert!((Heuristic::Reward.evaluate(&board, 8) - 8.0).abs() < f32::EPSILON);
        assert!((Heuristic::Space.evaluate(&board, 8) - 13.0).abs() < f32::EPSILON);
        let corner = Heuristic::Corner.evaluate(&board, 8);
        assert!((corner - 14.0).abs() < f32::EPSILON);
        let monotonic = Heuristic::Monotonic.evaluate(&board, 8);
        #[expect(clippy::cast_precision_loss)]
        let expected = 8.0 + board.monotonic() as f32;
        assert!((monotonic - expected).abs() < f32::EPSILON);
    }
}
