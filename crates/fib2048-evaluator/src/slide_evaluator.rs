//! Slide selection: picking the best direction for the current board.
//!
//! Every direction is tried on a copy of the board in the caller's order;
//! illegal ones are dropped. The surviving candidates are scored by an
//! [`AfterstateEvaluator`] and the best is kept.
//!
//! # Tie-break
//!
//! A later candidate replaces the current best when its score is greater
//! *or equal*, so among equal scores the last one examined wins. Callers
//! that shuffle the order therefore break ties at random.

use arrayvec::ArrayVec;
use fib2048_engine::{Board, Direction, Reward};

use crate::afterstate_evaluator::AfterstateEvaluator;

/// A legal slide together with its afterstate and reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideCandidate {
    direction: Direction,
    after: Board,
    reward: Reward,
}

impl SlideCandidate {
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn after(&self) -> &Board {
        &self.after
    }

    #[must_use]
    pub fn reward(&self) -> Reward {
        self.reward
    }
}

/// Legal slides of `board`, in `order`.
#[must_use]
pub fn legal_slides(board: &Board, order: [Direction; 4]) -> ArrayVec<SlideCandidate, 4> {
    order
        .into_iter()
        .filter_map(|direction| {
            let (after, reward) = board.slid(direction).ok()?;
            Some(SlideCandidate {
                direction,
                after,
                reward,
            })
        })
        .collect()
}

/// Returns the highest-scoring legal slide, or `None` if no slide is legal.
///
/// ```
/// use fib2048_engine::{Board, Direction};
/// use fib2048_evaluator::{afterstate_evaluator::Heuristic, slide_evaluator};
///
/// let board = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
/// let best = slide_evaluator::select_best_slide(&Heuristic::Reward, &board, Direction::ALL);
/// // Left and right both merge for 2 points; left comes later in opcode order.
/// assert_eq!(best.unwrap().direction(), Direction::Left);
/// ```
#[must_use]
pub fn select_best_slide<E>(
    evaluator: &E,
    board: &Board,
    order: [Direction; 4],
) -> Option<SlideCandidate>
where
    E: AfterstateEvaluator + ?Sized,
{
    let mut best_score = f32::MIN;
    let mut best = None;
    for candidate in legal_slides(board, order) {
        let score = evaluator.evaluate(&candidate.after, candidate.reward);
        if score >= best_score {
            best_score = score;
            best = Some(candidate);
        }
    }
    best
}

/// Returns the first legal slide in `order`.
#[must_use]
pub fn first_legal_slide(board: &Board, order: [Direction; 4]) -> Option<SlideCandidate> {
    legal_slides(board, order).into_iter().next()
}

#[cfg(test)]
mod tests {
    use fib2048_engine::Direction::{Down, Left, Right, Up};

    use super::*;
    use crate::afterstate_evaluator::Heuristic;

    #[derive(Debug)]
    struct Constant;

    impl AfterstateEvaluator for Constant {
        fn evaluate(&self, _after: &Board, _reward: Reward) -> f32 {
            1.0
        }
    }

    fn blocked() -> Board {
        Board::from_rows([[1, 3, 1, 3], [3, 1, 3, 1], [1, 3, 1, 3], [3, 1, 3, 1]])
    }

    #[test]
    fn test_legal_slides_keep_order() {
        let board = Board::from_rows([[0, 0, 0, 0], [0, 1, 0, 0], [0; 4], [0; 4]]);
        let directions: Vec<_> = legal_slides(&board, [Left, Down, Right, Up])
            .iter()
            .map(SlideCandidate::direction)
            .collect();
        assert_eq!(directions, [Left, Down, Right, Up]);

        let corner = Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let directions: Vec<_> = legal_slides(&corner, Direction::ALL)
            .iter()
            .map(SlideCandidate::direction)
            .collect();
        assert_eq!(directions, [Right, Down]);
    }

    #[test]
    fn test_no_legal_slide() {
        assert!(select_best_slide(&Constant, &blocked(), Direction::ALL).is_none());
        assert!(first_legal_slide(&blocked(), Direction::ALL).is_none());
        assert!(legal_slides(&blocked(), Direction::ALL).is_empty());
    }

    #[test]
    fn test_ties_go_to_last_examined() {
        let board = Board::from_rows([[0, 0, 0, 0], [0, 1, 0, 0], [0; 4], [0; 4]]);
        let best = select_best_slide(&Constant, &board, Direction::ALL).unwrap();
        assert_eq!(best.direction(), Left);
        let best = select_best_slide(&Constant, &board, [Left, Up, Right, Down]).unwrap();
        assert_eq!(best.direction(), Down);
    }

    #[test]
    fn test_best_score_wins() {
        let board = Board::from_rows([[2, 0, 0, 0], [1, 0, 0, 0], [0; 4], [0; 4]]);
        let best = select_best_slide(&Heuristic::Reward, &board, Direction::ALL).unwrap();
        assert_eq!(best.reward(), 3);
        assert!(best.direction() == Up || best.direction() == Down);
        assert_eq!(best.after().max_index(), 3);
    }

    #[test]
    fn test_first_legal_slide() {
        let corner = Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let first = first_legal_slide(&corner, [Up, Left, Down, Right]).unwrap();
        assert_eq!(first.direction(), Down);
        assert_eq!(first.reward(), 0);
    }
}
