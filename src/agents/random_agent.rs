//! Random agent: picks uniformly among every legal pawn move and wall.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actions::{get_valid_actions, Move};
use crate::agents::MoveSelector;
use crate::board::Board;

/// An agent that selects a random legal move.
///
/// While the seat still has walls, each legal wall placement is exactly as
/// likely as each pawn step.
pub struct RandomAgent<R: Rng = StdRng> {
    rng: R,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for RandomAgent<R> {
    fn decide_move(&mut self, board: &Board, seat: usize) -> anyhow::Result<Move> {
        let valid = get_valid_actions(board, seat);

        anyhow::ensure!(!valid.is_empty(), "No valid moves available");

        Ok(valid[self.rng.gen_range(0..valid.len())])
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
