//! Search-based agent backed by [`crate::minimax`].

use anyhow::Context;

use crate::actions::Move;
use crate::agents::MoveSelector;
use crate::board::Board;
use crate::minimax::{best_move, SearchParams};

#[derive(Clone, Copy, Debug, Default)]
pub struct MinimaxAgent {
    params: SearchParams,
}

impl MinimaxAgent {
    pub fn new(params: SearchParams) -> Self {
        Self { params }
    }
}

impl MoveSelector for MinimaxAgent {
    fn decide_move(&mut self, board: &Board, seat: usize) -> anyhow::Result<Move> {
        let (mv, _) = best_move(board, seat, &self.params)
            .with_context(|| format!("search for seat {} failed", seat))?
            .ok_or_else(|| anyhow::anyhow!("seat {} has no move to search", seat))?;
        Ok(mv)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;

    #[test]
    fn test_minimax_agent_wins_when_possible() {
        let mut board = Board::new(9, 9, 2, 10);
        board.unsafe_move(1, Point::new(14, 0));
        let mut agent = MinimaxAgent::default();
        assert_eq!(agent.decide_move(&board, 1).unwrap(), Move::Pawn(Point::new(16, 0)));
    }

    #[test]
    fn test_minimax_agent_move_is_legal() {
        let board = Board::new(9, 9, 2, 10);
        let mut agent = MinimaxAgent::new(SearchParams { depth: 2, ..SearchParams::default() });
        let mv = agent.decide_move(&board, 0).unwrap();
        assert!(mv.is_legal(&board, 0));
    }
}
