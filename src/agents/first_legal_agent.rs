//! Always takes the first legal pawn step. Never places walls.

use crate::actions::{get_valid_move_actions, Move};
use crate::agents::MoveSelector;
use crate::board::Board;

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalAgent;

impl MoveSelector for FirstLegalAgent {
    fn decide_move(&mut self, board: &Board, seat: usize) -> anyhow::Result<Move> {
        get_valid_move_actions(board, seat)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("seat {} has no legal pawn move", seat))
    }

    fn name(&self) -> &'static str {
        "first_legal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Point, Wall};

    #[test]
    fn test_picks_first_direction() {
        let board = Board::new(9, 9, 2, 10);
        let mut agent = FirstLegalAgent;
        // Left comes first in direction order.
        assert_eq!(agent.decide_move(&board, 0).unwrap(), Move::Pawn(Point::new(16, 6)));
        assert_eq!(agent.decide_move(&board, 1).unwrap(), Move::Pawn(Point::new(0, 6)));
    }

    #[test]
    fn test_fails_when_boxed_in() {
        let mut board = Board::new(3, 3, 2, 0);
        board.unsafe_move(0, Point::new(0, 0));
        board.unsafe_move(1, Point::new(0, 2));
        board.unsafe_set_wall(0, Wall::horizontal(1, 1));
        board.unsafe_set_wall(1, Wall::vertical(1, 3));
        assert!(FirstLegalAgent.decide_move(&board, 0).is_err());
    }
}
