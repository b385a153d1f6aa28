use std::fmt;

use crate::board::Board;
use crate::grid::{Point, Wall};

/// A single turn: move the pawn or place a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Pawn(Point),
    Wall(Wall),
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pawn(to) => write!(f, "move to {}", to),
            Move::Wall(wall) => write!(f, "wall {}", wall),
        }
    }
}

impl Move {
    /// Apply to `board` for `seat` if legal.
    pub fn try_apply(&self, board: &mut Board, seat: usize) -> bool {
        match *self {
            Move::Pawn(to) => board.try_move(seat, to),
            Move::Wall(wall) => board.try_set_wall(seat, wall),
        }
    }

    pub fn is_legal(&self, board: &Board, seat: usize) -> bool {
        match self {
            Move::Pawn(to) => board.can_move(seat, *to),
            Move::Wall(wall) => board.can_set_wall(seat, wall),
        }
    }
}

/// Get all valid pawn moves for `seat`.
pub fn get_valid_move_actions(board: &Board, seat: usize) -> Vec<Move> {
    board.possible_directions(seat).into_iter().map(Move::Pawn).collect()
}

/// Get all valid wall placements for `seat`; empty once its supply is gone.
pub fn get_valid_wall_actions(board: &Board, seat: usize) -> Vec<Move> {
    if board.walls_remaining(seat) == 0 {
        return Vec::new();
    }
    board.possible_wall_positions().into_iter().map(Move::Wall).collect()
}

/// Pawn moves first, then wall placements.
pub fn get_valid_actions(board: &Board, seat: usize) -> Vec<Move> {
    let mut actions = get_valid_move_actions(board, seat);
    actions.extend(get_valid_wall_actions(board, seat));
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_actions_on_start_board() {
        let board = Board::new(3, 3, 2, 1);
        let moves = get_valid_move_actions(&board, 0);
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&Move::Pawn(Point::new(2, 2))));

        let all = get_valid_actions(&board, 0);
        assert_eq!(all.len(), 3 + 8);
        assert!(matches!(all[0], Move::Pawn(_)));
        assert!(matches!(all[all.len() - 1], Move::Wall(_)));
    }

    #[test]
    fn test_no_wall_actions_without_supply() {
        let board = Board::new(3, 3, 2, 0);
        assert!(get_valid_wall_actions(&board, 0).is_empty());
        assert_eq!(get_valid_actions(&board, 0).len(), 3);
    }

    #[test]
    fn test_try_apply_matches_is_legal() {
        let mut board = Board::new(5, 5, 2, 2);
        for mv in get_valid_actions(&board, 1) {
            let mut copy = board.clone();
            assert!(mv.is_legal(&board, 1));
            assert!(mv.try_apply(&mut copy, 1), "{} should apply", mv);
        }
        let bad = Move::Pawn(Point::new(4, 4));
        assert!(!bad.is_legal(&board, 1));
        assert!(!bad.try_apply(&mut board, 1));
    }
}
