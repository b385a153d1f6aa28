//! Minimax with alpha-beta pruning over cloned boards.
//!
//! Every branch works on its own deep copy of the board, so the search never
//! touches the board it was handed. Root branches are evaluated in parallel;
//! below the root the search is sequential with alpha-beta cut-offs.

use rayon::prelude::*;
use tracing::debug;

use crate::actions::Move;
use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::grid::{Point, Wall};

pub const WINNING_REWARD: f32 = 1e6;
pub const DEFAULT_DEPTH: u32 = 1;

/// Search depth and evaluation weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchParams {
    pub depth: u32,
    pub turn_weight: f32,
    pub walls_weight: f32,
    pub path_weight: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            turn_weight: 1.0,
            walls_weight: 1.0,
            path_weight: 5.0,
        }
    }
}

fn opponent_of(board: &Board, seat: usize) -> usize {
    (seat + 1) % board.seats()
}

fn path_len(board: &Board, seat: usize) -> GameResult<usize> {
    board.path_len(seat).ok_or(GameError::NoPath { seat })
}

/// Evaluate a board position from the point of view of `me`.
///
/// `my_move` tells whether `me` is the side to move in this position.
pub fn evaluate(board: &Board, me: usize, my_move: bool, params: &SearchParams) -> GameResult<f32> {
    let other = opponent_of(board, me);
    let my_len = path_len(board, me)?;
    let other_len = path_len(board, other)?;
    let my_walls = board.walls_remaining(me);
    let other_walls = board.walls_remaining(other);

    if my_len == 0 {
        return Ok(WINNING_REWARD);
    }
    if other_len == 0 {
        return Ok(-WINNING_REWARD);
    }
    // Forced outcomes keep the sentinel magnitude, nudged so that a quicker
    // win (or a slower loss) ranks higher.
    let win = WINNING_REWARD - my_len as f32;
    let loss = -WINNING_REWARD + other_len as f32;

    if my_move && my_len == 1 {
        return Ok(win);
    }
    if !my_move && other_len == 1 {
        return Ok(loss);
    }

    // Nobody can slow the race down any more.
    if my_walls == 0 && other_len < my_len {
        return Ok(loss);
    }
    if other_walls == 0 && my_len < other_len {
        return Ok(win);
    }

    let tempo = if my_move { 1.0 } else { -1.0 };
    let walls_reward = my_walls as f32 - other_walls as f32;
    let distance_reward = other_len as f32 - my_len as f32;

    Ok(tempo * params.turn_weight
        + walls_reward * params.walls_weight
        + distance_reward * params.path_weight)
}

/// The two walls that would block the step across `slot`.
fn blocking_walls(slot: Point) -> [Wall; 2] {
    if slot.row % 2 != 0 {
        [
            Wall::horizontal(slot.row, slot.col - 1),
            Wall::horizontal(slot.row, slot.col + 1),
        ]
    } else {
        [
            Wall::vertical(slot.row - 1, slot.col),
            Wall::vertical(slot.row + 1, slot.col),
        ]
    }
}

/// Path-length race from the point of view of `seat`: positive when ahead.
fn path_differential(board: &Board, seat: usize) -> GameResult<i64> {
    let other = opponent_of(board, seat);
    Ok(path_len(board, other)? as i64 - path_len(board, seat)? as i64)
}

/// Walls flanking each step of the opponent's shortest path that strictly
/// improve the race for `seat`, paired with the resulting boards.
pub fn wall_candidates(board: &Board, seat: usize) -> GameResult<Vec<(Move, Board)>> {
    if board.walls_remaining(seat) == 0 {
        return Ok(Vec::new());
    }

    let other = opponent_of(board, seat);
    let path = board.shortest_path(other).ok_or(GameError::NoPath { seat: other })?;
    let before = path_differential(board, seat)?;

    let mut tried: Vec<Wall> = Vec::new();
    let mut result = Vec::new();
    let mut prev = board.pawn(other).pos;

    for &next in &path {
        for wall in blocking_walls((prev + next) / 2) {
            if tried.contains(&wall) {
                continue;
            }
            tried.push(wall);

            if !board.can_set_wall(seat, &wall) {
                continue;
            }
            let mut child = board.clone();
            if !child.try_set_wall(seat, wall) {
                return Err(GameError::IllegalSearchMove { mv: Move::Wall(wall) });
            }
            if path_differential(&child, seat)? > before {
                result.push((Move::Wall(wall), child));
            }
        }
        prev = next;
    }

    Ok(result)
}

/// All branches for `seat`: pawn moves first, then pruned wall placements.
pub fn child_positions(board: &Board, seat: usize) -> GameResult<Vec<(Move, Board)>> {
    let mut result = Vec::new();

    for to in board.possible_directions(seat) {
        let mut child = board.clone();
        if !child.try_move(seat, to) {
            return Err(GameError::IllegalSearchMove { mv: Move::Pawn(to) });
        }
        result.push((Move::Pawn(to), child));
    }

    result.extend(wall_candidates(board, seat)?);
    Ok(result)
}

fn minimax(
    board: &Board,
    depth: u32,
    mut alpha: f32,
    mut beta: f32,
    maximizing: bool,
    me: usize,
    params: &SearchParams,
) -> GameResult<f32> {
    if depth == 0 || board.winner().is_some() {
        return evaluate(board, me, maximizing, params);
    }

    let seat = if maximizing { me } else { opponent_of(board, me) };
    let children = child_positions(board, seat)?;
    if children.is_empty() {
        return evaluate(board, me, maximizing, params);
    }

    if maximizing {
        let mut value = f32::NEG_INFINITY;
        for (_, child) in &children {
            let eval = minimax(child, depth - 1, alpha, beta, false, me, params)?;
            value = value.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        Ok(value)
    } else {
        let mut value = f32::INFINITY;
        for (_, child) in &children {
            let eval = minimax(child, depth - 1, alpha, beta, true, me, params)?;
            value = value.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        Ok(value)
    }
}

/// Evaluate every root branch for `me` (parallelized), in generation order.
pub fn evaluate_actions(board: &Board, me: usize, params: &SearchParams) -> GameResult<Vec<(Move, f32)>> {
    let depth = params.depth.max(1);
    let children = child_positions(board, me)?;

    children
        .into_par_iter()
        .map(|(mv, child)| {
            let value = minimax(&child, depth - 1, f32::NEG_INFINITY, f32::INFINITY, false, me, params)?;
            Ok((mv, value))
        })
        .collect()
}

/// Pick the best move for `me`.
///
/// Ties keep the first branch in generation order (strict `>`), so with equal
/// scores a pawn move is preferred over a wall.
pub fn best_move(board: &Board, me: usize, params: &SearchParams) -> GameResult<Option<(Move, f32)>> {
    let mut best: Option<(Move, f32)> = None;
    for (mv, value) in evaluate_actions(board, me, params)? {
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((mv, value));
        }
    }

    if let Some((mv, value)) = best {
        debug!(seat = me, %mv, value, "search picked a move");
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_start_position_is_tempo_only() {
        let board = Board::new(9, 9, 2, 10);
        let params = SearchParams::default();
        assert_eq!(evaluate(&board, 0, true, &params).unwrap(), 1.0);
        assert_eq!(evaluate(&board, 0, false, &params).unwrap(), -1.0);
    }

    #[test]
    fn test_evaluate_terminal_positions() {
        let params = SearchParams::default();
        let mut board = Board::new(5, 5, 2, 2);

        board.unsafe_move(0, Point::new(0, 0));
        assert_eq!(evaluate(&board, 0, false, &params).unwrap(), WINNING_REWARD);
        assert_eq!(evaluate(&board, 1, true, &params).unwrap(), -WINNING_REWARD);

        let mut board = Board::new(5, 5, 2, 2);
        board.unsafe_move(1, Point::new(6, 0));
        // Opponent one step from goal and about to move.
        assert_eq!(evaluate(&board, 0, false, &params).unwrap(), -WINNING_REWARD + 1.0);
    }

    #[test]
    fn test_evaluate_out_of_walls_and_behind() {
        let params = SearchParams::default();
        let mut board = Board::new(5, 5, 2, 0);
        board.unsafe_move(1, Point::new(4, 0));
        // Both out of walls, opponent two steps away, me four.
        assert_eq!(evaluate(&board, 0, true, &params).unwrap(), -WINNING_REWARD + 2.0);
        assert_eq!(evaluate(&board, 1, true, &params).unwrap(), WINNING_REWARD - 2.0);
    }

    #[test]
    fn test_forced_win_prefers_shorter_race() {
        let params = SearchParams::default();
        let mut board = Board::new(5, 5, 2, 0);
        let far = evaluate(&board, 0, false, &params).unwrap();
        board.unsafe_move(0, Point::new(6, 4));
        let near = evaluate(&board, 0, false, &params).unwrap();
        assert!(far < WINNING_REWARD / 2.0 && near > WINNING_REWARD / 2.0);

        board.unsafe_move(0, Point::new(4, 4));
        assert!(evaluate(&board, 0, false, &params).unwrap() > near);
    }

    #[test]
    fn test_depth_one_takes_winning_step() {
        let mut board = Board::new(5, 5, 2, 3);
        board.unsafe_move(0, Point::new(2, 0));
        let (mv, value) = best_move(&board, 0, &SearchParams::default()).unwrap().unwrap();
        assert_eq!(mv, Move::Pawn(Point::new(0, 0)));
        assert_eq!(value, WINNING_REWARD);
    }

    #[test]
    fn test_deeper_search_takes_winning_step() {
        // Both pawns one step from their goals; anything but finishing loses.
        let mut board = Board::new(5, 5, 2, 1);
        board.unsafe_move(0, Point::new(2, 0));
        board.unsafe_move(1, Point::new(6, 8));
        let params = SearchParams { depth: 2, ..SearchParams::default() };
        let (mv, _) = best_move(&board, 1, &params).unwrap().unwrap();
        assert_eq!(mv, Move::Pawn(Point::new(8, 8)));
    }

    #[test]
    fn test_wall_candidates_improve_race() {
        let mut board = Board::new(9, 9, 2, 10);
        board.unsafe_move(0, Point::new(16, 2));
        board.unsafe_move(1, Point::new(0, 14));
        let before = path_differential(&board, 1).unwrap();
        let candidates = wall_candidates(&board, 1).unwrap();
        assert!(!candidates.is_empty());
        for (mv, child) in &candidates {
            assert!(matches!(mv, Move::Wall(_)));
            assert!(path_differential(child, 1).unwrap() > before);
            assert_eq!(child.walls_remaining(1), 9);
        }
    }

    #[test]
    fn test_no_wall_candidates_on_mirrored_start() {
        // Pawns share a column, so any wall across one path blocks the other too.
        let board = Board::new(9, 9, 2, 10);
        assert!(wall_candidates(&board, 0).unwrap().is_empty());
        assert!(wall_candidates(&board, 1).unwrap().is_empty());
    }

    #[test]
    fn test_no_wall_candidates_without_supply() {
        let board = Board::new(9, 9, 2, 0);
        assert!(wall_candidates(&board, 0).unwrap().is_empty());
        assert_eq!(child_positions(&board, 0).unwrap().len(), 3);
    }

    #[test]
    fn test_search_leaves_input_untouched() {
        let board = Board::new(9, 9, 2, 10);
        let before = board.clone();
        let params = SearchParams { depth: 2, ..SearchParams::default() };
        let picked = best_move(&board, 0, &params).unwrap();
        assert!(picked.is_some());
        assert_eq!(board, before);
    }

    #[test]
    fn test_best_move_is_deterministic() {
        let mut board = Board::new(7, 7, 2, 4);
        assert!(board.try_set_wall(1, Wall::horizontal(9, 5)));
        let params = SearchParams::default();
        let first = best_move(&board, 0, &params).unwrap();
        for _ in 0..5 {
            assert_eq!(best_move(&board, 0, &params).unwrap(), first);
        }
    }
}
