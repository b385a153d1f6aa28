//! Pawns, their seats and goals, and pawn movement rules.

use crate::grid::{Cell, Grid, Point, DIRECTIONS};

/// A goal edge, expressed as a predicate over grid points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Goal {
    Row(i32),
    Col(i32),
}

impl Goal {
    pub fn is_reached(&self, p: Point) -> bool {
        match *self {
            Goal::Row(row) => p.row == row,
            Goal::Col(col) => p.col == col,
        }
    }
}

/// The four canonical starting seats, used positionally by seat index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seat {
    Bottom,
    Top,
    Left,
    Right,
}

impl Seat {
    pub const ORDER: [Seat; 4] = [Seat::Bottom, Seat::Top, Seat::Left, Seat::Right];

    pub fn from_index(index: usize) -> Option<Seat> {
        Self::ORDER.get(index).copied()
    }

    /// Starting position on a grid of the given (expanded) dimensions.
    pub fn start(self, grid_rows: i32, grid_cols: i32) -> Point {
        match self {
            Seat::Bottom => Point::new(grid_rows - 1, grid_cols / 2),
            Seat::Top => Point::new(0, grid_cols / 2),
            Seat::Left => Point::new(grid_rows / 2, 0),
            Seat::Right => Point::new(grid_rows / 2, grid_cols - 1),
        }
    }

    /// The opposite edge.
    pub fn goal(self, grid_rows: i32, grid_cols: i32) -> Goal {
        match self {
            Seat::Bottom => Goal::Row(0),
            Seat::Top => Goal::Row(grid_rows - 1),
            Seat::Left => Goal::Col(grid_cols - 1),
            Seat::Right => Goal::Col(0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pawn {
    pub pos: Point,
    pub goal: Goal,
}

impl Pawn {
    pub fn new(pos: Point, goal: Goal) -> Self {
        Self { pos, goal }
    }

    pub fn is_winner(&self) -> bool {
        self.goal.is_reached(self.pos)
    }
}

fn is_taken(grid: &Grid, p: Point) -> bool {
    matches!(grid.get(p), Some(Cell::Pawn(_)))
}

fn is_open(grid: &Grid, slot: Point) -> bool {
    grid.in_bounds(slot) && !grid.is_wall(slot)
}

/// Legal destinations for a pawn standing on `pos`.
///
/// Each axis direction is looked at independently: a plain step if the
/// neighbouring cell is free, a straight jump if another pawn stands there and
/// nothing is behind it, and otherwise the two diagonal landings beside the
/// blocking pawn.
pub fn possible_directions(grid: &Grid, pos: Point) -> Vec<Point> {
    let mut result = Vec::with_capacity(5);

    for dir in DIRECTIONS {
        if !is_open(grid, pos + dir) {
            continue;
        }

        let step = pos + dir * 2;
        if !is_taken(grid, step) {
            result.push(step);
            continue;
        }

        let jump = pos + dir * 4;
        if grid.in_bounds(jump) && !grid.is_wall(pos + dir * 3) && !is_taken(grid, jump) {
            result.push(jump);
            continue;
        }

        // Straight jump blocked by a wall, the edge or a third pawn.
        let side = perpendicular(dir);
        for side in [side * -1, side] {
            let landing = step + side * 2;
            if grid.in_bounds(landing) && !grid.is_wall(step + side) && !is_taken(grid, landing) {
                result.push(landing);
            }
        }
    }

    result
}

fn perpendicular(dir: Point) -> Point {
    Point::new(dir.col, dir.row)
}
