//! Board geometry.
//!
//! A board of `rows x cols` cells is stored on a grid of
//! `(2 * rows - 1) x (2 * cols - 1)` positions. Cells where pawns stand sit on
//! even coordinates; every other position is a slot that a wall segment can
//! occupy.

use ndarray::Array2;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A (row, col) position on the expanded grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance, used as the A* heuristic.
    pub fn manhattan(self, other: Point) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.row * rhs, self.col * rhs)
    }
}

impl Div<i32> for Point {
    type Output = Point;

    fn div(self, rhs: i32) -> Point {
        Point::new(self.row / rhs, self.col / rhs)
    }
}

/// Unit steps on the expanded grid, in the order pawn moves are generated.
pub const LEFT: Point = Point::new(0, -1);
pub const RIGHT: Point = Point::new(0, 1);
pub const UP: Point = Point::new(-1, 0);
pub const DOWN: Point = Point::new(1, 0);
pub const DIRECTIONS: [Point; 4] = [LEFT, RIGHT, UP, DOWN];

/// Whether a grid position holds pawns or wall segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Platform,
    WallSlot,
}

impl CellKind {
    pub fn of(p: Point) -> Self {
        if p.row % 2 == 0 && p.col % 2 == 0 {
            CellKind::Platform
        } else {
            CellKind::WallSlot
        }
    }
}

/// Occupancy of a single grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Free,
    Wall,
    /// Platform occupied by the pawn of the given seat.
    Pawn(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Lies along a row, blocks vertical movement.
    Horizontal,
    /// Lies along a column, blocks horizontal movement.
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    fn step(self) -> Point {
        match self {
            Orientation::Horizontal => RIGHT,
            Orientation::Vertical => DOWN,
        }
    }
}

/// A wall centred on an odd/odd grid position, spanning two cell edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    pub pos: Point,
    pub orientation: Orientation,
}

impl Wall {
    pub const fn new(pos: Point, orientation: Orientation) -> Self {
        Self { pos, orientation }
    }

    pub const fn horizontal(row: i32, col: i32) -> Self {
        Self::new(Point::new(row, col), Orientation::Horizontal)
    }

    pub const fn vertical(row: i32, col: i32) -> Self {
        Self::new(Point::new(row, col), Orientation::Vertical)
    }

    /// The three grid positions this wall occupies: both slot ends and the centre.
    pub fn cells(&self) -> [Point; 3] {
        let step = self.orientation.step();
        [self.pos - step, self.pos, self.pos + step]
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.orientation {
            Orientation::Horizontal => "H",
            Orientation::Vertical => "V",
        };
        write!(f, "{}{}", kind, self.pos)
    }
}

/// Occupancy of every grid position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Create an empty grid for a board of `rows x cols` cells.
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows * 2 - 1, cols * 2 - 1), Cell::Free),
        }
    }

    /// Number of grid rows (not board cells).
    pub fn rows(&self) -> i32 {
        self.cells.nrows() as i32
    }

    pub fn cols(&self) -> i32 {
        self.cells.ncols() as i32
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows() && p.col < self.cols()
    }

    pub fn get(&self, p: Point) -> Option<Cell> {
        if self.in_bounds(p) {
            Some(self.cells[[p.row as usize, p.col as usize]])
        } else {
            None
        }
    }

    pub fn set(&mut self, p: Point, cell: Cell) {
        assert!(self.in_bounds(p), "point {} is off the grid", p);
        self.cells[[p.row as usize, p.col as usize]] = cell;
    }

    pub fn is_wall(&self, p: Point) -> bool {
        self.get(p) == Some(Cell::Wall)
    }

    /// True if the wall-slot between two adjacent platforms is open.
    pub fn is_passable(&self, from: Point, to: Point) -> bool {
        self.in_bounds(to) && !self.is_wall((from + to) / 2)
    }

    /// All platform positions, row-major.
    pub fn platforms(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows())
            .step_by(2)
            .flat_map(move |row| (0..self.cols()).step_by(2).map(move |col| Point::new(row, col)))
    }

    /// Check if every cell a wall would occupy is on the grid and free.
    pub fn are_wall_cells_free(&self, wall: &Wall) -> bool {
        wall.cells().iter().all(|&p| self.get(p) == Some(Cell::Free))
    }

    /// Set all grid cells corresponding to the wall to the given value.
    pub fn set_wall_cells(&mut self, wall: &Wall, cell: Cell) {
        for p in wall.cells() {
            self.set(p, cell);
        }
    }

    /// Check if all grid cells corresponding to the wall equal the given value.
    pub fn check_wall_cells(&self, wall: &Wall, cell: Cell) -> bool {
        wall.cells().iter().all(|&p| self.get(p) == Some(cell))
    }

    /// Wall anchors (odd/odd positions) in row-major order.
    pub fn wall_anchors(&self) -> impl Iterator<Item = Point> + '_ {
        (1..self.rows())
            .step_by(2)
            .flat_map(move |row| (1..self.cols()).step_by(2).map(move |col| Point::new(row, col)))
    }

    /// The grid rotated by 180 degrees.
    pub fn rotate_180(&self) -> Grid {
        let (h, w) = self.cells.dim();
        Grid {
            cells: Array2::from_shape_fn((h, w), |(r, c)| self.cells[[h - 1 - r, w - 1 - c]]),
        }
    }

    /// `p` mapped through a 180 degree rotation of this grid.
    pub fn rotate_point(&self, p: Point) -> Point {
        Point::new(self.rows() - 1 - p.row, self.cols() - 1 - p.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_kind_from_parity() {
        assert_eq!(CellKind::of(Point::new(0, 0)), CellKind::Platform);
        assert_eq!(CellKind::of(Point::new(4, 2)), CellKind::Platform);
        assert_eq!(CellKind::of(Point::new(1, 2)), CellKind::WallSlot);
        assert_eq!(CellKind::of(Point::new(2, 3)), CellKind::WallSlot);
        assert_eq!(CellKind::of(Point::new(3, 3)), CellKind::WallSlot);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(4, 6);
        let b = Point::new(2, 2);
        assert_eq!(a - b, Point::new(2, 4));
        assert_eq!((a - b) / 2, Point::new(1, 2));
        assert_eq!(a + DOWN * 2, Point::new(6, 6));
        assert_eq!(a.manhattan(b), 6);
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::new(9, 9);
        assert_eq!(grid.rows(), 17);
        assert_eq!(grid.cols(), 17);
        assert_eq!(grid.platforms().count(), 81);
        assert_eq!(grid.wall_anchors().count(), 64);
    }

    #[test]
    fn test_wall_cells() {
        let h = Wall::horizontal(1, 3);
        assert_eq!(h.cells(), [Point::new(1, 2), Point::new(1, 3), Point::new(1, 4)]);
        let v = Wall::vertical(1, 3);
        assert_eq!(v.cells(), [Point::new(0, 3), Point::new(1, 3), Point::new(2, 3)]);
    }

    #[test]
    fn test_set_and_check_wall_cells() {
        let mut grid = Grid::new(5, 5);
        let wall = Wall::vertical(1, 1);

        assert!(grid.check_wall_cells(&wall, Cell::Free));
        assert!(grid.are_wall_cells_free(&wall));

        grid.set_wall_cells(&wall, Cell::Wall);

        assert!(grid.check_wall_cells(&wall, Cell::Wall));
        assert!(!grid.are_wall_cells_free(&wall));
        // Crossing wall shares the centre cell.
        assert!(!grid.are_wall_cells_free(&Wall::horizontal(1, 1)));
        assert!(!grid.is_passable(Point::new(0, 0), Point::new(0, 2)));
        assert!(grid.is_passable(Point::new(0, 0), Point::new(2, 0)));
    }

    #[test]
    fn test_rotate_180_twice_is_identity() {
        let mut grid = Grid::new(5, 5);
        grid.set_wall_cells(&Wall::horizontal(3, 5), Cell::Wall);
        let rotated = grid.rotate_180();
        assert_ne!(rotated, grid);
        assert_eq!(rotated.rotate_180(), grid);
        assert_eq!(grid.rotate_point(Point::new(0, 0)), Point::new(8, 8));
    }
}
