//! The playing field: grid occupancy, placed walls, pawns and wall supplies.
//!
//! Pawns are addressed by seat index. A `Board` owns no references to players
//! or the game, so cloning it yields a fully independent copy that search can
//! mutate freely.

use std::fmt;

use crate::grid::{Cell, CellKind, Grid, Orientation, Point, Wall};
use crate::pathfinding::{manhattan, shortest_path};
use crate::pawn::{possible_directions, Pawn, Seat};
use crate::validation::{is_wall_geometry_valid, is_wall_placement_valid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    walls: Vec<Wall>,
    pawns: Vec<Pawn>,
    walls_remaining: Vec<u32>,
    walls_per_player: u32,
}

impl Board {
    /// Create a board of `rows x cols` cells with one pawn per seat, placed on
    /// the canonical seats in order.
    ///
    /// Dimensions must be odd and at least 3. Only the game builds boards, after
    /// `validate_board_size` has accepted them.
    pub(crate) fn new(rows: usize, cols: usize, seats: usize, walls_per_player: u32) -> Self {
        let mut board = Self {
            grid: Grid::new(rows, cols),
            walls: Vec::new(),
            pawns: Vec::with_capacity(seats),
            walls_remaining: vec![walls_per_player; seats],
            walls_per_player,
        };
        board.seat_pawns(seats);
        board
    }

    fn seat_pawns(&mut self, seats: usize) {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        self.pawns = Seat::ORDER
            .iter()
            .take(seats)
            .map(|seat| Pawn::new(seat.start(rows, cols), seat.goal(rows, cols)))
            .collect();
        for (seat, pawn) in self.pawns.iter().enumerate() {
            self.grid.set(pawn.pos, Cell::Pawn(seat));
        }
    }

    /// Remove every wall, restore every wall supply and put pawns back on
    /// their starting seats.
    pub fn reset(&mut self) {
        let seats = self.pawns.len();
        let (rows, cols) = ((self.grid.rows() as usize + 1) / 2, (self.grid.cols() as usize + 1) / 2);
        self.grid = Grid::new(rows, cols);
        self.walls.clear();
        self.walls_remaining = vec![self.walls_per_player; seats];
        self.seat_pawns(seats);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn pawns(&self) -> &[Pawn] {
        &self.pawns
    }

    pub fn pawn(&self, seat: usize) -> &Pawn {
        &self.pawns[seat]
    }

    pub fn seats(&self) -> usize {
        self.pawns.len()
    }

    pub fn walls_remaining(&self, seat: usize) -> u32 {
        self.walls_remaining[seat]
    }

    pub fn walls_per_player(&self) -> u32 {
        self.walls_per_player
    }

    /// First seat whose pawn stands on its goal, in seat order.
    pub fn winner(&self) -> Option<usize> {
        self.pawns.iter().position(Pawn::is_winner)
    }

    /// Legal destinations for the pawn of `seat`, recomputed on every call.
    pub fn possible_directions(&self, seat: usize) -> Vec<Point> {
        possible_directions(&self.grid, self.pawns[seat].pos)
    }

    pub fn can_move(&self, seat: usize, to: Point) -> bool {
        self.possible_directions(seat).contains(&to)
    }

    /// Move the pawn of `seat` if the move is legal.
    pub fn try_move(&mut self, seat: usize, to: Point) -> bool {
        if !self.can_move(seat, to) {
            return false;
        }
        self.unsafe_move(seat, to);
        true
    }

    /// Move without checking the movement rules. The destination must still be
    /// a platform on the grid.
    pub fn unsafe_move(&mut self, seat: usize, to: Point) {
        assert!(
            self.grid.in_bounds(to) && CellKind::of(to) == CellKind::Platform,
            "pawn destination {} is not a platform",
            to
        );
        let from = self.pawns[seat].pos;
        self.grid.set(from, Cell::Free);
        self.grid.set(to, Cell::Pawn(seat));
        self.pawns[seat].pos = to;
    }

    /// Check a wall for `seat`: supply left, free geometry, and no pawn cut
    /// off from its goal. The board is unchanged afterwards.
    pub fn can_set_wall(&self, seat: usize, wall: &Wall) -> bool {
        if self.walls_remaining[seat] == 0 || !is_wall_geometry_valid(&self.grid, wall) {
            return false;
        }
        let mut grid = self.grid.clone();
        is_wall_placement_valid(&mut grid, &self.pawns, wall)
    }

    /// Place a wall for `seat` if legal, consuming one wall from its supply.
    pub fn try_set_wall(&mut self, seat: usize, wall: Wall) -> bool {
        if self.walls_remaining[seat] == 0
            || !is_wall_placement_valid(&mut self.grid, &self.pawns, &wall)
        {
            return false;
        }
        self.commit_wall(seat, wall);
        true
    }

    /// Place a wall without the path check. Geometry must still be free.
    pub fn unsafe_set_wall(&mut self, seat: usize, wall: Wall) {
        assert!(
            is_wall_geometry_valid(&self.grid, &wall),
            "wall {} overlaps the board or another wall",
            wall
        );
        self.commit_wall(seat, wall);
    }

    fn commit_wall(&mut self, seat: usize, wall: Wall) {
        self.grid.set_wall_cells(&wall, Cell::Wall);
        self.walls.push(wall);
        self.walls_remaining[seat] = self.walls_remaining[seat].saturating_sub(1);
    }

    /// Every wall position that is currently legal, ignoring wall supplies.
    pub fn possible_wall_positions(&self) -> Vec<Wall> {
        let mut grid = self.grid.clone();
        let anchors: Vec<Point> = self.grid.wall_anchors().collect();
        let mut result = Vec::new();
        for anchor in anchors {
            for orientation in Orientation::ALL {
                let wall = Wall::new(anchor, orientation);
                if is_wall_placement_valid(&mut grid, &self.pawns, &wall) {
                    result.push(wall);
                }
            }
        }
        result
    }

    /// Shortest path for the pawn of `seat` to its goal, excluding its current cell.
    pub fn shortest_path(&self, seat: usize) -> Option<Vec<Point>> {
        let pawn = &self.pawns[seat];
        shortest_path(&self.grid, pawn.pos, pawn.goal, manhattan)
    }

    /// Number of steps the pawn of `seat` needs to reach its goal.
    pub fn path_len(&self, seat: usize) -> Option<usize> {
        self.shortest_path(seat).map(|path| path.len())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let p = Point::new(row, col);
                let glyph = match (self.grid.get(p), CellKind::of(p)) {
                    (Some(Cell::Pawn(seat)), _) => char::from_digit(seat as u32, 10).unwrap_or('?'),
                    (Some(Cell::Wall), _) if row % 2 == 1 && col % 2 == 0 => '=',
                    (Some(Cell::Wall), _) if row % 2 == 0 => '|',
                    (Some(Cell::Wall), _) => '+',
                    (_, CellKind::Platform) => '.',
                    _ => ' ',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        for seat in 0..self.seats() {
            writeln!(
                f,
                "seat {}: pawn at {}, {} walls left",
                seat,
                self.pawns[seat].pos,
                self.walls_remaining[seat]
            )?;
        }
        Ok(())
    }
}
