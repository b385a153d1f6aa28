use crate::grid::{Cell, Grid, Wall};
use crate::pathfinding::{is_there_paths, manhattan};
use crate::pawn::Pawn;

/// Check wall geometry only: the anchor is an odd/odd position and none of the
/// three cells is already taken by another wall.
///
/// Overlapping and crossing walls both share at least one cell with the new
/// one, so the free-cells check covers them.
pub fn is_wall_geometry_valid(grid: &Grid, wall: &Wall) -> bool {
    let anchor = wall.pos;
    anchor.row % 2 == 1 && anchor.col % 2 == 1 && grid.are_wall_cells_free(wall)
}

/// Validate whether a wall placement is legal.
///
/// The wall is placed on the grid, every pawn is checked for a remaining path,
/// and the grid is restored before returning.
pub fn is_wall_placement_valid(grid: &mut Grid, pawns: &[Pawn], wall: &Wall) -> bool {
    if !is_wall_geometry_valid(grid, wall) {
        return false;
    }

    grid.set_wall_cells(wall, Cell::Wall);
    let valid = is_there_paths(grid, pawns, manhattan);
    grid.set_wall_cells(wall, Cell::Free);

    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;
    use crate::pawn::Goal;

    fn create_test_game() -> (Grid, Vec<Pawn>) {
        let mut grid = Grid::new(3, 3);
        let pawns = vec![
            Pawn::new(Point::new(4, 2), Goal::Row(0)),
            Pawn::new(Point::new(0, 2), Goal::Row(4)),
        ];
        for (seat, pawn) in pawns.iter().enumerate() {
            grid.set(pawn.pos, Cell::Pawn(seat));
        }
        (grid, pawns)
    }

    #[test]
    fn test_geometry_rejects_bad_anchors() {
        let (grid, _) = create_test_game();
        assert!(is_wall_geometry_valid(&grid, &Wall::horizontal(1, 1)));
        assert!(!is_wall_geometry_valid(&grid, &Wall::horizontal(1, 2)));
        assert!(!is_wall_geometry_valid(&grid, &Wall::horizontal(0, 1)));
        // Off the far edge.
        assert!(!is_wall_geometry_valid(&grid, &Wall::horizontal(5, 1)));
        assert!(!is_wall_geometry_valid(&grid, &Wall::vertical(-1, 1)));
    }

    #[test]
    fn test_overlap_and_cross_rejected() {
        let (mut grid, _) = create_test_game();
        grid.set_wall_cells(&Wall::horizontal(1, 1), Cell::Wall);
        assert!(!is_wall_geometry_valid(&grid, &Wall::vertical(1, 1)));
        assert!(!is_wall_geometry_valid(&grid, &Wall::horizontal(1, 3)));
        assert!(is_wall_geometry_valid(&grid, &Wall::vertical(1, 3)));
    }

    #[test]
    fn test_sealing_wall_rejected_and_grid_restored() {
        let (mut grid, pawns) = create_test_game();
        assert!(is_wall_placement_valid(&mut grid, &pawns, &Wall::horizontal(1, 3)));
        grid.set_wall_cells(&Wall::horizontal(1, 3), Cell::Wall);
        let before = grid.clone();

        // Closes the top-left corridor, the top pawn's only way down.
        assert!(!is_wall_placement_valid(&mut grid, &pawns, &Wall::vertical(1, 1)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_is_wall_placement_valid_simple() {
        let (mut grid, pawns) = create_test_game();
        assert!(is_wall_placement_valid(&mut grid, &pawns, &Wall::vertical(1, 1)));
        assert_eq!(grid.get(Point::new(1, 1)), Some(Cell::Free));
    }
}
