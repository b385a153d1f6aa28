//! Shortest paths over the platform cells of a grid.
//!
//! Pawns are ignored; only walls block movement. Paths never include the
//! start cell, so a path's length is the number of steps to the goal.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::grid::{Grid, Point, DIRECTIONS};
use crate::pawn::{Goal, Pawn};

/// Heuristic used by the legality checks and the bots.
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.manhattan(b)
}

fn neighbours(grid: &Grid, p: Point) -> impl Iterator<Item = Point> + '_ {
    DIRECTIONS
        .into_iter()
        .map(move |dir| p + dir * 2)
        .filter(move |&next| grid.is_passable(p, next))
}

/// Single-target A*.
///
/// # Arguments
/// * `grid` - The game grid
/// * `start` - Starting platform
/// * `target` - Platform to reach
/// * `heuristic` - Admissible distance estimate between two points
///
/// # Returns
/// The cells visited after `start` up to and including `target`, or `None`
/// if `target` is unreachable.
pub fn find_path<H>(grid: &Grid, start: Point, target: Point, heuristic: H) -> Option<Vec<Point>>
where
    H: Fn(Point, Point) -> u32,
{
    if start == target {
        return Some(Vec::new());
    }

    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut cost: HashMap<Point, u32> = HashMap::new();
    // (f, insertion order) keeps expansion order stable between calls.
    let mut open = BinaryHeap::new();
    let mut order: u64 = 0;

    cost.insert(start, 0);
    open.push(Reverse((heuristic(start, target), order, start)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        if current == target {
            return Some(reconstruct(&came_from, start, target));
        }

        let current_cost = cost[&current];
        for next in neighbours(grid, current) {
            let next_cost = current_cost + 2;
            if cost.get(&next).map_or(true, |&known| next_cost < known) {
                cost.insert(next, next_cost);
                came_from.insert(next, current);
                order += 1;
                open.push(Reverse((next_cost + heuristic(next, target), order, next)));
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Point, Point>, start: Point, target: Point) -> Vec<Point> {
    let mut path = vec![target];
    let mut current = target;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Every platform satisfying the goal, in row-major order.
fn finishes(grid: &Grid, goal: Goal) -> Vec<Point> {
    grid.platforms().filter(|&p| goal.is_reached(p)).collect()
}

/// Shortest path from `start` to any platform satisfying `goal`.
///
/// Goal cells are tried nearest first by the heuristic; the first single-step
/// path ends the search early since nothing can beat it.
pub fn shortest_path<H>(grid: &Grid, start: Point, goal: Goal, heuristic: H) -> Option<Vec<Point>>
where
    H: Fn(Point, Point) -> u32,
{
    if goal.is_reached(start) {
        return Some(Vec::new());
    }

    let mut targets = finishes(grid, goal);
    targets.sort_by_key(|&finish| heuristic(start, finish));

    let mut best: Option<Vec<Point>> = None;
    for finish in targets {
        let Some(path) = find_path(grid, start, finish, &heuristic) else {
            continue;
        };
        if path.len() == 1 {
            return Some(path);
        }
        if best.as_ref().map_or(true, |b| path.len() < b.len()) {
            best = Some(path);
        }
    }

    best
}

/// Number of steps from `start` to `goal` with Manhattan heuristic.
pub fn distance_to_goal(grid: &Grid, start: Point, goal: Goal) -> Option<usize> {
    shortest_path(grid, start, goal, manhattan).map(|path| path.len())
}

/// Check that every pawn can still reach at least one of its goal cells.
pub fn is_there_paths<'a, I, H>(grid: &Grid, pawns: I, heuristic: H) -> bool
where
    I: IntoIterator<Item = &'a Pawn>,
    H: Fn(Point, Point) -> u32,
{
    pawns.into_iter().all(|pawn| {
        pawn.is_winner()
            || finishes(grid, pawn.goal)
                .into_iter()
                .any(|finish| find_path(grid, pawn.pos, finish, &heuristic).is_some())
    })
}
