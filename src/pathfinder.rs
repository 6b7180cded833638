//! A* shortest-path search over a [`Grid`] with unit step cost.

use crate::error::PathError;
use crate::grid::{Coord, Grid};
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Ordered cells from start to goal inclusive. Empty means no route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves; zero for both the empty and the single-cell path.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.cells
    }
}

/// Shortest route from `start` to `goal` through open cells.
///
/// Endpoints must be in bounds and open, otherwise a [`PathError`] is returned.
/// An unreachable goal yields `Ok` with an empty path, and `start == goal`
/// yields the single-cell path.
pub fn find_path(grid: &Grid, start: Coord, goal: Coord) -> Result<Path, PathError> {
    check_endpoint(grid, start)?;
    check_endpoint(grid, goal)?;

    let mut frontier = BinaryHeap::new();
    let mut cost: HashMap<Coord, usize> = HashMap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut expanded = 0usize;

    cost.insert(start, 0);
    frontier.push(Reverse((start.manhattan(goal), start)));

    while let Some(Reverse((priority, current))) = frontier.pop() {
        if current == goal {
            break;
        }
        let current_cost = cost[&current];
        // Stale entry: a cheaper route to `current` was pushed after this one.
        if priority > current_cost + current.manhattan(goal) {
            continue;
        }
        expanded += 1;

        for next in grid.open_neighbors(current) {
            let tentative = current_cost + 1;
            if cost.get(&next).map_or(true, |&known| tentative < known) {
                cost.insert(next, tentative);
                came_from.insert(next, current);
                frontier.push(Reverse((tentative + next.manhattan(goal), next)));
            }
        }
    }

    let path = reconstruct(&came_from, start, goal);
    debug!(
        "path {} -> {}: {} steps, {} nodes expanded",
        start,
        goal,
        if path.is_empty() {
            "no".to_string()
        } else {
            path.steps().to_string()
        },
        expanded
    );
    Ok(path)
}

fn check_endpoint(grid: &Grid, coord: Coord) -> Result<(), PathError> {
    if !grid.contains(coord) {
        return Err(PathError::OutOfBounds {
            coord,
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    if !grid.is_open(coord) {
        return Err(PathError::Blocked(coord));
    }
    Ok(())
}

/// Walks predecessors back from `goal`. A gap before reaching `start` means
/// the goal was never reached.
fn reconstruct(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> Path {
    let mut cells = Vec::new();
    let mut current = goal;
    while current != start {
        cells.push(current);
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => {
                trace!("no predecessor for {}", current);
                return Path::empty();
            }
        }
    }
    cells.push(start);
    cells.reverse();
    Path { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn straight_corridor() {
        let g = grid(
            "#####
             #...#
             #####",
        );
        let path = find_path(&g, Coord::new(1, 1), Coord::new(1, 3)).unwrap();
        assert_eq!(
            path.as_slice(),
            &[Coord::new(1, 1), Coord::new(1, 2), Coord::new(1, 3)]
        );
        assert_eq!(path.steps(), 2);
    }

    #[test]
    fn start_equals_goal() {
        let g = Grid::filled(3, 3, Cell::Open);
        let c = Coord::new(1, 1);
        let path = find_path(&g, c, c).unwrap();
        assert_eq!(path.as_slice(), &[c]);
        assert_eq!(path.steps(), 0);
        assert!(!path.is_empty());
    }

    #[test]
    fn detours_around_wall() {
        let g = grid(
            ".....
             .###.
             ...#.
             .#...
             .....",
        );
        let path = find_path(&g, Coord::new(2, 2), Coord::new(2, 4)).unwrap();
        assert_eq!(path.steps(), 4);
        assert_eq!(path.start(), Some(Coord::new(2, 2)));
        assert_eq!(path.goal(), Some(Coord::new(2, 4)));
        assert!(path.contains(Coord::new(3, 3)));
    }

    #[test]
    fn unreachable_goal_is_empty() {
        let g = grid(
            "..#..
             ..#..
             ..#..",
        );
        let path = find_path(&g, Coord::new(0, 0), Coord::new(2, 4)).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.steps(), 0);
    }

    #[test]
    fn rejects_bad_endpoints() {
        let g = grid(
            "...
             .#.
             ...",
        );
        assert_eq!(
            find_path(&g, Coord::new(0, 0), Coord::new(3, 0)),
            Err(PathError::OutOfBounds {
                coord: Coord::new(3, 0),
                rows: 3,
                cols: 3
            })
        );
        assert_eq!(
            find_path(&g, Coord::new(1, 1), Coord::new(0, 0)),
            Err(PathError::Blocked(Coord::new(1, 1)))
        );
    }

    #[test]
    fn equal_length_ties_prefer_lower_coordinates() {
        let g = Grid::filled(2, 2, Cell::Open);
        let path = find_path(&g, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        assert_eq!(path.steps(), 2);
        assert_eq!(path.as_slice()[1], Coord::new(0, 1));
    }

    #[test]
    fn missing_predecessor_means_no_path() {
        let came_from = HashMap::new();
        assert!(reconstruct(&came_from, Coord::new(0, 0), Coord::new(0, 1)).is_empty());
    }
}
