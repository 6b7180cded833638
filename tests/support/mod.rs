//! Helpers shared by the integration tests.

use maze_game::{Coord, Grid};
use std::collections::{HashMap, VecDeque};

/// Breadth-first hop distance from `start` to every reachable open cell.
pub fn bfs_distances(grid: &Grid, start: Coord) -> HashMap<Coord, usize> {
    let mut dist = HashMap::new();
    let mut q = VecDeque::new();
    dist.insert(start, 0);
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        let base = dist[&pos];
        for next in grid.open_neighbors(pos) {
            if !dist.contains_key(&next) {
                dist.insert(next, base + 1);
                q.push_back(next);
            }
        }
    }
    dist
}

/// Every cell open, consecutive cells adjacent, endpoints as requested.
pub fn assert_valid_path(grid: &Grid, cells: &[Coord], start: Coord, goal: Coord) {
    assert_eq!(cells.first(), Some(&start));
    assert_eq!(cells.last(), Some(&goal));
    for cell in cells {
        assert!(grid.is_open(*cell), "{} on path is not open", cell);
    }
    for pair in cells.windows(2) {
        assert!(
            pair[0].is_adjacent(pair[1]),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
}
