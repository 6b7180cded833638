//! Randomized depth-first maze carving with braid augmentation.
//!
//! Carving runs on the odd "lattice" cells: each step jumps two cells and opens
//! the wall between, so every opened cell joins the region grown from the
//! entrance. Afterwards `rows * cols / 20` random interior probes knock out
//! walls to create loops, and the entrance and exit are forced open.

use crate::error::MazeError;
use crate::grid::{Cell, Coord, Grid};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Smallest accepted side length; anything smaller has no interior.
pub const MIN_SIDE: usize = 3;

/// One braid probe per this many cells.
const CELLS_PER_OPENING: usize = 20;

/// Step-2 carving moves as `(row, col)` displacements.
const CARVE_STEPS: [(isize, isize); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];

/// Carves a maze from `rng`. Identical RNG state and dimensions give an
/// identical grid.
pub fn generate(rows: usize, cols: usize, rng: &mut impl Rng) -> Result<Grid, MazeError> {
    if rows < MIN_SIDE || cols < MIN_SIDE {
        return Err(MazeError::InvalidDimensions { rows, cols });
    }

    let mut grid = Grid::filled(rows, cols, Cell::Wall);
    let entrance = grid.entrance();
    let exit = grid.exit();

    let carved = carve_passages(&mut grid, entrance, rng);
    let opened = braid(&mut grid, rng);

    grid.set(entrance, Cell::Open);
    grid.set(exit, Cell::Open);
    link_exit_to_lattice(&mut grid, exit);

    debug!(
        "generated {}x{} maze: {} lattice cells carved, {} braid openings, {} open cells",
        rows,
        cols,
        carved,
        opened,
        grid.open_count()
    );
    Ok(grid)
}

/// `generate` driven by a `StdRng` seeded from `seed`.
pub fn generate_seeded(rows: usize, cols: usize, seed: u64) -> Result<Grid, MazeError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(rows, cols, &mut rng)
}

/// Backtracking carve with an explicit stack. Returns the number of lattice
/// cells opened, the start included.
fn carve_passages(grid: &mut Grid, start: Coord, rng: &mut impl Rng) -> usize {
    let mut steps = CARVE_STEPS;
    let mut stack = vec![start];
    let mut carved = 1;
    grid.set(start, Cell::Open);

    while let Some(&current) = stack.last() {
        steps.shuffle(rng);
        match steps
            .iter()
            .find_map(|&step| carve_target(grid, current, step).map(|target| (step, target)))
        {
            Some(((dr, dc), target)) => {
                let between = Coord::new(
                    current.row.wrapping_add_signed(dr / 2),
                    current.col.wrapping_add_signed(dc / 2),
                );
                grid.set(between, Cell::Open);
                grid.set(target, Cell::Open);
                trace!("carved {} -> {}", current, target);
                stack.push(target);
                carved += 1;
            }
            None => {
                stack.pop();
            }
        }
    }
    carved
}

/// The cell two steps away if it is strictly inside the border and still a wall.
fn carve_target(grid: &Grid, from: Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
    let row = from.row.checked_add_signed(dr)?;
    let col = from.col.checked_add_signed(dc)?;
    let target = Coord::new(row, col);
    let interior = row > 0 && col > 0 && row + 1 < grid.rows() && col + 1 < grid.cols();
    (interior && grid.get(target) == Some(Cell::Wall)).then_some(target)
}

/// Random interior probes that open walls. A probe may leave an isolated open
/// pocket; that is accepted. Returns the number of walls opened.
fn braid(grid: &mut Grid, rng: &mut impl Rng) -> usize {
    let mut opened = 0;
    for _ in 0..probe_count(grid.rows(), grid.cols()) {
        let probe = Coord::new(
            rng.gen_range(1..=grid.rows() - 2),
            rng.gen_range(1..=grid.cols() - 2),
        );
        if grid.get(probe) == Some(Cell::Wall) {
            grid.set(probe, Cell::Open);
            opened += 1;
        }
    }
    opened
}

fn probe_count(rows: usize, cols: usize) -> usize {
    rows * cols / CELLS_PER_OPENING
}

/// With an even side length the exit sits off the odd lattice the carve walks.
/// Open the cells stepping back to the nearest lattice cell, which the carve
/// always reaches. No-op for odd dimensions.
fn link_exit_to_lattice(grid: &mut Grid, exit: Coord) {
    let lattice = Coord::new(to_lattice(exit.row), to_lattice(exit.col));
    if lattice == exit {
        return;
    }
    let corner = Coord::new(lattice.row, exit.col);
    for cell in [corner, lattice] {
        if grid.get(cell) == Some(Cell::Wall) {
            trace!("linking exit {} through {}", exit, cell);
            grid.set(cell, Cell::Open);
        }
    }
}

fn to_lattice(n: usize) -> usize {
    if n % 2 == 1 {
        n
    } else {
        n - 1
    }
}
