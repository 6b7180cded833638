//! Maze generation and shortest-path search on wall/open grids.

pub mod error;
pub mod game;
pub mod generator;
pub mod grid;
pub mod pathfinder;

pub use error::{MazeError, ParseGridError, PathError};
pub use game::Game;
pub use generator::{generate, generate_seeded};
pub use grid::{Cell, Coord, Dir, Grid};
pub use pathfinder::{find_path, Path};
