//! Occupancy grid shared by the generator, the path search and the front end.

use crate::error::ParseGridError;
use std::fmt;
use std::str::FromStr;

const WALL_CHAR: char = '#';
const OPEN_CHAR: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
}

/// Zero-based `(row, col)` position. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Neighbor one cell away, or `None` when it would leave the non-negative quadrant.
    pub fn step(self, dir: Dir) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        Some(Coord {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// `(row, col)` displacement.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// Rectangular wall/open layout. Dimensions are fixed at construction and the
/// layout can only be changed inside this crate, so callers treat it as a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn filled(rows: usize, cols: usize, cell: Cell) -> Self {
        Self {
            rows,
            cols,
            cells: vec![cell; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if self.contains(coord) {
            Some(self.cells[self.index(coord)])
        } else {
            None
        }
    }

    pub fn is_open(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Cell::Open)
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = self.index(coord);
        self.cells[idx] = cell;
    }

    /// In-bounds neighbor in `dir`.
    pub fn step(&self, coord: Coord, dir: Dir) -> Option<Coord> {
        coord.step(dir).filter(|next| self.contains(*next))
    }

    /// Open 4-neighbors of `coord`, in `Dir::ALL` order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Dir::ALL
            .into_iter()
            .filter_map(move |dir| self.step(coord, dir))
            .filter(move |next| self.is_open(*next))
    }

    /// Canonical start cell of a generated maze.
    pub fn entrance(&self) -> Coord {
        Coord::new(1, 1)
    }

    /// Canonical goal cell of a generated maze.
    pub fn exit(&self) -> Coord {
        Coord::new(self.rows.saturating_sub(2), self.cols.saturating_sub(2))
    }

    pub fn is_border(&self, coord: Coord) -> bool {
        coord.row == 0 || coord.col == 0 || coord.row + 1 == self.rows || coord.col + 1 == self.cols
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (Coord::new(idx / self.cols, idx % self.cols), *cell))
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Open).count()
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                let ch = match cell {
                    Cell::Wall => WALL_CHAR,
                    Cell::Open => OPEN_CHAR,
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses `#` (wall) and `.` (open) rows. Blank lines and surrounding
    /// whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let cols = match lines.first() {
            Some(first) => first.chars().count(),
            None => return Err(ParseGridError::Empty),
        };

        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ParseGridError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    WALL_CHAR => Cell::Wall,
                    OPEN_CHAR => Cell::Open,
                    _ => return Err(ParseGridError::UnknownCell { ch, row, col }),
                };
                cells.push(cell);
            }
        }

        Ok(Grid {
            rows: lines.len(),
            cols,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() {
        let text = "#####\n#..##\n#####\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert!(grid.is_open(Coord::new(1, 1)));
        assert!(!grid.is_open(Coord::new(1, 3)));
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("".parse::<Grid>(), Err(ParseGridError::Empty));
        assert_eq!(
            "###\n##\n".parse::<Grid>(),
            Err(ParseGridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "#x#".parse::<Grid>(),
            Err(ParseGridError::UnknownCell {
                ch: 'x',
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn out_of_bounds_is_not_open() {
        let grid = Grid::filled(3, 3, Cell::Open);
        assert_eq!(grid.get(Coord::new(3, 0)), None);
        assert!(!grid.is_open(Coord::new(0, 3)));
        assert_eq!(grid.step(Coord::new(0, 0), Dir::Up), None);
        assert_eq!(grid.step(Coord::new(2, 2), Dir::Right), None);
        assert_eq!(grid.step(Coord::new(1, 1), Dir::Left), Some(Coord::new(1, 0)));
    }

    #[test]
    fn open_neighbors_skip_walls() {
        let grid: Grid = "\
            #.#
            ...
            ###"
        .parse()
        .unwrap();
        let neighbors: Vec<Coord> = grid.open_neighbors(Coord::new(1, 1)).collect();
        assert_eq!(
            neighbors,
            vec![Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 2)]
        );
    }

    #[test]
    fn entrance_exit_and_border() {
        let grid = Grid::filled(7, 9, Cell::Wall);
        assert_eq!(grid.entrance(), Coord::new(1, 1));
        assert_eq!(grid.exit(), Coord::new(5, 7));
        assert!(grid.is_border(Coord::new(0, 4)));
        assert!(grid.is_border(Coord::new(3, 8)));
        assert!(!grid.is_border(Coord::new(5, 7)));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::filled(2, 3, Cell::Wall);
        let coords: Vec<Coord> = grid.iter().map(|(c, _)| c).collect();
        assert_eq!(coords[3], Coord::new(1, 0));
        assert_eq!(coords.len(), 6);
    }
}
