//! Headless play session: a player walking a generated maze toward the exit,
//! with an optional route hint.

use crate::error::PathError;
use crate::grid::{Coord, Dir, Grid};
use crate::pathfinder::{find_path, Path};
use log::debug;

pub struct Game {
    grid: Grid,
    player: Coord,
    goal: Coord,
    hint: Option<Path>,
    moves: u32,
}

impl Game {
    /// Player at the entrance, goal at the exit.
    pub fn new(grid: Grid) -> Self {
        let player = grid.entrance();
        let goal = grid.exit();
        Self {
            grid,
            player,
            goal,
            hint: None,
            moves: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Coord {
        self.player
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn hint(&self) -> Option<&Path> {
        self.hint.as_ref()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.player == self.goal
    }

    /// Moves one cell if the target is open. A successful move hides the hint.
    pub fn try_move(&mut self, dir: Dir) -> bool {
        if self.is_won() {
            return false;
        }
        match self.grid.step(self.player, dir) {
            Some(next) if self.grid.is_open(next) => {
                self.player = next;
                self.moves = self.moves.saturating_add(1);
                self.hint = None;
                if self.is_won() {
                    debug!("goal {} reached in {} moves", self.goal, self.moves);
                }
                true
            }
            _ => false,
        }
    }

    /// Shows a shortest route from the player to the goal, or hides the one shown.
    pub fn toggle_hint(&mut self) -> Result<(), PathError> {
        if self.hint.take().is_none() {
            self.hint = Some(find_path(&self.grid, self.player, self.goal)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Game {
        Game::new(
            "#####
             #...#
             #.#.#
             #...#
             #####"
                .parse()
                .unwrap(),
        )
    }

    #[test]
    fn starts_at_entrance() {
        let game = corridor();
        assert_eq!(game.player(), Coord::new(1, 1));
        assert_eq!(game.goal(), Coord::new(3, 3));
        assert!(game.hint().is_none());
        assert!(!game.is_won());
    }

    #[test]
    fn walls_block_moves() {
        let mut game = corridor();
        assert!(!game.try_move(Dir::Up));
        assert!(!game.try_move(Dir::Left));
        assert_eq!(game.player(), Coord::new(1, 1));
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn reaching_goal_wins_and_freezes() {
        let mut game = corridor();
        for dir in [Dir::Right, Dir::Right, Dir::Down, Dir::Down] {
            assert!(game.try_move(dir));
        }
        assert!(game.is_won());
        assert_eq!(game.moves(), 4);
        assert!(!game.try_move(Dir::Up));
    }

    #[test]
    fn move_counter_saturates() {
        let mut game = corridor();
        game.moves = u32::MAX;
        assert!(game.try_move(Dir::Right));
        assert_eq!(game.moves(), u32::MAX);
    }

    #[test]
    fn hint_toggles_and_clears_on_move() {
        let mut game = corridor();
        game.toggle_hint().unwrap();
        let hint = game.hint().unwrap();
        assert_eq!(hint.start(), Some(Coord::new(1, 1)));
        assert_eq!(hint.goal(), Some(Coord::new(3, 3)));
        assert_eq!(hint.steps(), 4);

        game.toggle_hint().unwrap();
        assert!(game.hint().is_none());

        game.toggle_hint().unwrap();
        assert!(game.try_move(Dir::Down));
        assert!(game.hint().is_none());
    }
}
