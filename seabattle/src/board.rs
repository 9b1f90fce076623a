// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Types that make up the game board.

use log::trace;

use crate::{
    coordinate::Coordinate,
    errors::{ErrorKind, Result, SeaBattleError},
    vessel::Vessel,
};

use self::grid::Grid;
pub use self::{fleet::Fleet, grid::CellState};

mod fleet;
mod grid;

/// Side length of the standard board.
pub const DEFAULT_SIZE: usize = 6;

/// Result of a shot at a vessel or a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShotOutcome {
    /// The shot did not hit anything.
    Missed,
    /// The shot hit a vessel that still has living parts.
    Hit,
    /// The shot hit the last living part of a vessel.
    Sunk,
}

impl ShotOutcome {
    /// Returns true for [`Hit`][ShotOutcome::Hit] and [`Sunk`][ShotOutcome::Sunk].
    pub fn is_hit(self) -> bool {
        self != ShotOutcome::Missed
    }
}

/// A single player's board: their vessels and their side of the ocean.
#[derive(Debug, Clone)]
pub struct Board {
    /// State of every cell, as the owner sees it.
    grid: Grid,

    /// Composition a complete board must have.
    fleet: Fleet,

    /// Placed vessels, in placement order.
    vessels: Vec<Vessel>,
}

impl Board {
    /// Create an empty board of the given size for the default fleet.
    pub fn new(size: usize) -> Self {
        Self::with_fleet(size, Fleet::default())
    }

    /// Create an empty board of the given size for a custom fleet. Panics if size is 0.
    pub fn with_fleet(size: usize, fleet: Fleet) -> Self {
        assert!(size > 0, "board size must be positive");
        Self {
            grid: Grid::new(size),
            fleet,
            vessels: Vec::new(),
        }
    }

    /// Length of a side of the board.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// The fleet this board is built for.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Vessels on this board, in the order they were placed.
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    /// Get the state of a cell. Returns None if the coordinate is out of bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.grid.get(coord)
    }

    /// Iterate the rows of the board, top to bottom. When `hidden` is set, living vessel
    /// parts are reported as [`CellState::Empty`].
    pub fn iter_board<'a>(
        &'a self,
        hidden: bool,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = CellState>> {
        self.grid.rows().map(move |row| {
            row.iter()
                .map(move |&cell| if hidden { cell.concealed() } else { cell })
        })
    }

    /// Returns true if either axis of `coord` is past the edge of the board.
    pub fn is_out_of_bounds(&self, coord: &Coordinate) -> bool {
        coord.row() > self.size() || coord.col() > self.size()
    }

    /// Add a vessel to the board. Fails if an identical vessel is already placed, the
    /// fleet has no room for a vessel of its size, it hangs over the edge, or it touches
    /// another vessel.
    pub fn place(&mut self, vessel: Vessel) -> Result<()> {
        if self.vessels.contains(&vessel) {
            return Err(SeaBattleError::new(
                ErrorKind::FleetRuleViolation,
                format!("{} is already on the board", vessel),
            ));
        }
        self.fleet
            .check_room(vessel.len(), self.vessels.iter().map(Vessel::len))?;
        if let Some(outside) = vessel.coords().find(|coord| self.is_out_of_bounds(coord)) {
            return Err(SeaBattleError::new(
                ErrorKind::OutOfBounds,
                format!(
                    "part {} of {} is outside the {}x{} board",
                    outside,
                    vessel,
                    self.size(),
                    self.size()
                ),
            ));
        }
        if let Some(neighbor) = self
            .vessels
            .iter()
            .find(|placed| !placed.compatible_with(&vessel))
        {
            return Err(SeaBattleError::new(
                ErrorKind::AdjacencyViolation,
                format!("{} touches {}", vessel, neighbor),
            ));
        }
        for coord in vessel.coords() {
            self.grid[coord] = CellState::Ship;
        }
        trace!("placed {}", vessel);
        self.vessels.push(vessel);
        Ok(())
    }

    /// Fire a shot at this board. The first vessel with a part at `coord` takes the shot;
    /// when it sinks, the water around it is marked [`CellState::Contoured`].
    pub fn resolve_shot(&mut self, coord: Coordinate) -> Result<ShotOutcome> {
        if self.is_out_of_bounds(&coord) {
            return Err(SeaBattleError::new(
                ErrorKind::OutOfBounds,
                format!(
                    "shot at {} is outside the {}x{} board",
                    coord,
                    self.size(),
                    self.size()
                ),
            ));
        }
        for i in 0..self.vessels.len() {
            let outcome = self.vessels[i].shoot(coord);
            if outcome.is_hit() {
                self.grid[coord] = CellState::Hit;
                if outcome == ShotOutcome::Sunk {
                    self.contour(i);
                }
                trace!("shot at {}: {:?}", coord, outcome);
                return Ok(outcome);
            }
        }
        self.grid[coord] = CellState::Missed;
        trace!("shot at {}: missed", coord);
        Ok(ShotOutcome::Missed)
    }

    /// Mark the water around the vessel at `index` as contoured.
    fn contour(&mut self, index: usize) {
        let vessel = &self.vessels[index];
        let grid = &mut self.grid;
        for part in vessel.coords() {
            for near in part.surroundings() {
                if vessel.contains(near) {
                    continue;
                }
                if let Some(cell) = grid.get_mut(near) {
                    *cell = CellState::Contoured;
                }
            }
        }
    }

    /// Returns true while any vessel on the board is afloat.
    pub fn has_living_vessels(&self) -> bool {
        self.vessels.iter().any(Vessel::is_alive)
    }

    /// Returns true if the placed vessels make up exactly the board's fleet.
    pub fn is_fleet_complete(&self) -> bool {
        self.fleet
            .is_satisfied_by(self.vessels.iter().map(Vessel::len))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col).unwrap()
    }

    fn vessel(parts: &[(usize, usize)]) -> Vessel {
        Vessel::from_coords(parts.iter().map(|&(row, col)| c(row, col))).unwrap()
    }

    /// The default fleet laid out along the left and right edges.
    fn full_board() -> Board {
        let mut board = Board::default();
        for parts in &[
            &[(1, 1), (1, 2), (1, 3)][..],
            &[(3, 1), (4, 1)],
            &[(1, 5), (2, 5)],
            &[(6, 1)],
            &[(4, 3)],
            &[(6, 6)],
            &[(4, 6)],
        ] {
            board.place(vessel(parts)).unwrap();
        }
        board
    }

    #[test]
    fn place_marks_ship_cells() {
        let mut board = Board::default();
        assert!(!board.is_fleet_complete());
        board.place(vessel(&[(2, 2), (2, 3)])).unwrap();
        assert_eq!(board.cell(c(2, 2)), Some(CellState::Ship));
        assert_eq!(board.cell(c(2, 3)), Some(CellState::Ship));
        assert_eq!(board.cell(c(2, 4)), Some(CellState::Empty));
        assert_eq!(board.vessels().len(), 1);
    }

    #[test]
    fn place_enforces_rules() {
        let mut board = Board::default();
        board.place(vessel(&[(1, 1), (1, 2), (1, 3)])).unwrap();

        let err = board.place(vessel(&[(1, 3), (1, 2), (1, 1)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FleetRuleViolation);

        let err = board.place(vessel(&[(3, 1), (3, 2), (3, 3)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FleetRuleViolation);

        let err = board
            .place(vessel(&[(3, 1), (3, 2), (3, 3), (3, 4)]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FleetRuleViolation);

        let err = board.place(vessel(&[(6, 6), (6, 7)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);

        let err = board.place(vessel(&[(2, 4)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AdjacencyViolation);
        assert!(err.rule().contains("vessel [2,4]"));

        assert_eq!(board.vessels().len(), 1);
        assert_eq!(board.cell(c(2, 4)), Some(CellState::Empty));
    }

    #[test]
    fn complete_fleet() {
        let mut board = full_board();
        assert!(board.is_fleet_complete());
        let err = board.place(vessel(&[(3, 3)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FleetRuleViolation);
    }

    #[test]
    fn bounds() {
        let board = Board::default();
        assert!(!board.is_out_of_bounds(&c(6, 6)));
        assert!(board.is_out_of_bounds(&c(7, 1)));
        assert!(board.is_out_of_bounds(&c(1, 7)));
        assert_eq!(board.cell(c(7, 7)), None);
    }

    #[test]
    fn sinking_contours_surroundings() {
        let mut board = Board::default();
        board.place(vessel(&[(1, 1), (1, 2)])).unwrap();
        board.place(vessel(&[(5, 5)])).unwrap();
        assert_eq!(board.resolve_shot(c(2, 3)).unwrap(), ShotOutcome::Missed);
        assert_eq!(board.cell(c(2, 3)), Some(CellState::Missed));

        assert_eq!(board.resolve_shot(c(1, 1)).unwrap(), ShotOutcome::Hit);
        assert_eq!(board.cell(c(1, 1)), Some(CellState::Hit));
        assert_eq!(board.cell(c(1, 3)), Some(CellState::Empty));

        assert_eq!(board.resolve_shot(c(1, 2)).unwrap(), ShotOutcome::Sunk);
        for &(row, col) in &[(1, 3), (2, 1), (2, 2), (2, 3)] {
            assert_eq!(board.cell(c(row, col)), Some(CellState::Contoured));
        }
        assert_eq!(board.cell(c(1, 1)), Some(CellState::Hit));
        assert_eq!(board.cell(c(1, 2)), Some(CellState::Hit));
        assert_eq!(board.cell(c(1, 4)), Some(CellState::Empty));
        assert!(board.has_living_vessels());

        assert_eq!(board.resolve_shot(c(5, 5)).unwrap(), ShotOutcome::Sunk);
        assert!(!board.has_living_vessels());
    }

    #[test]
    fn repeated_shots_are_deterministic() {
        let mut board = Board::default();
        board.place(vessel(&[(3, 3), (4, 3)])).unwrap();
        assert_eq!(board.resolve_shot(c(3, 3)).unwrap(), ShotOutcome::Hit);
        assert_eq!(board.resolve_shot(c(3, 3)).unwrap(), ShotOutcome::Hit);
        assert!(board.has_living_vessels());
        assert_eq!(board.resolve_shot(c(4, 3)).unwrap(), ShotOutcome::Sunk);
        assert_eq!(board.resolve_shot(c(4, 3)).unwrap(), ShotOutcome::Sunk);
        assert_eq!(board.resolve_shot(c(1, 1)).unwrap(), ShotOutcome::Missed);
        assert_eq!(board.resolve_shot(c(1, 1)).unwrap(), ShotOutcome::Missed);
    }

    #[test]
    fn shot_out_of_bounds() {
        let mut board = full_board();
        let err = board.resolve_shot(c(7, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn hidden_rows_conceal_ships() {
        let mut board = full_board();
        board.resolve_shot(c(6, 6)).unwrap();
        let shown: Vec<Vec<_>> = board.iter_board(false).map(|row| row.collect()).collect();
        assert_eq!(shown.len(), 6);
        assert_eq!(shown[0][0], CellState::Ship);
        assert_eq!(shown[5][5], CellState::Hit);
        assert_eq!(shown[4][4], CellState::Contoured);

        let hidden: Vec<Vec<_>> = board.iter_board(true).map(|row| row.collect()).collect();
        assert!(hidden.iter().flatten().all(|&cell| cell != CellState::Ship));
        assert_eq!(hidden[0][0], CellState::Empty);
        assert_eq!(hidden[5][5], CellState::Hit);
    }
}
