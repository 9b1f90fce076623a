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

//! Cell storage for a square board.

use std::ops::{Index, IndexMut};

use crate::coordinate::Coordinate;

/// What is known about a single cell of the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CellState {
    /// Open water that has not been shot.
    Empty,
    /// A living part of a vessel.
    Ship,
    /// A shot that hit nothing.
    Missed,
    /// A vessel part that has been shot, whether or not the vessel sank.
    Hit,
    /// Water next to a sunk vessel. No vessel can be there.
    Contoured,
}

impl CellState {
    /// The state as seen by the other player: living vessel parts look like open water.
    pub fn concealed(self) -> Self {
        match self {
            CellState::Ship => CellState::Empty,
            other => other,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        CellState::Empty
    }
}

/// Row-major square grid of cell states.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    /// Length of a side.
    size: usize,
    /// Cells that make up this board.
    cells: Box<[CellState]>,
}

impl Grid {
    pub(super) fn new(size: usize) -> Self {
        let cells = (0..size * size).map(|_| Default::default()).collect();
        Self { size, cells }
    }

    pub(super) fn size(&self) -> usize {
        self.size
    }

    /// Convert a coordinate to its index in `cells`, if it is on the grid.
    fn try_linearize(&self, coord: Coordinate) -> Option<usize> {
        let (row, col): (usize, usize) = coord.into();
        if row <= self.size && col <= self.size {
            Some((row - 1) * self.size + (col - 1))
        } else {
            None
        }
    }

    /// Get the state of the cell at the given [`Coordinate`].
    pub(super) fn get(&self, coord: Coordinate) -> Option<CellState> {
        self.try_linearize(coord).map(|i| self.cells[i])
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut(&mut self, coord: Coordinate) -> Option<&mut CellState> {
        self.try_linearize(coord)
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Iterate the rows of the grid, top to bottom.
    pub(super) fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.size)
    }
}

impl Index<Coordinate> for Grid {
    type Output = CellState;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        match self.try_linearize(coord) {
            Some(i) => &self.cells[i],
            None => panic!("coordinate {} out of bounds", coord),
        }
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        match self.get_mut(coord) {
            Some(cell) => cell,
            None => panic!("coordinate {} out of bounds", coord),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_row_major() {
        let mut grid = Grid::new(3);
        let coord = Coordinate::new(2, 3).unwrap();
        grid[coord] = CellState::Ship;
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][2], CellState::Ship);
        assert_eq!(grid.get(coord), Some(CellState::Ship));
        assert_eq!(grid.get(Coordinate::new(4, 1).unwrap()), None);
        assert_eq!(CellState::Ship.concealed(), CellState::Empty);
        assert_eq!(CellState::Hit.concealed(), CellState::Hit);
    }
}
