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

//! Grid coordinates and the axes a vessel can extend along.
use std::{convert::TryFrom, fmt, str::FromStr};

use enumflags2::BitFlags;

use crate::errors::{ErrorKind, Result, SeaBattleError};

/// Axis along which a run of cells extends.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Axis {
    /// Cells share a row, stepping changes the column.
    Horizontal = 0b01,
    /// Cells share a column, stepping changes the row.
    Vertical = 0b10,
}

impl Axis {
    /// Both axes, in the order placement variants are enumerated.
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        })
    }
}

/// Orthogonal steps in row-major order of the cell they lead to.
static NEIGHBOR_STEPS: [(Axis, isize); 4] = [
    (Axis::Vertical, -1),
    (Axis::Horizontal, -1),
    (Axis::Horizontal, 1),
    (Axis::Vertical, 1),
];

/// A 1-based position on the board. Rows and columns start at 1; the upper bound is
/// checked by the [`Board`][crate::Board] the coordinate is used with.
///
/// Coordinates order row-major, so sets of them iterate the board row by row.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`], failing if either axis is zero.
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row == 0 || col == 0 {
            Err(SeaBattleError::new(
                ErrorKind::InvalidCoordinate,
                format!(
                    "coordinates must be greater than zero, got ({}, {})",
                    row, col
                ),
            ))
        } else {
            Ok(Self { row, col })
        }
    }

    /// Iterate every coordinate of a `size`x`size` board, row by row.
    pub fn square(size: usize) -> impl Iterator<Item = Coordinate> {
        (1..=size).flat_map(move |row| (1..=size).map(move |col| Coordinate { row, col }))
    }

    /// Row of this coordinate, starting from 1.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column of this coordinate, starting from 1.
    pub fn col(self) -> usize {
        self.col
    }

    /// Move `distance` cells along `axis`. Returns `None` if the result would have an axis
    /// below 1.
    pub fn step(self, axis: Axis, distance: isize) -> Option<Coordinate> {
        let (row, col) = match axis {
            Axis::Horizontal => (self.row, offset(self.col, distance)?),
            Axis::Vertical => (offset(self.row, distance)?, self.col),
        };
        Coordinate::new(row, col).ok()
    }

    /// Iterate the orthogonal neighbors of this coordinate along the given axes, in
    /// row-major order. Neighbors that would fall below row or column 1 are skipped.
    pub fn neighbors<B: Into<BitFlags<Axis>>>(self, axes: B) -> impl Iterator<Item = Coordinate> {
        let axes = axes.into();
        NEIGHBOR_STEPS
            .iter()
            .filter(move |(axis, _)| axes.contains(*axis))
            .filter_map(move |&(axis, distance)| self.step(axis, distance))
    }

    /// Iterate every coordinate within Chebyshev distance 1 of this one, this one
    /// included.
    pub fn surroundings(self) -> impl Iterator<Item = Coordinate> {
        (-1..=1).flat_map(move |drow| {
            (-1..=1).filter_map(move |dcol| {
                let row = offset(self.row, drow)?;
                let col = offset(self.col, dcol)?;
                Coordinate::new(row, col).ok()
            })
        })
    }

    /// Returns true if `other` is this coordinate or one of its eight surrounding cells.
    pub fn touches(self, other: Coordinate) -> bool {
        abs_diff(self.row, other.row) <= 1 && abs_diff(self.col, other.col) <= 1
    }

    /// If `other` is an orthogonal neighbor of this coordinate, get the axis that joins
    /// them.
    pub fn axis_to(self, other: Coordinate) -> Option<Axis> {
        match (abs_diff(self.row, other.row), abs_diff(self.col, other.col)) {
            (0, 1) => Some(Axis::Horizontal),
            (1, 0) => Some(Axis::Vertical),
            _ => None,
        }
    }
}

fn offset(value: usize, distance: isize) -> Option<usize> {
    if distance < 0 {
        value.checked_sub(distance.wrapping_neg() as usize)
    } else {
        value.checked_add(distance as usize)
    }
}

fn abs_diff(a: usize, b: usize) -> usize {
    if a > b {
        a - b
    } else {
        b - a
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl TryFrom<(i64, i64)> for Coordinate {
    type Error = SeaBattleError;

    /// Validate a signed `(row, col)` pair.
    fn try_from((row, col): (i64, i64)) -> Result<Self> {
        let positive = |v: i64| if v > 0 { usize::try_from(v).ok() } else { None };
        match (positive(row), positive(col)) {
            (Some(row), Some(col)) => Ok(Coordinate { row, col }),
            _ => Err(SeaBattleError::new(
                ErrorKind::InvalidCoordinate,
                format!(
                    "coordinates must be greater than zero, got ({}, {})",
                    row, col
                ),
            )),
        }
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}

impl FromStr for Coordinate {
    type Err = SeaBattleError;

    /// Parse `row,col` or `row col`.
    fn from_str(s: &str) -> Result<Self> {
        let mut axes = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        match (axes.next(), axes.next(), axes.next()) {
            (Some(row), Some(col), None) => {
                let parse = |v: &str| {
                    v.parse::<i64>().map_err(|_| {
                        SeaBattleError::new(
                            ErrorKind::InvalidCoordinate,
                            format!("coordinates must be integers, got {:?}", v),
                        )
                    })
                };
                Coordinate::try_from((parse(row)?, parse(col)?))
            }
            _ => Err(SeaBattleError::new(
                ErrorKind::InvalidCoordinate,
                format!("expected a row and a column like \"2,3\", got {:?}", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col).unwrap()
    }

    #[test]
    fn rejects_zero_axes() {
        assert_eq!(
            Coordinate::new(0, 3).unwrap_err().kind(),
            ErrorKind::InvalidCoordinate
        );
        assert_eq!(
            Coordinate::new(3, 0).unwrap_err().kind(),
            ErrorKind::InvalidCoordinate
        );
        assert_eq!(c(3, 4), Coordinate::try_from((3, 4)).unwrap());
        assert!(Coordinate::try_from((-1, 4)).is_err());
    }

    #[test]
    fn parses_text() {
        assert_eq!("2,5".parse::<Coordinate>().unwrap(), c(2, 5));
        assert_eq!(" 2 5 ".parse::<Coordinate>().unwrap(), c(2, 5));
        for bad in &["", "2", "a,b", "2,5,1", "0,1", "-2,3", "1.5,2"] {
            let err = bad.parse::<Coordinate>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCoordinate, "input {:?}", bad);
        }
    }

    #[test]
    fn neighbors_skip_the_edge() {
        let all: Vec<_> = c(3, 3).neighbors(BitFlags::<Axis>::all()).collect();
        assert_eq!(all, vec![c(2, 3), c(3, 2), c(3, 4), c(4, 3)]);

        let corner: Vec<_> = c(1, 1).neighbors(BitFlags::<Axis>::all()).collect();
        assert_eq!(corner, vec![c(1, 2), c(2, 1)]);

        let horizontal: Vec<_> = c(2, 2).neighbors(Axis::Horizontal).collect();
        assert_eq!(horizontal, vec![c(2, 1), c(2, 3)]);
    }

    #[test]
    fn surroundings_include_diagonals() {
        assert_eq!(c(3, 3).surroundings().count(), 9);
        let corner: Vec<_> = c(1, 1).surroundings().collect();
        assert_eq!(corner, vec![c(1, 1), c(1, 2), c(2, 1), c(2, 2)]);
        assert!(c(1, 2).touches(c(2, 3)));
        assert!(!c(1, 2).touches(c(3, 2)));
    }

    #[test]
    fn axis_between_neighbors() {
        assert_eq!(c(1, 1).axis_to(c(1, 2)), Some(Axis::Horizontal));
        assert_eq!(c(2, 1).axis_to(c(1, 1)), Some(Axis::Vertical));
        assert_eq!(c(1, 1).axis_to(c(2, 2)), None);
        assert_eq!(c(1, 1).axis_to(c(1, 1)), None);
        assert_eq!(c(1, 1).step(Axis::Vertical, -1), None);
        assert_eq!(c(1, 1).step(Axis::Horizontal, 2), Some(c(1, 3)));
    }

    #[test]
    fn square_is_row_major() {
        let coords: Vec<_> = Coordinate::square(2).collect();
        assert_eq!(coords, vec![c(1, 1), c(1, 2), c(2, 1), c(2, 2)]);
    }
}
