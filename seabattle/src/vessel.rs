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

//! Vessels: straight, contiguous runs of parts that can be hit and sunk.
use std::{collections::BTreeSet, fmt};

use enumflags2::BitFlags;

use crate::{
    board::ShotOutcome,
    coordinate::{Axis, Coordinate},
    errors::{ErrorKind, Result, SeaBattleError},
};

/// Orientation of a vessel. Fixed when the second part is added.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Orientation {
    /// The vessel has a single part, so it may still grow along either axis.
    Undetermined,
    /// The vessel extends along the given axis.
    Fixed(Axis),
}

impl Orientation {
    /// Axes along which a new part may attach.
    pub fn axes(self) -> BitFlags<Axis> {
        match self {
            Orientation::Undetermined => BitFlags::all(),
            Orientation::Fixed(axis) => axis.into(),
        }
    }
}

/// A single cell of a vessel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Part {
    coord: Coordinate,
    alive: bool,
}

impl Part {
    /// Position of this part.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Whether this part has not been shot yet.
    pub fn alive(&self) -> bool {
        self.alive
    }
}

/// A ship made of one or more parts in a straight line. Never empty.
///
/// Equality ignores the order in which parts were added: two vessels are equal if they
/// cover the same cells.
#[derive(Debug, Clone)]
pub struct Vessel {
    parts: Vec<Part>,
    orientation: Orientation,
}

impl Vessel {
    /// Start a vessel from its first part.
    pub fn new(first: Coordinate) -> Self {
        Self {
            parts: vec![Part {
                coord: first,
                alive: true,
            }],
            orientation: Orientation::Undetermined,
        }
    }

    /// Build a vessel by adding the given parts in order. Fails if there are no parts or
    /// if any part does not extend the vessel.
    pub fn from_coords<I: IntoIterator<Item = Coordinate>>(coords: I) -> Result<Self> {
        let mut coords = coords.into_iter();
        let first = coords.next().ok_or_else(|| {
            SeaBattleError::new(
                ErrorKind::InvalidVesselPlacement,
                "a vessel needs at least one part",
            )
        })?;
        let mut vessel = Self::new(first);
        for coord in coords {
            vessel.add_part(coord)?;
        }
        Ok(vessel)
    }

    /// Add a part to the vessel. The part must be an orthogonal neighbor of an existing
    /// part, along the vessel's axis once that is known.
    pub fn add_part(&mut self, coord: Coordinate) -> Result<()> {
        if self.contains(coord) {
            return Err(SeaBattleError::new(
                ErrorKind::InvalidVesselPlacement,
                format!("part {} is already on the vessel", coord),
            ));
        }
        let axes = self.orientation.axes();
        let axis = self
            .coords()
            .filter_map(|existing| existing.axis_to(coord))
            .find(|axis| axes.contains(*axis));
        match axis {
            Some(axis) => {
                self.orientation = Orientation::Fixed(axis);
                self.parts.push(Part { coord, alive: true });
                Ok(())
            }
            None => Err(SeaBattleError::new(
                ErrorKind::InvalidVesselPlacement,
                match self.orientation {
                    Orientation::Undetermined => format!(
                        "part {} is not next to the vessel's part {}",
                        coord, self.parts[0].coord
                    ),
                    Orientation::Fixed(axis) => format!(
                        "part {} does not continue the {} line of {}",
                        coord, axis, self
                    ),
                },
            )),
        }
    }

    /// Fire at the given coordinate. Marks the matching part dead and reports whether the
    /// vessel is still afloat.
    pub fn shoot(&mut self, coord: Coordinate) -> ShotOutcome {
        match self.parts.iter_mut().find(|part| part.coord == coord) {
            None => ShotOutcome::Missed,
            Some(part) => {
                part.alive = false;
                if self.is_alive() {
                    ShotOutcome::Hit
                } else {
                    ShotOutcome::Sunk
                }
            }
        }
    }

    /// Returns true while any part is alive.
    pub fn is_alive(&self) -> bool {
        self.parts.iter().any(|part| part.alive)
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Parts in the order they were added.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Coordinates of the parts in the order they were added.
    pub fn coords<'a>(&'a self) -> impl 'a + Iterator<Item = Coordinate> {
        self.parts.iter().map(|part| part.coord)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns true if one of the parts is at `coord`.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.coords().any(|part| part == coord)
    }

    /// Lowest and highest part in row-major order. Once the orientation is fixed these
    /// are the two ends of the vessel.
    pub fn ends(&self) -> (Coordinate, Coordinate) {
        let first = self.parts[0].coord;
        self.coords()
            .fold((first, first), |(low, high), coord| (low.min(coord), high.max(coord)))
    }

    /// Returns true if no part of this vessel touches a part of `other`, diagonals
    /// included.
    pub fn compatible_with(&self, other: &Vessel) -> bool {
        !self
            .coords()
            .any(|part| other.coords().any(|theirs| part.touches(theirs)))
    }

    /// Remove from `pool` every coordinate touching any part of this vessel, dead or
    /// alive.
    pub fn surrounding_coordinates_excluded_from(&self, pool: &mut BTreeSet<Coordinate>) {
        for part in self.coords() {
            for near in part.surroundings() {
                pool.remove(&near);
            }
        }
    }
}

impl PartialEq for Vessel {
    fn eq(&self, other: &Self) -> bool {
        // Parts are unique, so equal length plus containment is set equality.
        self.len() == other.len() && self.coords().all(|coord| other.contains(coord))
    }
}

impl Eq for Vessel {}

impl fmt::Display for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("vessel [")?;
        for (i, coord) in self.coords().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", coord)?;
        }
        f.write_str("]")
    }
}
