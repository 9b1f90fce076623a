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

//! Random generation of complete boards.

use std::collections::BTreeSet;

use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};

use crate::{
    board::{Board, Fleet, DEFAULT_SIZE},
    coordinate::{Axis, Coordinate},
    errors::{ErrorKind, Result, SeaBattleError},
    vessel::Vessel,
};

/// Number of attempts [`BoardGenerator::default`] makes before giving up.
pub const DEFAULT_MAX_TRIES: usize = 1000;

/// Builds random boards holding a complete fleet.
///
/// Vessels are placed largest first. Each one is chosen uniformly among the runs of free
/// cells that fit it; the cells around it are then taken out of consideration for the
/// rest of the fleet. If some vessel has nowhere to go, the whole board is discarded and
/// generation starts over, up to `max_tries` times.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    size: usize,
    fleet: Fleet,
    max_tries: usize,
}

impl BoardGenerator {
    /// Create a generator for boards of the given size and fleet.
    pub fn new(size: usize, fleet: Fleet) -> Self {
        Self {
            size,
            fleet,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    /// Set how many boards may be discarded before generation fails. Panics if 0.
    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        assert!(max_tries > 0, "at least one attempt is required");
        self.max_tries = max_tries;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn max_tries(&self) -> usize {
        self.max_tries
    }

    /// Generate a complete board. Fails with [`ErrorKind::GenerationExhausted`] if every
    /// attempt dead-ends.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Board> {
        for attempt in 1..=self.max_tries {
            match self.try_generate(rng) {
                Ok(board) => {
                    debug!("generated a board after {} attempt(s)", attempt);
                    return Ok(board);
                }
                Err(err) => trace!("attempt {} failed: {}", attempt, err),
            }
        }
        Err(SeaBattleError::new(
            ErrorKind::GenerationExhausted,
            format!("no valid board after {} attempts", self.max_tries),
        ))
    }

    /// Make a single attempt at filling a board.
    fn try_generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Board> {
        let mut board = Board::with_fleet(self.size, self.fleet.clone());
        let mut available: BTreeSet<_> = Coordinate::square(self.size).collect();
        for size in self.fleet.sizes() {
            let variants = placement_variants(&board, &available, size);
            let chosen = variants.choose(rng).ok_or_else(|| {
                SeaBattleError::new(
                    ErrorKind::GenerationExhausted,
                    format!("no room left for a vessel of size {}", size),
                )
            })?;
            let vessel = Vessel::from_coords(chosen.iter().copied())?;
            vessel.surrounding_coordinates_excluded_from(&mut available);
            board.place(vessel)?;
        }
        Ok(board)
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, Fleet::default())
    }
}

/// List every straight run of `size` cells that starts on an available coordinate and
/// stays on available, in-bounds coordinates of `board`. Runs are listed once per
/// starting cell and direction, so a run may appear twice with its cells reversed.
pub fn placement_variants(
    board: &Board,
    available: &BTreeSet<Coordinate>,
    size: usize,
) -> Vec<Vec<Coordinate>> {
    let mut variants = Vec::new();
    if size == 0 {
        return variants;
    }
    for &start in available {
        if board.is_out_of_bounds(&start) {
            continue;
        }
        if size == 1 {
            variants.push(vec![start]);
            continue;
        }
        for &axis in &Axis::ALL {
            for &direction in &[1, -1] {
                let run: Vec<_> = (0..size as isize)
                    .map(|i| start.step(axis, i * direction))
                    .take_while(|step| match step {
                        Some(coord) => available.contains(coord) && !board.is_out_of_bounds(coord),
                        None => false,
                    })
                    .flatten()
                    .collect();
                if run.len() == size {
                    variants.push(run);
                }
            }
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn variants_on_empty_board() {
        let board = Board::default();
        let available: BTreeSet<_> = Coordinate::square(6).collect();
        // 4 runs of 3 per row, both directions, both axes.
        assert_eq!(placement_variants(&board, &available, 3).len(), 96);
        assert_eq!(placement_variants(&board, &available, 2).len(), 120);
        assert_eq!(placement_variants(&board, &available, 1).len(), 36);
        assert!(placement_variants(&board, &available, 7).is_empty());
    }

    #[test]
    fn variants_stay_in_pool() {
        let board = Board::new(3);
        let available: BTreeSet<_> = vec![(1, 1), (1, 2), (2, 2), (3, 3)]
            .into_iter()
            .map(|(row, col)| Coordinate::new(row, col).unwrap())
            .collect();
        let mut variants = placement_variants(&board, &available, 2);
        for run in &mut variants {
            run.sort();
        }
        variants.sort();
        variants.dedup();
        let c = |row, col| Coordinate::new(row, col).unwrap();
        assert_eq!(
            variants,
            vec![vec![c(1, 1), c(1, 2)], vec![c(1, 2), c(2, 2)]]
        );
    }

    #[test]
    fn generates_complete_boards() {
        let mut rng = StdRng::seed_from_u64(7);
        let generator = BoardGenerator::default();
        for _ in 0..20 {
            let board = generator.generate(&mut rng).unwrap();
            assert!(board.is_fleet_complete());
            assert_eq!(board.vessels().len(), 7);
        }
    }

    #[test]
    fn impossible_fleet_exhausts() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = BoardGenerator::new(2, Fleet::new(vec![(1, 2)])).with_max_tries(5);
        let err = generator.generate(&mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenerationExhausted);
        assert_eq!(err.rule(), "no valid board after 5 attempts");
    }
}
