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

//! The computer player's targeting engine.
//!
//! While [`Searching`][TargetState::Searching] the engine fires at random cells it has
//! not ruled out yet. A hit switches it to [`Hunting`][TargetState::Hunting]: it probes
//! the neighbors of the wounded vessel until it learns the vessel's axis, then extends
//! the line at either end until the vessel sinks. The water around a sunk vessel can't
//! hold another vessel, so it is dropped from the pool.

use std::{collections::BTreeSet, mem};

use log::{debug, trace};
use rand::Rng;

use crate::{
    board::ShotOutcome,
    coordinate::Coordinate,
    errors::{ErrorKind, Result, SeaBattleError},
    vessel::{Orientation, Vessel},
};

/// What the engine is currently doing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TargetState {
    /// No known wounded vessel. Shots are random.
    Searching,
    /// Finishing off a vessel made of the confirmed hits so far.
    Hunting(Vessel),
}

/// Chooses the computer's shots and learns from their outcomes.
#[derive(Debug, Clone)]
pub struct Opponent {
    /// Coordinates that have neither been shot nor ruled out.
    pool: BTreeSet<Coordinate>,
    state: TargetState,
}

impl Opponent {
    /// Create an engine for a `size`x`size` board, with every cell still available.
    pub fn new(size: usize) -> Self {
        Self {
            pool: Coordinate::square(size).collect(),
            state: TargetState::Searching,
        }
    }

    pub fn state(&self) -> &TargetState {
        &self.state
    }

    pub fn is_hunting(&self) -> bool {
        match self.state {
            TargetState::Hunting(_) => true,
            TargetState::Searching => false,
        }
    }

    /// The vessel being hunted, built from the hits on it so far.
    pub fn wounded(&self) -> Option<&Vessel> {
        match &self.state {
            TargetState::Hunting(wounded) => Some(wounded),
            TargetState::Searching => None,
        }
    }

    /// Returns true if the engine could still propose `coord`.
    pub fn is_available(&self, coord: Coordinate) -> bool {
        self.pool.contains(&coord)
    }

    /// Number of coordinates still available.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Pick the next shot and take it out of the pool.
    ///
    /// Fails with [`ErrorKind::HuntExhausted`] if there is nothing left to shoot at. That
    /// only happens if outcomes fed to [`add_ai_shot`][Opponent::add_ai_shot] don't match
    /// a real board.
    pub fn propose_shot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Coordinate> {
        let chosen = match &self.state {
            TargetState::Searching => {
                if self.pool.is_empty() {
                    None
                } else {
                    let index = rng.gen_range(0, self.pool.len());
                    self.pool.iter().nth(index).copied()
                }
            }
            TargetState::Hunting(wounded) => self.hunt(wounded),
        };
        match chosen {
            Some(coord) => {
                self.pool.remove(&coord);
                trace!("proposing {}", coord);
                Ok(coord)
            }
            None => Err(SeaBattleError::new(
                ErrorKind::HuntExhausted,
                match &self.state {
                    TargetState::Searching => "no coordinates left to shoot at".to_string(),
                    TargetState::Hunting(wounded) => {
                        format!("no coordinates left next to wounded {}", wounded)
                    }
                },
            )),
        }
    }

    /// First available cell that could continue the wounded vessel.
    fn hunt(&self, wounded: &Vessel) -> Option<Coordinate> {
        let pool = &self.pool;
        match wounded.orientation() {
            Orientation::Undetermined => {
                let (part, _) = wounded.ends();
                part.neighbors(wounded.orientation().axes())
                    .find(|coord| pool.contains(coord))
            }
            Orientation::Fixed(axis) => {
                let (low, high) = wounded.ends();
                vec![low.step(axis, -1), high.step(axis, 1)]
                    .into_iter()
                    .flatten()
                    .find(|coord| pool.contains(coord))
            }
        }
    }

    /// Record the outcome of a shot this engine fired.
    ///
    /// Hits extend the wounded vessel, starting a hunt if needed. When the vessel sinks its
    /// surroundings are dropped from the pool and the engine goes back to searching.
    pub fn add_ai_shot(&mut self, coord: Coordinate, outcome: ShotOutcome) -> Result<()> {
        self.pool.remove(&coord);
        if !outcome.is_hit() {
            return Ok(());
        }
        if let TargetState::Hunting(wounded) = &mut self.state {
            wounded.add_part(coord)?;
        } else {
            debug!("hit at {}, hunting", coord);
            self.state = TargetState::Hunting(Vessel::new(coord));
        }
        if outcome == ShotOutcome::Sunk {
            let state = mem::replace(&mut self.state, TargetState::Searching);
            if let TargetState::Hunting(sunk) = state {
                sunk.surrounding_coordinates_excluded_from(&mut self.pool);
                debug!("sank {}, searching", sunk);
            }
        }
        Ok(())
    }
}
