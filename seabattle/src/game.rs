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

//! A match between a human and the computer.
use std::fmt;

use log::debug;
use rand::Rng;

use crate::{
    board::{Board, ShotOutcome},
    coordinate::Coordinate,
    errors::Result,
    opponent::Opponent,
};

/// One of the two players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Side::Human => "human",
            Side::Computer => "computer",
        })
    }
}

/// Both boards and the computer's targeting engine.
///
/// Turn order is left to the caller; each side may shoot any number of times in a row.
#[derive(Debug, Clone)]
pub struct Game {
    /// Board the human owns and the computer shoots at.
    human: Board,
    /// Board the computer owns and the human shoots at.
    computer: Board,
    opponent: Opponent,
}

impl Game {
    /// Start a game on two boards. The targeting engine covers the human board.
    pub fn new(human: Board, computer: Board) -> Self {
        let opponent = Opponent::new(human.size());
        Self {
            human,
            computer,
            opponent,
        }
    }

    /// Get the board owned by the given side.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    /// The computer's targeting engine.
    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    /// Fire the human's shot at the computer's board.
    pub fn human_shot(&mut self, coord: Coordinate) -> Result<ShotOutcome> {
        let outcome = self.computer.resolve_shot(coord)?;
        debug!("human fired at {}: {:?}", coord, outcome);
        Ok(outcome)
    }

    /// Let the computer pick a shot, fire it at the human's board and learn from the
    /// outcome.
    pub fn computer_shot<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(Coordinate, ShotOutcome)> {
        let coord = self.opponent.propose_shot(rng)?;
        let outcome = self.human.resolve_shot(coord)?;
        self.opponent.add_ai_shot(coord, outcome)?;
        debug!("computer fired at {}: {:?}", coord, outcome);
        Ok((coord, outcome))
    }

    /// Returns the side that won, if one side has no vessels left afloat.
    pub fn winner(&self) -> Option<Side> {
        if !self.computer.has_living_vessels() {
            Some(Side::Human)
        } else if !self.human.has_living_vessels() {
            Some(Side::Computer)
        } else {
            None
        }
    }
}
