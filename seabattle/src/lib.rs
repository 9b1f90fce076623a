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

//! Sea battle on a small square board.
//!
//! The standard game is played on a 6x6 [`Board`] with one vessel of three cells, two of
//! two cells and four of one cell. Vessels are straight lines and may not touch each
//! other, not even diagonally.
//!
//! - [`BoardGenerator`] lays out a random complete fleet.
//! - [`Board::resolve_shot`] applies a shot and reports whether it missed, hit or sank a
//!   vessel.
//! - [`Opponent`] picks the computer's shots, finishing off wounded vessels before going
//!   back to random search.
//! - [`Game`] ties two boards and an [`Opponent`] together.

pub use self::{
    board::{Board, CellState, Fleet, ShotOutcome, DEFAULT_SIZE},
    coordinate::{Axis, Coordinate},
    errors::{ErrorKind, Result, SeaBattleError},
    game::{Game, Side},
    generator::{BoardGenerator, DEFAULT_MAX_TRIES},
    opponent::{Opponent, TargetState},
    vessel::{Orientation, Part, Vessel},
};

pub mod board;
pub mod coordinate;
pub mod errors;
pub mod game;
pub mod generator;
pub mod opponent;
pub mod vessel;
