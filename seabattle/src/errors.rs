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

//! Error returned by every fallible operation in the crate.

use thiserror::Error;

/// Shorthand for results carrying a [`SeaBattleError`].
pub type Result<T, E = SeaBattleError> = std::result::Result<T, E>;

/// Which game rule an operation ran into.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A coordinate axis was not a positive integer.
    #[error("invalid coordinate")]
    InvalidCoordinate,

    /// A part did not extend the vessel in a straight, contiguous line.
    #[error("invalid vessel placement")]
    InvalidVesselPlacement,

    /// The vessel size is not part of the fleet, or all vessels of that size are
    /// already placed.
    #[error("fleet rule violated")]
    FleetRuleViolation,

    /// The coordinate or vessel does not fit on the board.
    #[error("out of bounds")]
    OutOfBounds,

    /// The vessel would touch another vessel, diagonals included.
    #[error("vessels too close")]
    AdjacencyViolation,

    /// The board generator ran out of attempts.
    #[error("board generation exhausted")]
    GenerationExhausted,

    /// The opponent had no coordinate left to shoot. Only raised when the targeting
    /// bookkeeping is broken.
    #[error("no shot left to propose")]
    HuntExhausted,
}

/// A rule violation along with a human readable description of the broken rule.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{kind}: {rule}")]
pub struct SeaBattleError {
    kind: ErrorKind,
    rule: String,
}

impl SeaBattleError {
    /// Construct an error of the given kind.
    pub(crate) fn new<S: Into<String>>(kind: ErrorKind, rule: S) -> Self {
        Self {
            kind,
            rule: rule.into(),
        }
    }

    /// Get the kind of rule that was broken.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the description of the broken rule.
    pub fn rule(&self) -> &str {
        &self.rule
    }
}

impl From<SeaBattleError> for ErrorKind {
    fn from(err: SeaBattleError) -> Self {
        err.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_kind_and_rule() {
        let err = SeaBattleError::new(ErrorKind::OutOfBounds, "shot at 7,1 is off the board");
        assert_eq!(err.to_string(), "out of bounds: shot at 7,1 is off the board");
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(ErrorKind::from(err), ErrorKind::OutOfBounds);
    }
}
