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

//! Fleet composition rules.

use std::{collections::BTreeMap, fmt};

use crate::errors::{ErrorKind, Result, SeaBattleError};

/// How many vessels of each size a complete board holds.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Fleet {
    /// Vessel size to required count. Sizes with a zero count are not stored.
    counts: BTreeMap<usize, usize>,
}

impl Fleet {
    /// Build a fleet from `(size, count)` pairs. Counts for repeated sizes add up.
    /// Panics if any size is 0.
    pub fn new<I: IntoIterator<Item = (usize, usize)>>(pairs: I) -> Self {
        let mut counts = BTreeMap::new();
        for (size, count) in pairs {
            assert!(size > 0, "vessel size must be positive");
            if count > 0 {
                *counts.entry(size).or_insert(0) += count;
            }
        }
        Self { counts }
    }

    /// Number of vessels of the given size in the fleet.
    pub fn allowed(&self, size: usize) -> usize {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// Size of every vessel in the fleet, largest first.
    pub fn sizes<'a>(&'a self) -> impl 'a + Iterator<Item = usize> {
        self.counts
            .iter()
            .rev()
            .flat_map(|(&size, &count)| std::iter::repeat(size).take(count))
    }

    /// Total number of vessels in the fleet.
    pub fn total_vessels(&self) -> usize {
        self.counts.values().sum()
    }

    /// Check that one more vessel of `size` fits in the fleet, given the sizes of the
    /// vessels already placed.
    pub fn check_room<I: IntoIterator<Item = usize>>(&self, size: usize, placed: I) -> Result<()> {
        let allowed = self.allowed(size);
        if allowed == 0 {
            return Err(SeaBattleError::new(
                ErrorKind::FleetRuleViolation,
                format!("the fleet has no vessels of size {}", size),
            ));
        }
        let present = placed.into_iter().filter(|&placed| placed == size).count();
        if present >= allowed {
            Err(SeaBattleError::new(
                ErrorKind::FleetRuleViolation,
                format!(
                    "all {} vessels of size {} are already placed",
                    allowed, size
                ),
            ))
        } else {
            Ok(())
        }
    }

    /// Returns true if the given vessel sizes make up exactly this fleet.
    pub fn is_satisfied_by<I: IntoIterator<Item = usize>>(&self, sizes: I) -> bool {
        let mut found = BTreeMap::new();
        for size in sizes {
            *found.entry(size).or_insert(0) += 1;
        }
        found == self.counts
    }
}

impl Default for Fleet {
    /// One vessel of size 3, two of size 2 and four of size 1.
    fn default() -> Self {
        Self::new(vec![(3, 1), (2, 2), (1, 4)])
    }
}

impl fmt::Display for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (size, count) in self.counts.iter().rev() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{} x size {}", count, size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fleet() {
        let fleet = Fleet::default();
        assert_eq!(fleet.sizes().collect::<Vec<_>>(), vec![3, 2, 2, 1, 1, 1, 1]);
        assert_eq!(fleet.total_vessels(), 7);
        assert_eq!(fleet.allowed(2), 2);
        assert_eq!(fleet.allowed(4), 0);
        assert_eq!(fleet.to_string(), "1 x size 3, 2 x size 2, 4 x size 1");
    }

    #[test]
    fn room_for_vessels() {
        let fleet = Fleet::default();
        assert!(fleet.check_room(2, vec![3, 2]).is_ok());
        assert_eq!(
            fleet.check_room(2, vec![2, 2]).unwrap_err().kind(),
            ErrorKind::FleetRuleViolation
        );
        assert_eq!(
            fleet.check_room(4, Vec::new()).unwrap_err().kind(),
            ErrorKind::FleetRuleViolation
        );
    }

    #[test]
    fn satisfied_only_by_exact_composition() {
        let fleet = Fleet::default();
        assert!(fleet.is_satisfied_by(vec![1, 2, 1, 3, 1, 2, 1]));
        assert!(!fleet.is_satisfied_by(vec![3, 2, 2, 1, 1, 1]));
        assert!(!fleet.is_satisfied_by(Vec::new()));
    }
}
