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

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use seabattle::{BoardGenerator, CellState, Coordinate, DEFAULT_SIZE};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_boards_follow_the_rules(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = BoardGenerator::default().generate(&mut rng).unwrap();
        prop_assert!(board.is_fleet_complete());

        let vessels = board.vessels();
        for (i, vessel) in vessels.iter().enumerate() {
            prop_assert!(vessel.coords().all(|coord| !board.is_out_of_bounds(&coord)));
            for other in &vessels[i + 1..] {
                prop_assert!(vessel.compatible_with(other));
            }
        }

        let ship_cells = Coordinate::square(DEFAULT_SIZE)
            .filter(|&coord| board.cell(coord) == Some(CellState::Ship))
            .count();
        prop_assert_eq!(ship_cells, 3 + 2 + 2 + 1 + 1 + 1 + 1);
    }

    #[test]
    fn seeded_generation_is_reproducible(seed in any::<u64>()) {
        let generator = BoardGenerator::default();
        let first = generator.generate(&mut StdRng::seed_from_u64(seed)).unwrap();
        let second = generator.generate(&mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(first.vessels(), second.vessels());
    }

    #[test]
    fn hidden_rendering_never_shows_ships(seed in any::<u64>(), shots in 0..36usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = BoardGenerator::default().generate(&mut rng).unwrap();
        for coord in Coordinate::square(DEFAULT_SIZE).take(shots) {
            board.resolve_shot(coord).unwrap();
        }
        prop_assert!(board
            .iter_board(true)
            .flatten()
            .all(|cell| cell != CellState::Ship));
    }
}
