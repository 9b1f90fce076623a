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

use std::{
    convert::TryFrom,
    fmt,
    io::{self, BufRead, Write},
};

use clap::{value_t, App, Arg, ArgMatches};
use log::info;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;

use seabattle::{
    Board, BoardGenerator, CellState, Coordinate, Game, SeaBattleError, ShotOutcome, Side,
    Vessel, DEFAULT_MAX_TRIES,
};

mod logging;

fn main() -> io::Result<()> {
    logging::init_logging();

    let matches = App::new("Sea Battle")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Sea battle against the computer on a 6x6 board.")
        .arg(
            Arg::with_name("first_player")
                .short("f")
                .long("first_player")
                .value_name("FIRST_PLAYER")
                .help("pre-specify which player goes first")
                .takes_value(true)
                .possible_values(&["human", "me", "computer", "bot", "random", "rand"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("board")
                .short("b")
                .long("board")
                .value_name("BOARD")
                .help("pre-specify whether your fleet is generated or entered by hand")
                .takes_value(true)
                .possible_values(&["random", "manual"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed the random number generator for a reproducible game")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max_tries")
                .long("max-tries")
                .value_name("N")
                .help("number of boards the generator may discard before giving up")
                .takes_value(true)
                .validator(|value| match value.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(()),
                    _ => Err(format!("expected a positive number, got {}", value)),
                }),
        )
        .get_matches();

    let mut rng = if matches.is_present("seed") {
        let seed = value_t!(matches, "seed", u64).unwrap_or_else(|e| e.exit());
        info!("using seed {}", seed);
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };
    let max_tries = if matches.is_present("max_tries") {
        value_t!(matches, "max_tries", usize).unwrap_or_else(|e| e.exit())
    } else {
        DEFAULT_MAX_TRIES
    };
    let generator = BoardGenerator::default().with_max_tries(max_tries);

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());

    greet(&generator);
    let mut first_game = true;
    loop {
        let prompt = if first_game {
            "Do you want to play a game? (Y/n)"
        } else {
            "Do you want to play a new game? (Y/n)"
        };
        first_game = false;
        let play = input.read_input_lower(prompt, |input| match input {
            "yes" | "y" | "" => Some(true),
            "no" | "n" => Some(false),
            _ => {
                println!("Invalid selection.");
                None
            }
        })?;
        if !play {
            break;
        }
        play_game(&matches, &generator, &mut rng, &mut input)?;
    }
    Ok(())
}

/// Print the rules.
fn greet(generator: &BoardGenerator) {
    println!("Sea battle against the computer.");
    println!(
        "The board is a {0}x{0} square. Your fleet: {1}.",
        generator.size(),
        generator.fleet()
    );
    println!("Vessels are straight lines and may not touch each other, not even diagonally.");
    println!("Whoever hits a vessel shoots again.");
    println!();
}

/// Set up both boards and run one game to the end.
fn play_game<B: BufRead>(
    matches: &ArgMatches,
    generator: &BoardGenerator,
    rng: &mut StdRng,
    input: &mut InputReader<B>,
) -> io::Result<()> {
    let human = if choose_manual_board(matches, input)? {
        enter_fleet(generator, input)?
    } else {
        generator.generate(rng).map_err(to_io)?
    };
    let computer = generator.generate(rng).map_err(to_io)?;
    let mut game = Game::new(human, computer);
    let mut turn = choose_first(matches, rng, input)?;

    show_position(&game, false);
    loop {
        let outcome = match turn {
            Side::Human => match human_turn(&mut game, input)? {
                Some(outcome) => outcome,
                None => {
                    println!("You gave up.");
                    show_position(&game, true);
                    return Ok(());
                }
            },
            Side::Computer => computer_turn(&mut game, rng, input)?,
        };
        match outcome {
            ShotOutcome::Missed => {
                println!("Miss!");
                turn = turn.opponent();
            }
            ShotOutcome::Hit => println!("Hit!"),
            ShotOutcome::Sunk => println!("Sunk!"),
        }
        if let Some(winner) = game.winner() {
            match winner {
                Side::Human => println!("You won!"),
                Side::Computer => println!("You lost."),
            }
            show_position(&game, true);
            return Ok(());
        }
        if outcome.is_hit() || turn == Side::Human {
            show_position(&game, false);
        }
    }
}

/// Decide whether the human enters their fleet by hand, based on either args or cli input.
fn choose_manual_board<B: BufRead>(
    matches: &ArgMatches,
    input: &mut InputReader<B>,
) -> io::Result<bool> {
    Ok(if let Some(clichoice) = matches.value_of("board") {
        clichoice.eq_ignore_ascii_case("manual")
    } else {
        input.read_input_lower(
            "Generate your board randomly? Answer no to enter it by hand. (Y/n)",
            |input| match input {
                "yes" | "y" | "random" | "rand" | "" => Some(false),
                "no" | "n" | "manual" => Some(true),
                _ => {
                    println!("Invalid selection.");
                    None
                }
            },
        )?
    })
}

/// Choose which [`Side`] shoots first based on either args or cli input.
fn choose_first<B: BufRead>(
    matches: &ArgMatches,
    rng: &mut StdRng,
    input: &mut InputReader<B>,
) -> io::Result<Side> {
    Ok(if let Some(clichoice) = matches.value_of("first_player") {
        match clichoice.to_ascii_lowercase().as_str() {
            "human" | "me" => Side::Human,
            "computer" | "bot" => Side::Computer,
            "random" | "rand" => {
                if rng.gen() {
                    Side::Human
                } else {
                    Side::Computer
                }
            }
            _ => unreachable!(),
        }
    } else {
        input.read_input_lower("Do you want to go first? (Y/n)", |input| match input {
            "yes" | "y" | "first" | "1" | "1st" | "" => Some(Side::Human),
            "no" | "n" | "second" | "2" | "2nd" => Some(Side::Computer),
            _ => {
                println!("Invalid selection.");
                None
            }
        })?
    })
}

/// Read the human's fleet from a single line, re-prompting until it is complete and legal.
fn enter_fleet<B: BufRead>(
    generator: &BoardGenerator,
    input: &mut InputReader<B>,
) -> io::Result<Board> {
    println!();
    println!("Enter your fleet on one line: {}.", generator.fleet());
    println!("Separate vessels with ';' and the cells of a vessel with spaces.");
    println!("Each cell is <row>,<col>, e.g. 1,1 1,2 1,3; 3,1 4,1; ...");
    input.read_input("Your fleet:", |line| {
        let board = match parse_fleet(generator, line) {
            Ok(board) => board,
            Err(err) => {
                println!("Invalid fleet: {}", err);
                return None;
            }
        };
        if board.is_fleet_complete() {
            Some(board)
        } else {
            println!(
                "Invalid fleet: expected {}, got {} vessel(s).",
                board.fleet(),
                board.vessels().len()
            );
            None
        }
    })
}

/// Place every vessel written on the line onto a fresh board.
fn parse_fleet(generator: &BoardGenerator, line: &str) -> seabattle::Result<Board> {
    let mut board = Board::with_fleet(generator.size(), generator.fleet().clone());
    for group in line.split(';').map(str::trim).filter(|group| !group.is_empty()) {
        let coords = group
            .split_whitespace()
            .map(str::parse::<Coordinate>)
            .collect::<seabattle::Result<Vec<_>>>()?;
        board.place(Vessel::from_coords(coords)?)?;
    }
    Ok(board)
}

/// Read and fire one human shot. Returns `None` if the human quits.
fn human_turn<B: BufRead>(
    game: &mut Game,
    input: &mut InputReader<B>,
) -> io::Result<Option<ShotOutcome>> {
    enum Command {
        Shoot(Coordinate),
        Help,
        Quit,
    }
    /// Matcher for a row and column.
    static SHOT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<row>-?[0-9]+)(?:\s*,\s*|\s+)(?P<col>-?[0-9]+)$").unwrap()
    });

    loop {
        let board = game.board(Side::Computer);
        let cmd = input.read_input_lower("Your shot (row col):", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "quit" | "q" | "exit" => Some(Command::Quit),
            other => {
                let captures = match SHOT.captures(other) {
                    Some(captures) => captures,
                    None => {
                        println!("Invalid shot \"{}\". Use '?' for help", other);
                        return None;
                    }
                };
                let row = captures["row"].parse::<i64>();
                let col = captures["col"].parse::<i64>();
                let (row, col) = match (row, col) {
                    (Ok(row), Ok(col)) => (row, col),
                    _ => {
                        println!("Invalid shot \"{}\": number too large", other);
                        return None;
                    }
                };
                let coord = match Coordinate::try_from((row, col)) {
                    Ok(coord) => coord,
                    Err(err) => {
                        println!("Invalid shot: {}", err);
                        return None;
                    }
                };
                match board.cell(coord) {
                    None => {
                        println!(
                            "Shot {} is off the board, rows and columns go from 1 to {}",
                            coord,
                            board.size()
                        );
                        None
                    }
                    Some(CellState::Missed) | Some(CellState::Hit) => {
                        println!("You already shot at {}.", coord);
                        None
                    }
                    Some(_) => Some(Command::Shoot(coord)),
                }
            }
        })?;

        match cmd {
            Command::Shoot(coord) => return game.human_shot(coord).map(Some).map_err(to_io),
            Command::Quit => return Ok(None),
            Command::Help => {
                println!(
                    "Available Commands:
    <row> <col>     shoot at the given cell, e.g. \"2 3\" or \"2,3\".
    help            show this message.
    quit            give up the game."
                );
            }
        }
    }
}

/// Let the computer fire one shot and wait for the human to acknowledge it.
fn computer_turn<B: BufRead>(
    game: &mut Game,
    rng: &mut StdRng,
    input: &mut InputReader<B>,
) -> io::Result<ShotOutcome> {
    let (coord, outcome) = game.computer_shot(rng).map_err(to_io)?;
    println!();
    println!("Computer fires at {}", coord);
    input.read_input("Press Enter to continue.", |_| Some(()))?;
    Ok(outcome)
}

/// Report a broken game rule through the binary's io error path.
fn to_io(err: SeaBattleError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Print both boards. The computer's board is hidden unless `reveal` is set.
fn show_position(game: &Game, reveal: bool) {
    println!();
    println!("Your board:");
    show_board(game.board(Side::Human).iter_board(false).map(|row| row.map(Glyph)));
    println!("Computer's board:");
    show_board(
        game.board(Side::Computer)
            .iter_board(!reveal)
            .map(|row| row.map(Glyph)),
    );
}

/// Print the grid with 1-based row and column labels.
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    let rows: Vec<Vec<_>> = rows.map(|row| row.collect()).collect();
    print!("   ");
    for i in 1..=rows.len() {
        print!("{:^3}", i);
    }
    println!();
    for (i, row) in rows.iter().enumerate() {
        print!("{:>2} ", i + 1);
        for cell in row {
            print!("{:^3}", cell);
        }
        println!();
    }
}

/// Display helper that prints the glyph for a cell.
struct Glyph(CellState);

impl Glyph {
    fn glyph(&self) -> &'static str {
        match self.0 {
            CellState::Empty => "\u{25a1}",
            CellState::Ship => "\u{25a0}",
            CellState::Missed => "\u{25e6}",
            CellState::Hit => "x",
            CellState::Contoured => "-",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.glyph())
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_fleet() {
        let generator = BoardGenerator::default();
        let board = parse_fleet(
            &generator,
            "1,1 1,2 1,3; 3,1 4,1; 1,5 2,5; 6,1; 4,3; 6,6; 4,6",
        )
        .unwrap();
        assert!(board.is_fleet_complete());

        let partial = parse_fleet(&generator, "1,1 1,2 1,3;").unwrap();
        assert!(!partial.is_fleet_complete());
    }

    #[test]
    fn reports_broken_rules() {
        let generator = BoardGenerator::default();
        for line in &["1,1 2,2", "1,1; 2,2", "7,1", "a,b", "1,1 1,2 1,3 1,4"] {
            assert!(parse_fleet(&generator, line).is_err(), "line {:?}", line);
        }
    }

    #[test]
    fn glyphs() {
        assert_eq!(Glyph(CellState::Hit).to_string(), "x");
        assert_eq!(format!("{:^3}", Glyph(CellState::Contoured)), " - ");
    }
}
