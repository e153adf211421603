/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::{builder::PossibleValue, ArgAction, Parser, ValueEnum};
use log::LevelFilter;

use crate::{Move, PlayerKind, SearchConfig, Side, Square};

/// Play Tablut against the engine, or watch it play itself.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Who plays the White pieces.
    #[arg(long, value_name = "PLAYER", default_value = "manual")]
    pub white: PlayerKind,

    /// Who plays the Black pieces.
    #[arg(long, value_name = "PLAYER", default_value = "auto")]
    pub black: PlayerKind,

    /// Search to a fixed depth instead of choosing one from the game phase.
    #[arg(short, long)]
    pub depth: Option<u8>,

    /// Limit every game to this many moves per side.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Increase logging verbosity. May be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The log level requested on the command line.
    ///
    /// Warnings are always shown; each `-v` enables the next level down.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// The search settings requested on the command line.
    #[inline(always)]
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth,
        }
    }
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND> | <MOVE>")
)]
pub enum EngineCommand {
    /// Let the engine play `side`.
    Auto { side: Side },

    /// Print the board without coordinates, between `===` lines.
    Dump,

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print the encoding of the current position.
    Encode,

    /// Print an evaluation of the current position.
    Eval {
        /// If set, the material count behind the evaluation is printed too.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Search the current position and print the best move, without playing it.
    Go {
        /// Override the configured search depth.
        #[arg(short, long)]
        depth: Option<u8>,
    },

    /// Limit the game to `moves` moves per side.
    Limit { moves: usize },

    /// Apply the provided move to the game, if it is legal.
    ///
    /// A move typed on its own, such as `d9-d7`, is treated the same way.
    MakeMove { mv: Move },

    /// Let a human play `side`.
    Manual { side: Side },

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves { square: Option<Square> },

    /// Start a new game from the initial position.
    New,

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Take back the last move.
    ///
    /// If the engine plays the side that would then be to move, its move is taken back too.
    Undo,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a string.
    ///
    /// If this fails, it will attempt to parse the string as a [`Move`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::try_parse_from(s.split_ascii_whitespace()) {
            Ok(cmd) => Ok(cmd),
            Err(e) => match s.parse::<Move>() {
                Ok(mv) => Ok(Self::MakeMove { mv }),
                Err(_) => Err(e),
            },
        }
    }
}

impl ValueEnum for Side {
    fn value_variants<'a>() -> &'a [Self] {
        &[Side::White, Side::Black]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            Side::White => PossibleValue::new("white").aliases(["White", "w"]),
            Side::Black => PossibleValue::new("black").aliases(["Black", "b"]),
        };

        Some(value)
    }
}

impl ValueEnum for PlayerKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[PlayerKind::Auto, PlayerKind::Manual]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Each variant also accepts a few common synonyms
        let value = match self {
            PlayerKind::Auto => PossibleValue::new("auto").aliases(["Auto", "ai", "engine"]),
            PlayerKind::Manual => PossibleValue::new("manual").aliases(["Manual", "human"]),
        };

        Some(value)
    }
}
