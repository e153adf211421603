/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    ops::ControlFlow,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
    time::Instant,
};

use anyhow::{bail, Context, Result};

use crate::{
    perft, splitperft, Board, Cli, EngineCommand, Evaluator, Move, Search, SearchConfig,
    SearchResult, Side, Square,
};

/// Who chooses the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    /// Moves are found by a [`Search`] and played immediately.
    Auto,

    /// Moves are read from standard input.
    Manual,
}

/// The Tablut engine: a game, the players controlling each side, and the loop that drives them.
#[derive(Debug)]
pub struct Engine {
    /// The game in progress.
    ///
    /// This is modified whenever moves are played,
    /// and is reset whenever the engine is told to start a new game.
    board: Board,

    /// Who plays each side, indexed by [`Side::index`].
    players: [PlayerKind; Side::COUNT],

    /// Settings for every search the engine runs.
    config: SearchConfig,

    /// Moves per side allowed in each new game, if limited.
    move_limit: Option<usize>,

    /// Whether the result of the current game has been printed.
    announced: bool,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    ///
    /// By default, a human plays White and the engine plays Black.
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            board: Board::new(),
            players: [PlayerKind::Manual, PlayerKind::Auto],
            config: SearchConfig::default(),
            move_limit: None,
            announced: false,
            sender,
            receiver,
        }
    }

    /// Constructs an [`Engine`] configured from command-line options.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut engine = Self::new();
        engine.set_player(Side::White, cli.white);
        engine.set_player(Side::Black, cli.black);
        engine.config = cli.search_config();

        if let Some(moves) = cli.limit {
            engine.set_move_limit(moves)?;
        }

        Ok(engine)
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// The game in progress.
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns who plays `side`.
    #[inline(always)]
    pub const fn player(&self, side: Side) -> PlayerKind {
        self.players[side.index()]
    }

    /// Sets who plays `side`.
    #[inline(always)]
    pub fn set_player(&mut self, side: Side, kind: PlayerKind) {
        self.players[side.index()] = kind;
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    /// Whenever it is an automatic player's turn, the engine moves before waiting for the next command.
    pub fn run(&mut self) -> Result<()> {
        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                log::error!("Input handler thread stopping after fatal error: {err}");
            }
        });

        self.play_automatic_moves();

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            log::debug!("Received command {cmd:?}");

            // Keep running, even on error
            match self.execute(cmd) {
                Ok(ControlFlow::Break(())) => break,
                Ok(ControlFlow::Continue(())) => {}
                Err(e) => {
                    log::warn!("Command failed: {e}");
                    eprintln!("Error: {e}");
                }
            }

            self.play_automatic_moves();
        }

        Ok(())
    }

    /// Handle the execution of a single [`EngineCommand`].
    ///
    /// Returns [`ControlFlow::Break`] if the engine should stop.
    pub fn execute(&mut self, cmd: EngineCommand) -> Result<ControlFlow<()>> {
        match cmd {
            EngineCommand::Auto { side } => self.set_player(side, PlayerKind::Auto),

            EngineCommand::Manual { side } => self.set_player(side, PlayerKind::Manual),

            EngineCommand::Dump => print!("===\n{}===\n", self.board.render(false)),

            EngineCommand::Display => println!("{}", self.board),

            EngineCommand::Encode => println!("{}", self.board.encode()),

            EngineCommand::Eval { pretty } => self.eval(pretty),

            EngineCommand::Exit => return Ok(ControlFlow::Break(())),

            EngineCommand::Go { depth } => {
                let res = self.search(depth)?;
                if let Some(mv) = res.bestmove {
                    println!(
                        "bestmove {mv} score {} depth {} nodes {}",
                        res.score, res.depth, res.nodes
                    );
                }
            }

            EngineCommand::Limit { moves } => self.set_move_limit(moves)?,

            EngineCommand::MakeMove { mv } => self.make_move(mv)?,

            EngineCommand::Moves { square } => self.moves(square),

            EngineCommand::New => self.new_game()?,

            EngineCommand::Perft { depth } => self.perft::<false>(depth),

            EngineCommand::Splitperft { depth } => self.perft::<true>(depth),

            EngineCommand::Undo => self.undo(),
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Limits this game, and every new game, to `moves` moves per side.
    fn set_move_limit(&mut self, moves: usize) -> Result<()> {
        self.board
            .set_move_limit(moves)
            .with_context(|| format!("Failed to set a limit of {moves} moves"))?;
        self.move_limit = Some(moves);
        Ok(())
    }

    /// Resets the engine's internal game state, keeping the players and the move limit.
    fn new_game(&mut self) -> Result<()> {
        self.board = Board::new();
        self.announced = false;

        if let Some(moves) = self.move_limit {
            self.board.set_move_limit(moves)?;
        }

        log::info!("Started a new game");
        Ok(())
    }

    /// Plays a move typed by a human.
    fn make_move(&mut self, mv: Move) -> Result<()> {
        if let Some(winner) = self.board.winner() {
            bail!("The game is over: {winner} has won. Start a new game or undo");
        }

        let side = self.board.turn();
        if self.player(side) == PlayerKind::Auto {
            bail!("{side} is played by the engine");
        }

        self.board.make_move_checked(mv)?;
        log::debug!("{side} played {mv}");

        self.announce_winner();
        Ok(())
    }

    /// Takes back the last move, and the engine's move before that if the engine would just replay it.
    fn undo(&mut self) {
        let before = self.board.move_count();

        self.board.undo();
        if self.player(self.board.turn()) == PlayerKind::Auto {
            self.board.undo();
        }

        self.announced = false;
        log::debug!("Undid {} moves", before - self.board.move_count());
    }

    /// Executes the `eval` command, printing an evaluation of the current position.
    fn eval(&self, pretty: bool) {
        let evaluator = Evaluator::new(&self.board);
        if pretty {
            print!("{evaluator}\n\nScore: ");
        }

        println!("{}", evaluator.eval());
    }

    /// Executes the `moves` command, printing the legal moves of the side to move.
    fn moves(&self, square: Option<Square>) {
        // Get the legal moves
        let moves = if let Some(square) = square {
            self.board.legal_moves_from(square)
        } else {
            self.board.legal_moves(self.board.turn())
        };

        // If there are none, print "(none)"
        let moves_string = if moves.is_empty() {
            String::from("(none)")
        } else {
            // Otherwise, join them by comma-space
            moves
                .into_iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{moves_string}");
    }

    /// Executes the `perft` and `splitperft` commands.
    fn perft<const SPLIT: bool>(&self, depth: usize) {
        let start = Instant::now();
        let nodes = if SPLIT {
            splitperft(&self.board, depth)
        } else {
            perft(&self.board, depth)
        };
        let elapsed = start.elapsed();

        if SPLIT {
            println!();
        }
        println!("{nodes} nodes in {}ms", elapsed.as_millis());
    }

    /// Searches the current position, optionally overriding the configured depth.
    fn search(&self, depth: Option<u8>) -> Result<SearchResult> {
        let config = SearchConfig {
            max_depth: depth.or(self.config.max_depth),
        };

        let res = Search::new(&self.board, config).start(|_: Side, _: Move| {})?;
        Ok(res)
    }

    /// While the game is undecided and the side to move is played by the engine, search and play a move.
    ///
    /// Each move is printed as `* <move>`.
    fn play_automatic_moves(&mut self) {
        while !self.board.is_game_over() && self.player(self.board.turn()) == PlayerKind::Auto {
            let config = self.config;
            let res = Search::new(&self.board, config)
                .start(|side: Side, mv: Move| log::info!("{side} plays {mv}"));

            match res {
                Ok(SearchResult {
                    bestmove: Some(mv), ..
                }) => {
                    println!("* {mv}");
                    self.board.make_move(mv);
                }
                Ok(_) => break,
                Err(e) => {
                    log::warn!("{} cannot move: {e}", self.name());
                    break;
                }
            }
        }

        self.announce_winner();
    }

    /// Prints the result of the game, once, if it has been decided.
    fn announce_winner(&mut self) {
        if self.announced {
            return;
        }

        if let Some(winner) = self.board.winner() {
            println!("{winner} wins.");
            log::info!("{winner} won after {} moves", self.board.move_count());
            self.announced = true;
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing engine commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and exit this function
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            return Ok(());
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines and comments
        if buf.is_empty() || buf.starts_with('#') {
            continue;
        }

        match buf.parse::<EngineCommand>() {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_engine() -> Engine {
        let mut engine = Engine::new();
        engine.set_player(Side::Black, PlayerKind::Manual);
        engine
    }

    #[test]
    fn test_manual_moves() {
        let mut engine = manual_engine();
        let flow = engine.execute("d9-d7".parse().unwrap()).unwrap();

        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(engine.board().move_count(), 1);

        // Not legal for White
        assert!(engine.execute("d7-d8".parse().unwrap()).is_err());
        assert_eq!(engine.board().move_count(), 1);
    }

    #[test]
    fn test_engine_replies_to_manual_move() {
        let mut engine = Engine::new();
        engine.set_player(Side::White, PlayerKind::Auto);
        engine.set_player(Side::Black, PlayerKind::Manual);

        engine.execute("d1-d3".parse().unwrap()).unwrap();
        engine.play_automatic_moves();

        // White's only capture
        assert_eq!(engine.board().moves().last().unwrap().to_string(), "c5-c3");
        assert_eq!(engine.board().turn(), Side::Black);

        // Undo takes back both moves, giving Black the move again
        engine.execute(EngineCommand::Undo).unwrap();
        assert_eq!(engine.board().move_count(), 0);
    }

    #[test]
    fn test_rejects_moves_for_automatic_side() {
        let mut engine = Engine::new();
        assert_eq!(engine.player(Side::Black), PlayerKind::Auto);
        assert!(engine.execute("d9-d7".parse().unwrap()).is_err());
    }

    #[test]
    fn test_move_limit_survives_new_game() {
        let mut engine = manual_engine();
        engine.execute(EngineCommand::Limit { moves: 1 }).unwrap();
        engine.execute("d9-d7".parse().unwrap()).unwrap();
        engine.execute("e3-d3".parse().unwrap()).unwrap();

        // White made the last move, and Black is out of moves
        assert_eq!(engine.board().winner(), Some(Side::White));
        assert!(engine.execute("d3-d2".parse().unwrap()).is_err());

        engine.execute(EngineCommand::New).unwrap();
        assert_eq!(engine.board().move_limit(), Some(2));
        assert_eq!(engine.board().move_count(), 0);
    }

    #[test]
    fn test_exit() {
        let mut engine = manual_engine();
        assert_eq!(engine.execute(EngineCommand::Exit).unwrap(), ControlFlow::Break(()));
    }
}
