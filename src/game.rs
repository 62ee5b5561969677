//! Game controller and console session.
//!
//! [`Game`] owns the board, alternates turns (player A moves first), asks the
//! [`MovePredictor`] for robot moves and adjudicates after every move.
//! [`Session`] drives a `Game` over any line-based reader/writer pair, which
//! is how the binary plays in a terminal.
//!
//! ## Example
//!
//! ```
//! use hex_mc::game::Game;
//! use hex_mc::predictor::PredictorConfig;
//!
//! let mut game = Game::new(3, 3, None, PredictorConfig::default(), fastrand::Rng::with_seed(1)).unwrap();
//! let winner = game.self_play().unwrap();
//! assert_eq!(game.winner(), Some(winner));
//! ```

use std::io::{BufRead, Write};

use fastrand::Rng;
use tracing::info;

use crate::board::{Board, Coord, Player};
use crate::error::HexError;
use crate::predictor::{MovePredictor, PredictorConfig};

pub struct Game {
    board: Board,
    to_move: Player,
    /// Side controlled by a person; `None` for robot-vs-robot
    human: Option<Player>,
    predictor: MovePredictor,
    rng: Rng,
}

impl Game {
    pub fn new(
        rows: usize,
        columns: usize,
        human: Option<Player>,
        config: PredictorConfig,
        rng: Rng,
    ) -> Result<Self, HexError> {
        Ok(Self {
            board: Board::new(rows, columns)?,
            to_move: Player::A,
            human,
            predictor: MovePredictor::new(config),
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn human(&self) -> Option<Player> {
        self.human
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    pub fn is_human_turn(&self) -> bool {
        self.human == Some(self.to_move)
    }

    /// Play `(row, col)` for the side to move.
    ///
    /// Returns the winner if this move decided the game. Fails with
    /// [`HexError::IllegalMove`] for an occupied or off-board cell, or once
    /// the game is over.
    pub fn play(&mut self, row: usize, col: usize) -> Result<Option<Player>, HexError> {
        if self.winner().is_some() || !self.board.is_legal(row, col) {
            return Err(HexError::IllegalMove { row, column: col });
        }
        let player = self.to_move;
        self.board.apply(row, col, player);
        info!(%player, row, col, "move played");

        let winner = self.adjudicate();
        if let Some(winner) = winner {
            info!(%winner, "game over");
        }
        self.to_move = player.opponent();
        Ok(winner)
    }

    /// Let the predictor choose and play a move for the side to move.
    pub fn play_robot(&mut self) -> Result<Coord, HexError> {
        let (row, col) = self
            .predictor
            .compute_next_move(&mut self.board, self.to_move, &mut self.rng)?;
        self.play(row, col)?;
        Ok((row, col))
    }

    /// Robot plays both sides until someone connects.
    pub fn self_play(&mut self) -> Result<Player, HexError> {
        loop {
            if let Some(winner) = self.winner() {
                return Ok(winner);
            }
            self.play_robot()?;
        }
    }

    fn adjudicate(&mut self) -> Option<Player> {
        if self.board.check_connected(Player::A) || self.board.check_connected(Player::B) {
            self.board.winner()
        } else {
            None
        }
    }
}

/// Parse a move typed as two numbers: `row col`, `row,col` or `[row, col]`.
pub fn parse_move(line: &str) -> Option<Coord> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',' || c == '[' || c == ']')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

fn objective(board: &Board, player: Player) -> String {
    match player {
        Player::A => format!(
            "Your objective is to connect a tile from column 0 to a tile from column {}",
            board.columns() - 1
        ),
        Player::B => format!(
            "Your objective is to connect a tile from row 0 to a tile from row {}",
            board.rows() - 1
        ),
    }
}

/// Interactive game between a person and the predictor.
pub struct Session {
    game: Game,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until someone wins, reading the human's moves from `input`.
    ///
    /// Unreadable or illegal moves are re-prompted. Returns `Ok(None)` if the
    /// input ends before the game does.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> anyhow::Result<Option<Player>> {
        writeln!(output, "\nWelcome to the game of Hex!")?;
        if let Some(human) = self.game.human() {
            writeln!(output, "You are {human}. {}", objective(self.game.board(), human))?;
        }

        let mut lines = input.lines();
        while self.game.winner().is_none() {
            if self.game.is_human_turn() {
                write!(output, "\n{}", self.game.board())?;
                loop {
                    write!(output, "Enter your move as `row col`: ")?;
                    output.flush()?;

                    let Some(line) = lines.next() else {
                        writeln!(output, "\nInput closed, leaving the game.")?;
                        return Ok(None);
                    };
                    let line = line?;

                    let Some((row, col)) = parse_move(&line) else {
                        writeln!(output, "Could not read a move from {:?}, expected two numbers", line.trim())?;
                        continue;
                    };
                    match self.game.play(row, col) {
                        Ok(_) => {
                            writeln!(output, "You have played your move at [{row}, {col}]")?;
                            break;
                        }
                        Err(HexError::IllegalMove { .. }) => {
                            writeln!(output, "[{row}, {col}] is not a legal move, try again")?;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            } else {
                writeln!(output, "\nRobot is thinking of its next move...")?;
                let (row, col) = self.game.play_robot()?;
                writeln!(output, "Robot has played a move at [{row}, {col}]")?;
            }
        }

        let winner = self.game.winner();
        write!(output, "\n{}", self.game.board())?;
        if let Some(winner) = winner {
            writeln!(output, "Winner is {winner}")?;
        }
        Ok(winner)
    }
}
