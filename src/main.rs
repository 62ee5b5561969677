//! Hex-MC: play Hex against a Monte Carlo robot in the terminal.
//!
//! ## Usage
//!
//! - `hex-mc` - Play on a 5x5 board as player 1
//! - `hex-mc play --rows 7 --columns 7 --player 2` - Choose size and side
//! - `hex-mc selfplay --seed 3` - Watch the robot play itself
//!
//! Set `RUST_LOG=hex_mc=debug` to see search diagnostics on stderr.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hex_mc::board::Player;
use hex_mc::constants::{DEFAULT_DEPTH, DEFAULT_TRIALS};
use hex_mc::game::{Game, Session};
use hex_mc::predictor::PredictorConfig;

/// Hex-MC: the game of Hex against a Monte Carlo robot
#[derive(Parser)]
#[command(name = "hex-mc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the robot
    Play {
        #[command(flatten)]
        game: GameArgs,
        /// Side to play: 1 connects columns, 2 connects rows (1 moves first)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
        player: u8,
    },
    /// Let the robot play both sides
    Selfplay {
        #[command(flatten)]
        game: GameArgs,
    },
}

#[derive(Args, Clone)]
struct GameArgs {
    /// Number of rows (greater than one)
    #[arg(long, default_value_t = 5)]
    rows: usize,
    /// Number of columns (greater than one)
    #[arg(long, default_value_t = 5)]
    columns: usize,
    /// Lookahead depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
    /// Rollouts per leaf
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,
    /// Seed for the rollout RNG (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for GameArgs {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 5,
            depth: DEFAULT_DEPTH,
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl GameArgs {
    fn build(&self, human: Option<Player>) -> anyhow::Result<Game> {
        let config = PredictorConfig::default()
            .with_depth(self.depth)
            .with_trials(self.trials);
        let rng = self.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Game::new(self.rows, self.columns, human, config, rng).context("cannot set up the board")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { game, player }) => run_play(&game, player),
        Some(Commands::Selfplay { game }) => run_selfplay(&game),
        None => run_play(&GameArgs::default(), 1),
    }
}

fn run_play(args: &GameArgs, player: u8) -> anyhow::Result<()> {
    let human = Player::from_number(player).context("player must be 1 or 2")?;
    let mut session = Session::new(args.build(Some(human))?);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

fn run_selfplay(args: &GameArgs) -> anyhow::Result<()> {
    let mut game = args.build(None)?;
    while game.winner().is_none() {
        let player = game.to_move();
        let (row, col) = game.play_robot().context("robot failed to move")?;
        println!("{player} plays [{row}, {col}]");
    }
    println!("\n{}", game.board());
    if let Some(winner) = game.winner() {
        println!("Winner is {winner}");
    }
    Ok(())
}
