//! Monte Carlo rollouts (random completion of the board).
//!
//! A rollout fills every remaining empty cell in a uniformly random order,
//! alternating players. Hex cannot end in a draw, so on the filled board
//! exactly one player is connected and checking player A alone decides the
//! result. The board must be completely filled before that check.

use fastrand::Rng;

use crate::board::{Board, Coord, Player};

/// Win counts accumulated over a batch of rollouts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub a_wins: u32,
    pub b_wins: u32,
}

impl Tally {
    pub fn record(&mut self, winner: Player) {
        match winner {
            Player::A => self.a_wins += 1,
            Player::B => self.b_wins += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.a_wins + self.b_wins
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::A => self.a_wins,
            Player::B => self.b_wins,
        }
    }

    /// Fraction of recorded rollouts won by `player` (0.0 when nothing was recorded).
    #[inline]
    pub fn win_rate(&self, player: Player) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.wins(player) as f64 / n as f64,
        }
    }
}

/// Play one rollout over `cells` (the board's empty cells) with `first` to move.
///
/// `cells` is reshuffled in place. Every cell placed is cleared again before
/// returning.
pub fn rollout(board: &mut Board, cells: &mut [Coord], first: Player, rng: &mut Rng) -> Player {
    rng.shuffle(cells);

    let mut scope = board.scoped();
    let mut player = first;
    for &cell in cells.iter() {
        scope.place(cell, player);
        player = player.opponent();
    }
    debug_assert!(scope.is_full());

    if scope.is_connected(Player::A) {
        Player::A
    } else {
        Player::B
    }
}

/// Run `trials` independent rollouts from the current position.
pub fn run_trials(board: &mut Board, first: Player, trials: usize, rng: &mut Rng) -> Tally {
    let mut cells = board.empty_cells();
    let mut tally = Tally::default();
    for _ in 0..trials {
        tally.record(rollout(board, &mut cells, first, rng));
    }
    tally
}
