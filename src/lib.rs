//! Hex-MC: the connection game Hex with a Monte Carlo move predictor.
//!
//! ## Modules
//!
//! - [`constants`] - Default search parameters and rendering glyphs
//! - [`error`] - Error taxonomy
//! - [`board`] - Board state, hex adjacency, and win detection
//! - [`playout`] - Random rollouts for leaf evaluation
//! - [`predictor`] - Fixed-depth search tree with minimax over rollout win rates
//! - [`game`] - Turn controller and console session
//!
//! ## Example
//!
//! ```
//! use hex_mc::board::{Board, Player};
//! use hex_mc::predictor::{MovePredictor, PredictorConfig};
//!
//! let mut board = Board::new(4, 4).unwrap();
//! board.apply(1, 1, Player::A);
//!
//! let predictor = MovePredictor::new(PredictorConfig::default());
//! let mut rng = fastrand::Rng::with_seed(42);
//! let (row, col) = predictor.compute_next_move(&mut board, Player::B, &mut rng).unwrap();
//!
//! assert!(board.is_legal(row, col));
//! board.apply(row, col, Player::B);
//! println!("{board}");
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod playout;
pub mod predictor;

pub use error::HexError;
