//! Integration tests for hex-mc
//!
//! End-to-end scenarios across the board, the predictor and the game
//! controller: win detection on filled boards, legality and restoration
//! guarantees of the predictor, and graceful narrowing of the search.

use fastrand::Rng;

use hex_mc::HexError;
use hex_mc::board::{Board, Player};
use hex_mc::game::Game;
use hex_mc::predictor::{MovePredictor, PredictorConfig, compute_next_move};

// =============================================================================
// Helper functions
// =============================================================================

/// Fill every empty cell of `board` with random owners.
fn fill_randomly(board: &mut Board, rng: &mut Rng) {
    for (r, c) in board.empty_cells() {
        let p = if rng.bool() { Player::A } else { Player::B };
        board.apply(r, c, p);
    }
}

/// Build a board from rows of `X` (player A), `O` (player B) and `.` (empty).
fn board_from(rows: &[&str]) -> Board {
    let mut board = Board::new(rows.len(), rows[0].len()).unwrap();
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            match ch {
                'X' => board.apply(r, c, Player::A),
                'O' => board.apply(r, c, Player::B),
                _ => {}
            }
        }
    }
    board
}

fn owners(board: &Board) -> Vec<Option<Player>> {
    (0..board.rows())
        .flat_map(|r| (0..board.columns()).map(move |c| (r, c)))
        .map(|(r, c)| board.owner(r, c))
        .collect()
}

// =============================================================================
// Board properties
// =============================================================================

#[test]
fn test_no_draw_on_random_filled_boards() {
    let mut rng = Rng::with_seed(2024);
    for (rows, cols) in [(2, 2), (3, 5), (5, 3), (6, 6), (9, 4)] {
        for _ in 0..50 {
            let mut board = Board::new(rows, cols).unwrap();
            fill_randomly(&mut board, &mut rng);
            let a = board.check_connected(Player::A);
            let b = board.check_connected(Player::B);
            assert!(a ^ b, "{rows}x{cols} board had a={a} b={b}:\n{board}");
        }
    }
}

#[test]
fn test_connectivity_is_deterministic() {
    let mut rng = Rng::with_seed(77);
    let mut board = Board::new(5, 5).unwrap();
    fill_randomly(&mut board, &mut rng);

    for player in [Player::A, Player::B] {
        let first = board.check_connected(player);
        let winner = board.winner();
        let second = board.check_connected(player);
        assert_eq!(first, second);
        assert_eq!(board.winner(), winner);
    }
}

#[test]
fn test_scenario_a_two_by_two() {
    let mut board = Board::new(2, 2).unwrap();
    board.apply(0, 0, Player::A);
    board.apply(1, 1, Player::B);
    assert!(!board.check_connected(Player::A));
    assert!(!board.check_connected(Player::B));

    for (fill_a, fill_b) in [((0, 1), (1, 0)), ((1, 0), (0, 1))] {
        let mut filled = board.clone();
        filled.apply(fill_a.0, fill_a.1, Player::A);
        filled.apply(fill_b.0, fill_b.1, Player::B);
        let a = filled.check_connected(Player::A);
        let b = filled.check_connected(Player::B);
        assert!(a ^ b);
    }
}

#[test]
fn test_scenario_c_last_cell_completes_path() {
    // Row 1 is the only A path and (1, 2) is its gap.
    let mut board = board_from(&["OOOO", "XX.X", "OOOO"]);
    assert!(!board.check_connected(Player::A));
    assert!(!board.check_connected(Player::B));
    assert!(board.is_legal(1, 2));

    board.apply(1, 2, Player::A);
    assert!(board.check_connected(Player::A));
    assert_eq!(board.winner(), Some(Player::A));
}

#[test]
fn test_scenario_c_all_a_but_one() {
    // Every cell belongs to A except the bottom-right one.
    let mut board = Board::new(4, 4).unwrap();
    for (r, c) in board.empty_cells() {
        if (r, c) != (3, 3) {
            board.apply(r, c, Player::A);
        }
    }
    assert!(board.is_legal(3, 3));
    board.apply(3, 3, Player::A);
    assert!(board.check_connected(Player::A));
    assert!(!board.check_connected(Player::B));
}

// =============================================================================
// Predictor
// =============================================================================

#[test]
fn test_scenario_b_three_by_three() {
    let mut board = Board::new(3, 3).unwrap();
    let mut rng = Rng::with_seed(10);
    let (row, col) = compute_next_move(&mut board, Player::B, 2, 10, &mut rng).unwrap();
    assert!(row < 3 && col < 3);
    assert!(board.is_legal(row, col));
}

#[test]
fn test_scenario_d_single_empty_cell() {
    let mut board = board_from(&["XO", "O."]);
    let predictor = MovePredictor::new(PredictorConfig::default().with_depth(2));
    let mut rng = Rng::with_seed(0);
    let cell = predictor
        .compute_next_move(&mut board, Player::A, &mut rng)
        .unwrap();
    assert_eq!(cell, (1, 1));
}

#[test]
fn test_full_board_fails_with_no_legal_moves() {
    let mut board = board_from(&["XO", "OX"]);
    let mut rng = Rng::with_seed(0);
    assert_eq!(
        compute_next_move(&mut board, Player::B, 2, 10, &mut rng),
        Err(HexError::NoLegalMoves)
    );
}

#[test]
fn test_predictor_restores_board() {
    let mut board = board_from(&["X...", ".O..", "..X.", "...O"]);
    let mut rng = Rng::with_seed(123);
    let before = board.clone();
    let rendered = board.render();

    for player in [Player::A, Player::B] {
        let (row, col) = compute_next_move(&mut board, player, 2, 5, &mut rng).unwrap();
        assert!(board.is_legal(row, col));
    }

    assert_eq!(owners(&board), owners(&before));
    assert_eq!(board.render(), rendered);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_predictor_keeps_recorded_winner() {
    // A has already connected; the predictor must not disturb the record.
    let mut board = board_from(&["XXX", "...", "O.."]);
    assert!(board.check_connected(Player::A));
    let mut rng = Rng::with_seed(9);
    compute_next_move(&mut board, Player::B, 2, 4, &mut rng).unwrap();
    assert_eq!(board.winner(), Some(Player::A));
}

#[test]
fn test_predictor_is_reproducible_with_seed() {
    let board = board_from(&["X....", ".....", "..O..", ".....", "....."]);
    let predictor = MovePredictor::new(PredictorConfig::default());

    let mut first_board = board.clone();
    let mut second_board = board.clone();
    let first = predictor.compute_next_move(&mut first_board, Player::A, &mut Rng::with_seed(5));
    let second = predictor.compute_next_move(&mut second_board, Player::A, &mut Rng::with_seed(5));
    assert_eq!(first, second);
}

#[test]
fn test_predictor_finds_winning_move_for_a() {
    // Two empty cells: (0,2) connects X through (1,1); (0,0) loses.
    let mut board = board_from(&[".O.", "XXO"]);
    let mut rng = Rng::with_seed(1);
    let cell = compute_next_move(&mut board, Player::A, 2, 10, &mut rng).unwrap();
    assert_eq!(cell, (0, 2));
}

#[test]
fn test_predictor_blocks_for_b() {
    // Same position with B to move: (0,2) is the only cell that stops A.
    let mut board = board_from(&[".O.", "XXO"]);
    let mut rng = Rng::with_seed(1);
    let cell = compute_next_move(&mut board, Player::B, 2, 10, &mut rng).unwrap();
    assert_eq!(cell, (0, 2));
}

#[test]
fn test_depth_one_search() {
    let mut board = board_from(&["X.", ".O"]);
    let mut rng = Rng::with_seed(4);
    let cell = compute_next_move(&mut board, Player::A, 1, 3, &mut rng).unwrap();
    assert!(board.is_legal(cell.0, cell.1));
}

// =============================================================================
// Game flow
// =============================================================================

#[test]
fn test_robot_games_always_finish() {
    for seed in 0..5 {
        let config = PredictorConfig::default().with_trials(3);
        let mut game = Game::new(3, 4, None, config, Rng::with_seed(seed)).unwrap();
        let winner = game.self_play().unwrap();

        let mut board = game.board().clone();
        assert!(board.check_connected(winner));
        assert!(!board.check_connected(winner.opponent()));
    }
}
