//! Move prediction: shallow game-tree search with Monte Carlo leaf evaluation.
//!
//! A call to [`MovePredictor::compute_next_move`] runs in three passes over a
//! tree that lives only for that call:
//!
//! 1. **Construction** - expand every empty cell at every ply down to the
//!    effective depth. Cells on the current path are temporarily occupied so
//!    they are excluded from deeper plies.
//! 2. **Rollouts** - descend the tree again, this time placing each ply's move
//!    for the player who would actually make it, and run the configured number
//!    of random rollouts at every leaf.
//! 3. **Minimax** - leaf win rates for the searching player are combined by
//!    maximising at even plies and minimising at odd plies. The root's
//!    maximising child is the move returned.
//!
//! All temporary placements go through [`Board::scoped`], so the board is
//! restored on every exit path.
//!
//! Branching equals the number of empty cells, so the tree grows
//! combinatorially with depth. Keep the depth small.

use fastrand::Rng;
use tracing::{debug, trace};

use crate::board::{Board, Coord, Player};
use crate::constants::{DEFAULT_DEPTH, DEFAULT_TRIALS};
use crate::error::HexError;
use crate::playout::{run_trials, Tally};

/// Occupant used to mask cells during tree construction. Any player works;
/// the cell is cleared before its parent continues.
const PLACEHOLDER: Player = Player::A;

/// Search parameters, fixed for the lifetime of a predictor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Lookahead depth in plies (at least 1).
    pub depth: usize,
    /// Rollouts per leaf (at least 1).
    pub trials: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            trials: DEFAULT_TRIALS,
        }
    }
}

impl PredictorConfig {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials.max(1);
        self
    }
}

/// A hypothetical position reached from the root by a sequence of moves.
///
/// Each node owns its children; nothing is shared between branches.
#[derive(Clone, Debug, Default)]
pub struct SearchNode {
    /// The move this node represents (`None` for the root)
    pub mv: Option<Coord>,
    /// One child per cell still empty along this path
    pub children: Vec<SearchNode>,
    /// Rollout results (leaves only)
    pub tally: Tally,
}

impl SearchNode {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(mv: Coord) -> Self {
        Self {
            mv: Some(mv),
            ..Self::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(SearchNode::size).sum::<usize>()
    }

    pub fn leaves(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(SearchNode::leaves).sum()
        }
    }

    #[inline]
    pub fn win_rate(&self, player: Player) -> f64 {
        self.tally.win_rate(player)
    }
}

/// Build a search tree `depth` plies deep below an unlabeled root.
///
/// Children are created in row-major order of the empty cells. The board is
/// left unchanged.
pub fn build_tree(board: &mut Board, depth: usize) -> SearchNode {
    let mut root = SearchNode::root();
    expand(board, &mut root, depth);
    root
}

fn expand(board: &mut Board, node: &mut SearchNode, remaining: usize) {
    if remaining == 0 {
        return;
    }
    for cell in board.empty_cells() {
        let mut child = SearchNode::new(cell);
        {
            let mut scope = board.scoped();
            scope.place(cell, PLACEHOLDER);
            expand(&mut scope, &mut child, remaining - 1);
        }
        node.children.push(child);
    }
}

/// Descend the tree placing each ply's move for the player making it, and
/// run `trials` rollouts at every leaf.
///
/// `mover` is the player whose move the node's children represent.
pub fn run_rollouts(
    board: &mut Board,
    node: &mut SearchNode,
    mover: Player,
    trials: usize,
    rng: &mut Rng,
) {
    if node.is_leaf() {
        node.tally = run_trials(board, mover, trials, rng);
        trace!(mv = ?node.mv, a = node.tally.a_wins, b = node.tally.b_wins, "leaf evaluated");
        return;
    }

    for child in &mut node.children {
        let Some(cell) = child.mv else { continue };
        let mut scope = board.scoped();
        scope.place(cell, mover);
        run_rollouts(&mut scope, child, mover.opponent(), trials, rng);
    }
}

/// Minimax value of `node` for `player`.
pub fn minimax(node: &SearchNode, player: Player, maximizing: bool) -> f64 {
    if node.is_leaf() {
        return node.win_rate(player);
    }
    let values = node
        .children
        .iter()
        .map(|child| minimax(child, player, !maximizing));
    if maximizing {
        values.fold(f64::NEG_INFINITY, f64::max)
    } else {
        values.fold(f64::INFINITY, f64::min)
    }
}

/// Pick the root's maximising child for `player`.
///
/// Ties keep the first child encountered, i.e. the earliest cell in row-major
/// order. Returns the move and its value.
pub fn choose_move(root: &SearchNode, player: Player) -> Option<(Coord, f64)> {
    let mut best: Option<(Coord, f64)> = None;
    for child in &root.children {
        let Some(cell) = child.mv else { continue };
        let value = minimax(child, player, false);
        if best.is_none_or(|(_, v)| value > v) {
            best = Some((cell, value));
        }
    }
    best
}

/// Chooses moves with a fixed-depth search and rollout evaluation.
#[derive(Clone, Debug, Default)]
pub struct MovePredictor {
    config: PredictorConfig,
}

impl MovePredictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config: PredictorConfig::default()
                .with_depth(config.depth)
                .with_trials(config.trials),
        }
    }

    pub fn config(&self) -> PredictorConfig {
        self.config
    }

    /// Choose a legal move for `player`.
    ///
    /// The board is used as scratch space during the search and is restored
    /// before returning. Fails with [`HexError::NoLegalMoves`] on a full board.
    pub fn compute_next_move(
        &self,
        board: &mut Board,
        player: Player,
        rng: &mut Rng,
    ) -> Result<Coord, HexError> {
        let empty = board.empty_cells().len();
        if empty == 0 {
            return Err(HexError::NoLegalMoves);
        }
        let depth = self.config.depth.min(empty);

        let mut root = build_tree(board, depth);
        debug!(
            depth,
            nodes = root.size(),
            leaves = root.leaves(),
            "search tree built"
        );

        run_rollouts(board, &mut root, player, self.config.trials, rng);

        let (cell, value) = choose_move(&root, player).ok_or(HexError::NoLegalMoves)?;
        debug!(%player, row = cell.0, col = cell.1, value, "move chosen");
        Ok(cell)
    }
}

/// One-shot form of [`MovePredictor::compute_next_move`].
pub fn compute_next_move(
    board: &mut Board,
    player: Player,
    depth: usize,
    trials: usize,
    rng: &mut Rng,
) -> Result<Coord, HexError> {
    let config = PredictorConfig::default()
        .with_depth(depth)
        .with_trials(trials);
    MovePredictor::new(config).compute_next_move(board, player, rng)
}
