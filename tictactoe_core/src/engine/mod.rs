use crate::error::{EngineError, Result};
use crate::logic::board::{Board, Player};
use crate::logic::rules::{self, GameResult};
use serde::{Deserialize, Serialize};

pub mod alphabeta;
pub mod clock;
pub mod config;
pub mod eval;
pub mod iterative;
pub mod mcts;
pub mod minimax;
pub mod strategy;


/// A chosen position plus the value the searcher assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<f64>,
}

impl Move {
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self {
            position,
            evaluation: None,
        }
    }

    #[must_use]
    pub const fn evaluated(position: usize, evaluation: f64) -> Self {
        Self {
            position,
            evaluation: Some(evaluation),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Plies searched by the last completed pass (MCTS: deepest tree node).
    pub depth: u8,
    /// Nodes visited (MCTS: nodes allocated in the tree).
    pub nodes: u64,
    /// Rollouts run; zero for the minimax family.
    pub simulations: u32,
    pub time_ms: u64,
    /// The time budget ran out and the best result so far was returned.
    pub timed_out: bool,
}

/// Terminal utility used by the minimax family and by MCTS rewards.
pub trait Evaluator {
    fn evaluate(&self, result: GameResult, player: Player) -> i32;
}

pub trait Searcher {
    /// Picks a move for `player` on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMoves`] if the board is already decided,
    /// or [`EngineError::IllegalMove`] if move generation is broken.
    fn search(&mut self, board: &Board, player: Player) -> Result<(Move, SearchStats)>;
}

/// Searchers refuse decided boards instead of returning a meaningless move.
pub(crate) fn ensure_in_progress(board: &Board) -> Result<()> {
    match rules::result(board) {
        GameResult::InProgress => Ok(()),
        result => Err(EngineError::NoLegalMoves { result }),
    }
}

/// Remaining plies on `board`, the depth at which a search reaches every leaf.
pub(crate) fn remaining_plies(board: &Board) -> u8 {
    u8::try_from(board.empty_count()).unwrap_or(u8::MAX)
}
