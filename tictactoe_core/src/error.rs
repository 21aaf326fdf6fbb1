//! Error types for the move-selection engine.

use crate::logic::rules::GameResult;
use thiserror::Error;

/// Everything that can go wrong between receiving a board and returning a move.
///
/// Search timeouts are not errors: IDS and MCTS degrade to their best result
/// so far and flag it in [`crate::engine::SearchStats::timed_out`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("illegal move: position {position} is out of range or already occupied")]
    IllegalMove { position: usize },

    #[error("no legal moves: game is already over ({result})")]
    NoLegalMoves { result: GameResult },

    #[error("unknown algorithm '{0}' (expected one of: minimax, alphabeta, ids, mcts)")]
    UnknownAlgorithm(String),
}

impl EngineError {
    pub(crate) fn invalid_board(reason: impl Into<String>) -> Self {
        Self::InvalidBoard {
            reason: reason.into(),
        }
    }

    /// Stable name of the error variant, used as the error kind on the wire.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidBoard { .. } => "InvalidBoard",
            Self::IllegalMove { .. } => "IllegalMove",
            Self::NoLegalMoves { .. } => "NoLegalMoves",
            Self::UnknownAlgorithm(_) => "UnknownAlgorithm",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
