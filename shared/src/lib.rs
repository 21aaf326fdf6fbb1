//! JSON types exchanged between the move-selection server and its clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tictactoe_core::{Board, EngineError, Move, SearchConfig, SearchStats, BOARD_SIZE};

/// Body of `POST /api/move`.
///
/// The player to move is not sent; it follows from the mark counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Nine cells, row-major: `"X"`, `"O"` or `null`.
    ///
    /// Kept as raw JSON so a malformed board is reported as an invalid
    /// board rather than a malformed request.
    pub board: Value,
    #[serde(alias = "aiType")]
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SearchConfig>,
}

impl MoveRequest {
    /// Parses and validates the wire board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBoard`] for a non-array board, a cell that
    /// is neither `"X"`, `"O"` nor `null`, or an impossible position.
    pub fn board(&self) -> Result<Board, EngineError> {
        let Value::Array(cells) = &self.board else {
            return Err(invalid_board(format!(
                "board must be an array of {BOARD_SIZE} cells, got {}",
                self.board
            )));
        };
        let symbols = cells
            .iter()
            .enumerate()
            .map(|(position, cell)| match cell {
                Value::Null => Ok(None),
                Value::String(symbol) => Ok(Some(symbol.as_str())),
                other => Err(invalid_board(format!(
                    "invalid cell value {other} at position {position}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_symbols(&symbols)
    }

    /// The request's config layered over `defaults`, with the time budget and
    /// simulation count capped at what `defaults` allows.
    #[must_use]
    pub fn config_over(&self, defaults: &SearchConfig) -> SearchConfig {
        self.config.as_ref().map_or_else(
            || defaults.clone(),
            |config| config.layered_over(defaults).capped_by(defaults),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
}

impl MoveResponse {
    #[must_use]
    pub const fn new(mv: Move, stats: SearchStats) -> Self {
        Self {
            position: mv.position,
            evaluation: mv.evaluation,
            stats: Some(stats),
        }
    }
}

fn invalid_board(reason: String) -> EngineError {
    EngineError::InvalidBoard { reason }
}

impl From<Move> for MoveResponse {
    fn from(mv: Move) -> Self {
        Self {
            position: mv.position,
            evaluation: mv.evaluation,
            stats: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidBoard,
    NoLegalMoves,
    UnknownAlgorithm,
    IllegalMove,
    /// The body was not a well-formed request.
    InvalidRequest,
    Internal,
}

impl From<&EngineError> for ErrorKind {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::InvalidBoard { .. } => Self::InvalidBoard,
            EngineError::NoLegalMoves { .. } => Self::NoLegalMoves,
            EngineError::UnknownAlgorithm(_) => Self::UnknownAlgorithm,
            EngineError::IllegalMove { .. } => Self::IllegalMove,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            error: error.into(),
        }
    }
}

impl From<&EngineError> for ErrorResponse {
    fn from(err: &EngineError) -> Self {
        Self::new(err.into(), err.to_string())
    }
}

impl From<EngineError> for ErrorResponse {
    fn from(err: EngineError) -> Self {
        Self::from(&err)
    }
}
