use crate::engine::alphabeta::AlphaBetaSearcher;
use crate::engine::config::SearchConfig;
use crate::engine::iterative::IterativeDeepeningSearcher;
use crate::engine::mcts::MctsSearcher;
use crate::engine::minimax::MinimaxSearcher;
use crate::engine::{Move, SearchStats, Searcher};
use crate::error::{EngineError, Result};
use crate::logic::board::{Board, Player};
use crate::logic::rules::{self, GameResult};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The search strategies a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    IterativeDeepening,
    Mcts,
}

impl Algorithm {
    pub const ALL: [Self; 4] = [
        Self::Minimax,
        Self::AlphaBeta,
        Self::IterativeDeepening,
        Self::Mcts,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minimax => "minimax",
            Self::AlphaBeta => "alphabeta",
            Self::IterativeDeepening => "ids",
            Self::Mcts => "mcts",
        }
    }

    /// Builds a fresh searcher. Searchers carry per-search state only.
    #[must_use]
    pub fn searcher(self, config: Arc<SearchConfig>) -> Box<dyn Searcher> {
        match self {
            Self::Minimax => Box::new(MinimaxSearcher::new()),
            Self::AlphaBeta => Box::new(AlphaBetaSearcher::new()),
            Self::IterativeDeepening => Box::new(IterativeDeepeningSearcher::new(config)),
            Self::Mcts => Box::new(MctsSearcher::new(config)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    /// Accepts exactly the names returned by [`Algorithm::name`].
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_string()))
    }
}

/// Picks a move for `player` using the named algorithm.
///
/// Checks run in a fixed order: board validity and turn, then whether the
/// game is already over, then the algorithm name.
///
/// # Errors
///
/// - [`EngineError::InvalidBoard`] if the board breaks the mark-count or
///   single-winner rules, or `player` is not the side to move.
/// - [`EngineError::NoLegalMoves`] if the game is already decided.
/// - [`EngineError::UnknownAlgorithm`] if `algorithm` is not recognised.
pub fn select_move(
    board: &Board,
    player: Player,
    algorithm: &str,
    config: &SearchConfig,
) -> Result<Move> {
    select_move_with_stats(board, player, algorithm, config).map(|(mv, _)| mv)
}

/// [`select_move`] that also reports how the search went.
///
/// # Errors
///
/// Same as [`select_move`].
pub fn select_move_with_stats(
    board: &Board,
    player: Player,
    algorithm: &str,
    config: &SearchConfig,
) -> Result<(Move, SearchStats)> {
    rules::validate(board)?;
    let to_move = board.to_move();
    if player != to_move {
        return Err(EngineError::invalid_board(format!(
            "it is {to_move}'s turn, not {player}'s"
        )));
    }

    let result = rules::result(board);
    if result != GameResult::InProgress {
        return Err(EngineError::NoLegalMoves { result });
    }

    let algorithm: Algorithm = algorithm.parse()?;
    run(board, player, algorithm, config)
}

/// [`select_move_with_stats`] for whichever player is to move on `board`.
///
/// # Errors
///
/// Same as [`select_move`], minus the turn check.
pub fn select_move_for(
    board: &Board,
    algorithm: &str,
    config: &SearchConfig,
) -> Result<(Move, SearchStats)> {
    select_move_with_stats(board, board.to_move(), algorithm, config)
}

/// Runs an already parsed algorithm. The board must be valid and in progress.
///
/// # Errors
///
/// Propagates the searcher's error.
pub fn run(
    board: &Board,
    player: Player,
    algorithm: Algorithm,
    config: &SearchConfig,
) -> Result<(Move, SearchStats)> {
    let mut searcher = algorithm.searcher(Arc::new(config.clone()));
    let (mv, stats) = searcher.search(board, player)?;
    log::debug!(
        "{algorithm}: selected {} (evaluation {:?}, depth {}, {} nodes, {} simulations, {} ms)",
        mv.position,
        mv.evaluation,
        stats.depth,
        stats.nodes,
        stats.simulations,
        stats.time_ms
    );
    Ok((mv, stats))
}
