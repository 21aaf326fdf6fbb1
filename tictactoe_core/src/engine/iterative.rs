use crate::engine::alphabeta::AlphaBetaSearcher;
use crate::engine::clock::Deadline;
use crate::engine::config::SearchConfig;
use crate::engine::eval::TerminalEvaluator;
use crate::engine::{ensure_in_progress, remaining_plies, Evaluator, Move, SearchStats, Searcher};
use crate::error::{EngineError, Result};
use crate::logic::board::{Board, Player};
use crate::logic::rules;
use std::sync::Arc;

/// Alpha-beta passes at depth 1, 2, 3, ... under the configured depth and
/// time budget. The depth-1 pass always completes, so a move is always found.
pub struct IterativeDeepeningSearcher<E: Evaluator = TerminalEvaluator> {
    config: Arc<SearchConfig>,
    inner: AlphaBetaSearcher<E>,
}

impl IterativeDeepeningSearcher {
    #[must_use]
    pub fn new(config: Arc<SearchConfig>) -> Self {
        Self {
            config,
            inner: AlphaBetaSearcher::new(),
        }
    }
}

impl<E: Evaluator> Searcher for IterativeDeepeningSearcher<E> {
    fn search(&mut self, board: &Board, player: Player) -> Result<(Move, SearchStats)> {
        ensure_in_progress(board)?;
        let deadline = Deadline::start(self.config.time_budget_ms);
        let target_depth = self.config.max_depth().min(remaining_plies(board));

        let mut best_move = None;
        let mut stats = SearchStats::default();

        for depth in 1..=target_depth {
            // Check the budget before starting a new depth
            if depth > 1 && deadline.expired() {
                stats.timed_out = true;
                break;
            }

            let pass_deadline = (depth > 1).then_some(deadline);
            let pass = self
                .inner
                .search_depth(board, player, depth, pass_deadline)?;
            stats.nodes += self.inner.nodes_searched();

            match pass {
                Some(mv) => {
                    best_move = Some(mv);
                    stats.depth = depth;
                }
                None => {
                    stats.timed_out = true;
                    break;
                }
            }
        }

        stats.time_ms = deadline.elapsed_whole_ms();
        if stats.timed_out {
            log::warn!(
                "ids: time budget of {:?} ms ran out, returning depth {} result",
                self.config.time_budget_ms,
                stats.depth
            );
        }

        let mv = best_move.ok_or(EngineError::NoLegalMoves {
            result: rules::result(board),
        })?;
        log::debug!(
            "ids: position {} depth {} ({} nodes, {} ms)",
            mv.position,
            stats.depth,
            stats.nodes,
            stats.time_ms
        );
        Ok((mv, stats))
    }
}
