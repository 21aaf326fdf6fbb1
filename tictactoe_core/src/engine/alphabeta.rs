use crate::engine::clock::Deadline;
use crate::engine::eval::{TerminalEvaluator, DRAW_SCORE, SCORE_INFINITY};
use crate::engine::{ensure_in_progress, remaining_plies, Evaluator, Move, SearchStats, Searcher};
use crate::error::{EngineError, Result};
use crate::logic::board::{Board, Player};
use crate::logic::rules::{self, GameResult};

/// Negamax with fail-soft alpha-beta pruning.
///
/// Gives the same `(position, evaluation)` as [`super::minimax::MinimaxSearcher`]
/// on every board: the root window is unbounded and a root move is only
/// adopted on a strictly better score, so every adopted score is exact and
/// ties keep the lowest position.
#[derive(Debug, Default)]
pub struct AlphaBetaSearcher<E: Evaluator = TerminalEvaluator> {
    evaluator: E,
    nodes_searched: u64,
    deadline: Option<Deadline>,
}

impl AlphaBetaSearcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Evaluator> AlphaBetaSearcher<E> {
    #[must_use]
    pub const fn with_evaluator(evaluator: E) -> Self {
        Self {
            evaluator,
            nodes_searched: 0,
            deadline: None,
        }
    }

    /// Nodes visited by the most recent pass.
    #[must_use]
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// One pass bounded to `depth` plies (at least 1). Non-terminal boards at
    /// the bound score as a draw.
    ///
    /// Returns `Ok(None)` when `deadline` expires mid-pass; the partial result
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMoves`] for a decided board.
    pub fn search_depth(
        &mut self,
        board: &Board,
        player: Player,
        depth: u8,
        deadline: Option<Deadline>,
    ) -> Result<Option<Move>> {
        ensure_in_progress(board)?;
        self.nodes_searched = 1;
        self.deadline = deadline;
        let depth = depth.max(1);

        let mut alpha = -SCORE_INFINITY;
        let beta = SCORE_INFINITY;
        let mut best: Option<(usize, i32)> = None;

        for position in rules::legal_moves(board) {
            let child = rules::apply(board, position, player)?;
            let Some(value) =
                self.alpha_beta(&child, player.opposite(), depth - 1, -beta, -alpha)?
            else {
                return Ok(None);
            };
            let score = -value;
            let improves = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improves {
                best = Some((position, score));
                alpha = alpha.max(score);
            }
        }

        Ok(best.map(|(position, score)| Move::evaluated(position, f64::from(score))))
    }

    #[allow(clippy::manual_is_multiple_of)]
    fn check_time(&self) -> bool {
        if let Some(deadline) = &self.deadline {
            if self.nodes_searched % 1024 == 0 {
                return deadline.expired();
            }
        }
        false
    }

    /// `None` means the deadline hit and the whole pass must be abandoned.
    fn alpha_beta(
        &mut self,
        board: &Board,
        turn: Player,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> Result<Option<i32>> {
        self.nodes_searched += 1;
        if self.check_time() {
            return Ok(None);
        }

        let result = rules::result(board);
        if result != GameResult::InProgress {
            return Ok(Some(self.evaluator.evaluate(result, turn)));
        }
        if depth == 0 {
            return Ok(Some(DRAW_SCORE));
        }

        let mut best = -SCORE_INFINITY;
        for position in rules::legal_moves(board) {
            let child = rules::apply(board, position, turn)?;
            let Some(value) = self.alpha_beta(&child, turn.opposite(), depth - 1, -beta, -alpha)?
            else {
                return Ok(None);
            };
            let score = -value;
            if score > best {
                best = score;
                alpha = alpha.max(score);
            }
            if alpha >= beta {
                break;
            }
        }
        Ok(Some(best))
    }
}

impl<E: Evaluator> Searcher for AlphaBetaSearcher<E> {
    fn search(&mut self, board: &Board, player: Player) -> Result<(Move, SearchStats)> {
        let clock = Deadline::unbounded();
        let depth = remaining_plies(board);
        // only a deadline aborts a pass, and none is set here
        let Some(mv) = self.search_depth(board, player, depth, None)? else {
            return Err(EngineError::NoLegalMoves {
                result: rules::result(board),
            });
        };

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: clock.elapsed_whole_ms(),
            ..SearchStats::default()
        };
        log::debug!(
            "alphabeta: position {} ({} nodes, {} ms)",
            mv.position,
            stats.nodes,
            stats.time_ms
        );
        Ok((mv, stats))
    }
}
