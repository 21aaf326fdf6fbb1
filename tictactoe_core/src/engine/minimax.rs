use crate::engine::clock::Deadline;
use crate::engine::eval::TerminalEvaluator;
use crate::engine::{ensure_in_progress, remaining_plies, Evaluator, Move, SearchStats, Searcher};
use crate::error::{EngineError, Result};
use crate::logic::board::{Board, Player};
use crate::logic::rules::{self, GameResult};

/// Exhaustive negamax. Visits the whole game tree below the given board.
#[derive(Debug, Default)]
pub struct MinimaxSearcher<E: Evaluator = TerminalEvaluator> {
    evaluator: E,
    nodes_searched: u64,
}

impl MinimaxSearcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Evaluator> MinimaxSearcher<E> {
    #[must_use]
    pub const fn with_evaluator(evaluator: E) -> Self {
        Self {
            evaluator,
            nodes_searched: 0,
        }
    }

    /// Value of `board` for `turn`, the player about to move.
    fn negamax(&mut self, board: &Board, turn: Player) -> Result<i32> {
        self.nodes_searched += 1;

        let result = rules::result(board);
        if result != GameResult::InProgress {
            return Ok(self.evaluator.evaluate(result, turn));
        }

        let mut best = i32::MIN;
        for position in rules::legal_moves(board) {
            let child = rules::apply(board, position, turn)?;
            let score = -self.negamax(&child, turn.opposite())?;
            best = best.max(score);
        }
        Ok(best)
    }
}

impl<E: Evaluator> Searcher for MinimaxSearcher<E> {
    fn search(&mut self, board: &Board, player: Player) -> Result<(Move, SearchStats)> {
        ensure_in_progress(board)?;
        let deadline = Deadline::unbounded();
        self.nodes_searched = 1;

        let mut best: Option<(usize, i32)> = None;
        for position in rules::legal_moves(board) {
            let child = rules::apply(board, position, player)?;
            let score = -self.negamax(&child, player.opposite())?;
            // strict comparison keeps the lowest position on ties
            let improves = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improves {
                best = Some((position, score));
            }
        }

        let (position, score) = best.ok_or(EngineError::NoLegalMoves {
            result: rules::result(board),
        })?;
        let stats = SearchStats {
            depth: remaining_plies(board),
            nodes: self.nodes_searched,
            time_ms: deadline.elapsed_whole_ms(),
            ..SearchStats::default()
        };
        log::debug!(
            "minimax: position {position} score {score} ({} nodes, {} ms)",
            stats.nodes,
            stats.time_ms
        );
        Ok((Move::evaluated(position, f64::from(score)), stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(s: &str) -> (Move, SearchStats) {
        let board: Board = s.parse().unwrap();
        MinimaxSearcher::new()
            .search(&board, board.to_move())
            .unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let (mv, _) = search("XX./OO./...");
        assert_eq!(mv, Move::evaluated(2, 1.0));
    }

    #[test]
    fn test_blocks_threat() {
        // O threatens the top row; X must take 2.
        let (mv, _) = search("OO./X../X..");
        assert_eq!(mv.position, 2);
    }

    #[test]
    fn test_forced_loss_keeps_lowest_position() {
        // Blocking 8 only delays the loss: X answers with 6 and a double threat.
        let (mv, _) = search("XO./.X./...");
        assert_eq!(mv, Move::evaluated(2, -1.0));
    }

    #[test]
    fn test_single_empty_cell() {
        let (mv, stats) = search("XOX/XOO/OX.");
        assert_eq!(mv.position, 8);
        assert_eq!(mv.evaluation, Some(0.0));
        assert_eq!(stats.depth, 1);
        assert_eq!(stats.nodes, 2);
    }

    #[test]
    fn test_rejects_finished_board() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        let err = MinimaxSearcher::new()
            .search(&board, Player::O)
            .unwrap_err();
        assert!(matches!(err, EngineError::NoLegalMoves { .. }));
    }

    struct Indifferent;

    impl Evaluator for Indifferent {
        fn evaluate(&self, _result: GameResult, _player: Player) -> i32 {
            0
        }
    }

    #[test]
    fn test_custom_evaluator_changes_the_choice() {
        // O wins at 5; an evaluator that scores every outcome 0 falls back to the lowest cell.
        let board: Board = "X.X/OO./.X.".parse().unwrap();
        let (mv, _) = MinimaxSearcher::new().search(&board, Player::O).unwrap();
        assert_eq!(mv, Move::evaluated(5, 1.0));

        let (mv, _) = MinimaxSearcher::with_evaluator(Indifferent)
            .search(&board, Player::O)
            .unwrap();
        assert_eq!(mv, Move::evaluated(1, 0.0));
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let (mv, stats) = search(".........");
        assert_eq!(mv, Move::evaluated(0, 0.0));
        assert_eq!(stats.depth, 9);
        assert!(stats.nodes > 500_000);
    }
}
