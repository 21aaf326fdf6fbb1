use crate::engine::Evaluator;
use crate::logic::board::Player;
use crate::logic::rules::GameResult;

pub const WIN_SCORE: i32 = 1;
pub const LOSS_SCORE: i32 = -1;
pub const DRAW_SCORE: i32 = 0;

/// Window bound for alpha-beta; strictly outside every reachable score.
pub const SCORE_INFINITY: i32 = 1_000;

/// Scores finished games only. Tic-tac-toe is small enough that every search
/// reaches terminal boards or a configured depth bound, so no heuristic is
/// needed for positions still in play.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalEvaluator;

impl Evaluator for TerminalEvaluator {
    fn evaluate(&self, result: GameResult, player: Player) -> i32 {
        debug_assert!(
            result.is_terminal(),
            "evaluate called on a game still in progress"
        );
        match result.winner() {
            Some(winner) if winner == player => WIN_SCORE,
            Some(_) => LOSS_SCORE,
            None => DRAW_SCORE,
        }
    }
}
