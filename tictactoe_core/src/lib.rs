//! Move selection for 3x3 tic-tac-toe.
//!
//! [`logic`] holds the board model and rules. [`engine`] holds the four
//! searchers (minimax, alpha-beta, iterative deepening and MCTS) behind the
//! [`engine::Searcher`] trait, plus the dispatcher in [`engine::strategy`]
//! that picks one by name.
//!
//! ```
//! use tictactoe_core::{select_move, Board, Player, SearchConfig};
//!
//! let board: Board = "XX./OO./...".parse().unwrap();
//! let mv = select_move(&board, Player::X, "alphabeta", &SearchConfig::default()).unwrap();
//! assert_eq!(mv.position, 2);
//! ```

pub mod engine;
pub mod error;
pub mod logic;

pub use engine::config::SearchConfig;
pub use engine::strategy::{select_move, select_move_for, select_move_with_stats, Algorithm};
pub use engine::{Move, SearchStats};
pub use error::{EngineError, Result};
pub use logic::board::{Board, Cell, Player, BOARD_SIZE};
pub use logic::rules::GameResult;
