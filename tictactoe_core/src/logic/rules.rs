use crate::error::{EngineError, Result};
use crate::logic::board::{Board, Cell, Player, BOARD_SIZE};
use std::fmt;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Outcome of a board. Always recomputed from the cells, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    InProgress,
    XWins,
    OWins,
    Draw,
}

impl GameResult {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::XWins => Some(Player::X),
            Self::OWins => Some(Player::O),
            Self::InProgress | Self::Draw => None,
        }
    }

    const fn won_by(player: Player) -> Self {
        match player {
            Player::X => Self::XWins,
            Player::O => Self::OWins,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InProgress => "in progress",
            Self::XWins => "X wins",
            Self::OWins => "O wins",
            Self::Draw => "draw",
        };
        f.write_str(s)
    }
}

/// Every empty position, in ascending order.
#[must_use]
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Cell::Empty)
        .map(|(position, _)| position)
        .collect()
}

/// Returns true if `player` owns all three cells of any line.
#[must_use]
pub fn has_won(board: &Board, player: Player) -> bool {
    let mark = player.mark();
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&position| board.get(position) == Some(mark)))
}

#[must_use]
pub fn result(board: &Board) -> GameResult {
    for line in WINNING_LINES {
        let [a, b, c] = line.map(|position| board.get(position));
        if let Some(player) = a.and_then(Cell::owner) {
            if a == b && a == c {
                return GameResult::won_by(player);
            }
        }
    }

    if board.empty_count() == 0 {
        GameResult::Draw
    } else {
        GameResult::InProgress
    }
}

/// Places `player`'s mark at `position` on a copy of `board`.
///
/// # Errors
///
/// Returns [`EngineError::IllegalMove`] if the position is off the board or
/// already occupied.
pub fn apply(board: &Board, position: usize, player: Player) -> Result<Board> {
    match board.get(position) {
        Some(Cell::Empty) => board
            .with_cell(position, player.mark())
            .ok_or(EngineError::IllegalMove { position }),
        _ => Err(EngineError::IllegalMove { position }),
    }
}

/// Checks the invariants every searchable board must hold.
///
/// # Errors
///
/// Returns [`EngineError::InvalidBoard`] when X does not lead O by 0 or 1
/// marks, when both players have a completed line, or when a line was
/// completed and the other player still moved afterwards.
pub fn validate(board: &Board) -> Result<()> {
    let x_count = board.count(Cell::X);
    let o_count = board.count(Cell::O);

    if !(x_count == o_count || x_count == o_count + 1) {
        return Err(EngineError::invalid_board(format!(
            "invalid mark counts: X={x_count}, O={o_count} (X must equal O or lead by one)"
        )));
    }

    let x_won = has_won(board, Player::X);
    let o_won = has_won(board, Player::O);
    if x_won && o_won {
        return Err(EngineError::invalid_board(
            "both players have a completed line",
        ));
    }

    // The winner made the last move.
    if x_won && x_count == o_count {
        return Err(EngineError::invalid_board("O moved after X had already won"));
    }
    if o_won && x_count > o_count {
        return Err(EngineError::invalid_board("X moved after O had already won"));
    }

    debug_assert_eq!(x_count + o_count + board.empty_count(), BOARD_SIZE);
    Ok(())
}
