use crate::error::{EngineError, Result};
use crate::logic::rules;
use std::fmt;
use std::str::FromStr;

/// Number of cells on the board, indexed row-major 0..=8.
pub const BOARD_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::X => 'X',
            Self::O => 'O',
        }
    }

    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' | '-' | '_' | ' ' => Some(Self::Empty),
            'X' | 'x' => Some(Self::X),
            'O' | 'o' => Some(Self::O),
            _ => None,
        }
    }

    /// The player whose mark this is, if any.
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::X => Some(Player::X),
            Self::O => Some(Player::O),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    #[must_use]
    pub const fn mark(self) -> Cell {
        match self {
            Self::X => Cell::X,
            Self::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark().symbol())
    }
}

/// A 3x3 board. Boards are small `Copy` values; every rule returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Builds a board from raw cells without checking the mark-count invariant.
    /// Use [`rules::validate`] before searching it.
    #[must_use]
    pub const fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Parses wire cells (`"X"`, `"O"` or `null`) into a validated board.
    /// Symbols must match exactly: no case folding, no surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBoard`] on a wrong cell count, an unknown
    /// symbol, or a board that breaks the mark-count or single-winner rules.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[Option<S>]) -> Result<Self> {
        if symbols.len() != BOARD_SIZE {
            return Err(EngineError::invalid_board(format!(
                "expected {BOARD_SIZE} cells, got {}",
                symbols.len()
            )));
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (position, (cell, symbol)) in cells.iter_mut().zip(symbols).enumerate() {
            let Some(symbol) = symbol else {
                continue;
            };
            *cell = match symbol.as_ref() {
                "X" => Cell::X,
                "O" => Cell::O,
                other => {
                    return Err(EngineError::invalid_board(format!(
                        "invalid cell value '{other}' at position {position}"
                    )))
                }
            };
        }

        let board = Self { cells };
        rules::validate(&board)?;
        Ok(board)
    }

    #[must_use]
    pub const fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Cell at `position`, or `None` when the position is off the board.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<Cell> {
        self.cells.get(position).copied()
    }

    /// Returns a copy with `position` set to `cell`; `None` if off the board.
    pub(crate) fn with_cell(mut self, position: usize, cell: Cell) -> Option<Self> {
        *self.cells.get_mut(position)? = cell;
        Some(self)
    }

    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.count(Cell::Empty)
    }

    /// Player to move, derived from the mark counts: X moves first and the
    /// players alternate, so O is to move exactly when X has one more mark.
    #[must_use]
    pub fn to_move(&self) -> Player {
        if self.count(Cell::X) > self.count(Cell::O) {
            Player::O
        } else {
            Player::X
        }
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parses nine symbols such as `"XO./.X./..O"`. Row separators (`/`) and
    /// line breaks are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::with_capacity(BOARD_SIZE);
        for c in s.chars().filter(|c| !matches!(c, '/' | '\n' | '\r')) {
            let cell = Cell::from_symbol(c)
                .ok_or_else(|| EngineError::invalid_board(format!("invalid cell symbol '{c}'")))?;
            cells.push(cell);
        }

        let cells: [Cell; BOARD_SIZE] = cells.try_into().map_err(|cells: Vec<Cell>| {
            EngineError::invalid_board(format!(
                "expected {BOARD_SIZE} cells, got {}",
                cells.len()
            ))
        })?;

        let board = Self { cells };
        rules::validate(&board)?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
