//! Fixed 5×6 symbol grid

use serde::{Deserialize, Serialize};

use crate::symbols::{Cell, Symbol};

/// Number of rows (row 0 is the top row)
pub const ROWS: usize = 5;
/// Number of columns
pub const COLS: usize = 6;
/// Total cells
pub const CELL_COUNT: usize = ROWS * COLS;

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position if `(row, col)` lies on the grid
    pub const fn checked(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 4-connected neighbours that lie inside the grid
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            Position::checked(row, col)
        })
    }

    /// Every position in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Position { row, col }))
    }
}

/// Immutable grid snapshot
///
/// Serialized as a list of rows, each a list of symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

impl Grid {
    /// Grid where every cell is empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from fully populated rows
    pub fn from_symbols(rows: [[Symbol; COLS]; ROWS]) -> Self {
        Self {
            cells: rows.map(|row| row.map(Cell::Filled)),
        }
    }

    /// Build from raw cells
    pub fn from_cells(cells: [[Cell; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Build by computing each cell from its position
    pub fn from_fn(mut f: impl FnMut(Position) -> Cell) -> Self {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for pos in Position::all() {
            cells[pos.row][pos.col] = f(pos);
        }
        Self { cells }
    }

    /// Cell at `pos`
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the grid; see [`Position::checked`].
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Copy of this grid with one cell replaced
    ///
    /// Panics like [`Grid::get`] for an off-grid position.
    pub fn with_cell(mut self, pos: Position, cell: Cell) -> Self {
        self.cells[pos.row][pos.col] = cell;
        self
    }

    /// Rows, top to bottom
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, col: usize) -> [Cell; ROWS] {
        std::array::from_fn(|row| self.cells[row][col])
    }

    /// `(position, cell)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::all().map(|pos| (pos, self.get(pos)))
    }

    /// Number of cells holding `symbol`
    pub fn count(&self, symbol: Symbol) -> usize {
        self.iter()
            .filter(|(_, cell)| *cell == Cell::Filled(symbol))
            .count()
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.is_empty()).count()
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Symbol names as nested rows (the shape clients consume)
    pub fn to_names(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }
}
