//! Column gravity: survivors drop to the bottom, gaps rise to the top

use crate::grid::{COLS, Grid, Position, ROWS};
use crate::symbols::Cell;

/// Compacts each column toward the bottom row
#[derive(Debug, Clone, Copy, Default)]
pub struct GravityResolver;

impl GravityResolver {
    pub fn new() -> Self {
        Self
    }

    /// Copy of `grid` with each column compacted
    ///
    /// Relative vertical order of surviving cells is preserved.
    pub fn apply(&self, grid: &Grid) -> Grid {
        let mut cells = [[Cell::Empty; COLS]; ROWS];

        for col in 0..COLS {
            let mut write_row = ROWS;
            for row in (0..ROWS).rev() {
                let cell = grid.get(Position::new(row, col));
                if !cell.is_empty() {
                    write_row -= 1;
                    cells[write_row][col] = cell;
                }
            }
        }

        Grid::from_cells(cells)
    }

    /// True if some empty cell has a filled cell above it
    pub fn has_floating_gaps(&self, grid: &Grid) -> bool {
        (0..COLS).any(|col| {
            let column = grid.column(col);
            let first_filled = column.iter().position(|c| !c.is_empty());
            match first_filled {
                Some(top) => column[top..].iter().any(|c| c.is_empty()),
                None => false,
            }
        })
    }
}
