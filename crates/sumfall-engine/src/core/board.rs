use std::fmt;

use serde::{Serialize, Serializer};

use crate::GridShapeError;

use super::{
    block::{Block, parse_row},
    geometry::BoardGeometry,
};

/// A player's grid of settled blocks.
///
/// The grid covers the whole simulation height: hidden margin rows on top,
/// then the visible rows. Rows are addressed with a unified index (row `0` is
/// the top margin row, the last row is the floor); [`BoardGeometry::visible_row`]
/// and [`BoardGeometry::unified_row`] convert between the two coordinate systems.
///
/// Every row always holds exactly `width` cells, and no transform ever drops
/// margin rows.
///
/// # Example
///
/// ```
/// use sumfall_engine::{Block, Board, BoardGeometry};
///
/// let geometry = BoardGeometry::new(3, 2, 1);
/// let board = Board::from_visible_rows(geometry, &[[0u8, 0, 0], [1, 0, 9]]).unwrap();
///
/// assert_eq!(board.get(2, 0), Block::numbered(1).unwrap());
/// assert!(board.margin_rows().flatten().all(|b| b.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    geometry: BoardGeometry,
    cells: Vec<Block>,
}

/// Numbers of non-empty cells on a board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockCounts {
    pub numbered: usize,
    pub obstacle: usize,
}

impl Board {
    /// Creates a board with every cell empty.
    #[must_use]
    pub fn empty(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            cells: vec![Block::EMPTY; geometry.cell_count()],
        }
    }

    /// Builds a board from the rows of its visible area, top row first.
    ///
    /// The margin rows start empty. The input must have exactly
    /// `visible_height` rows of `width` known block values.
    pub fn from_visible_rows<R>(geometry: BoardGeometry, rows: &[R]) -> Result<Self, GridShapeError>
    where
        R: AsRef<[u8]>,
    {
        if rows.len() != geometry.visible_height() {
            return Err(GridShapeError::RowCount {
                expected: geometry.visible_height(),
                actual: rows.len(),
            });
        }
        let mut board = Self::empty(geometry);
        for (visible_row, values) in rows.iter().enumerate() {
            let blocks = parse_row(visible_row, values.as_ref(), geometry.width())?;
            let row = geometry.unified_row(visible_row);
            for (cell, block) in board.row_mut(row).iter_mut().zip(blocks) {
                *cell = block;
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Returns the cell at a unified row index.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Block {
        self.cells[self.index(row, column)]
    }

    /// Returns the cell at a visible-relative row index.
    #[must_use]
    pub fn visible_cell(&self, visible_row: usize, column: usize) -> Block {
        self.get(self.geometry.unified_row(visible_row), column)
    }

    /// Returns a copy of the board with one cell replaced.
    #[must_use]
    pub fn with_cell(mut self, row: usize, column: usize, block: Block) -> Self {
        self.set(row, column, block);
        self
    }

    /// Iterates over all rows, margin first.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Block]> + '_ {
        self.cells.chunks_exact(self.geometry.width())
    }

    pub fn margin_rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.rows().take(self.geometry.margin_height())
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.rows().skip(self.geometry.margin_height())
    }

    /// Returns the lowest empty cell of a column, scanning up from the floor.
    #[must_use]
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        (0..self.geometry.simulation_height())
            .rev()
            .find(|&row| self.get(row, column).is_empty())
    }

    /// Returns the row a block dropped into this column comes to rest on.
    ///
    /// This is the cell directly above the stack standing on the floor, so a
    /// hole under a floating block is filled. `None` when that stack reaches row `0`.
    #[must_use]
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        (self.geometry.simulation_height() - self.column_height(column)).checked_sub(1)
    }

    /// Number of contiguous occupied cells stacked from the floor.
    #[must_use]
    pub fn column_height(&self, column: usize) -> usize {
        (0..self.geometry.simulation_height())
            .rev()
            .take_while(|&row| !self.get(row, column).is_empty())
            .count()
    }

    #[must_use]
    pub fn count_blocks(&self) -> BlockCounts {
        let mut counts = BlockCounts::default();
        for block in &self.cells {
            if block.is_obstacle() {
                counts.obstacle += 1;
            } else if block.is_numbered() {
                counts.numbered += 1;
            }
        }
        counts
    }

    /// A board is lost once any block sits in the margin rows.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.margin_rows().flatten().any(|block| !block.is_empty())
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, block: Block) {
        let index = self.index(row, column);
        self.cells[index] = block;
    }

    /// Lets every block fall to the bottom of its column.
    ///
    /// Returns the positions of numbered blocks that moved.
    pub(crate) fn apply_gravity(&mut self) -> Vec<(usize, usize)> {
        let mut moved = vec![];
        for column in 0..self.geometry.width() {
            let mut landing = self.geometry.simulation_height();
            for row in (0..self.geometry.simulation_height()).rev() {
                let block = self.get(row, column);
                if block.is_empty() {
                    continue;
                }
                landing -= 1;
                if landing != row {
                    self.set(landing, column, block);
                    self.set(row, column, Block::EMPTY);
                    if block.is_numbered() {
                        moved.push((landing, column));
                    }
                }
            }
        }
        moved
    }

    fn row_mut(&mut self, row: usize) -> &mut [Block] {
        let width = self.geometry.width();
        &mut self.cells[row * width..][..width]
    }

    fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.geometry.simulation_height() && column < self.geometry.width(),
            "cell ({row}, {column}) is outside the board"
        );
        row * self.geometry.width() + column
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Rows of raw block values, margin included
        serializer.collect_seq(self.rows())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if i == self.geometry.margin_height() && i > 0 {
                writeln!(f, "{}", "---".repeat(self.geometry.width()))?;
            }
            for (j, block) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>2}", block.value())?;
            }
        }
        Ok(())
    }
}
