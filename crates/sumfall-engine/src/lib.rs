pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A cell value outside the known block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid block value {value} (expected 0..={})", Block::OBSTACLE.value())]
pub struct InvalidBlockError {
    pub value: u8,
}

/// Grid input that does not match the expected dimensions or block range.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridShapeError {
    #[display("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("row {row}: expected {expected} cells, got {actual}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("row {row}, column {column}: {source}")]
    InvalidBlock {
        row: usize,
        column: usize,
        source: InvalidBlockError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("drop column {column} out of range 0..={max}")]
    ColumnOutOfRange { column: usize, max: usize },
    #[display("no room left in column {column}")]
    ColumnOverflow { column: usize },
}
