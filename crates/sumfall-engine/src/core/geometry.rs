use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{BOARD_WIDTH, MARGIN_HEIGHT, PACK_SIZE, VISIBLE_HEIGHT};

/// Dimensions of a board.
///
/// Rows are addressed with a single unified index: rows `0..margin_height` are the
/// hidden margin, rows `margin_height..simulation_height` are the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardGeometry {
    width: usize,
    visible_height: usize,
    margin_height: usize,
}

impl BoardGeometry {
    /// 10×16 visible area with a 3-row margin.
    pub const STANDARD: Self = Self::new(BOARD_WIDTH, VISIBLE_HEIGHT, MARGIN_HEIGHT);

    #[must_use]
    pub const fn new(width: usize, visible_height: usize, margin_height: usize) -> Self {
        assert!(width > 0);
        assert!(visible_height > 0);
        Self {
            width,
            visible_height,
            margin_height,
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn visible_height(self) -> usize {
        self.visible_height
    }

    #[must_use]
    pub const fn margin_height(self) -> usize {
        self.margin_height
    }

    #[must_use]
    pub const fn simulation_height(self) -> usize {
        self.visible_height + self.margin_height
    }

    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.width * self.simulation_height()
    }

    /// Left columns where a pack fits entirely on the board.
    ///
    /// Empty when the board is narrower than a pack.
    #[must_use]
    pub const fn drop_columns(self) -> Range<usize> {
        0..(self.width + 1).saturating_sub(PACK_SIZE)
    }

    /// Converts a unified row index into a visible-relative one.
    ///
    /// Returns `None` for margin rows.
    #[must_use]
    pub const fn visible_row(self, row: usize) -> Option<usize> {
        if row < self.margin_height || row >= self.simulation_height() {
            None
        } else {
            Some(row - self.margin_height)
        }
    }

    /// Converts a visible-relative row index into a unified one.
    #[must_use]
    pub const fn unified_row(self, visible_row: usize) -> usize {
        assert!(visible_row < self.visible_height);
        visible_row + self.margin_height
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}
