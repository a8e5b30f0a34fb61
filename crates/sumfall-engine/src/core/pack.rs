use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::GridShapeError;

use super::{
    PACK_SIZE,
    block::{Block, parse_row},
};

/// The 2×2 block shape a player drops each turn.
///
/// A pack has no position; it is only a shape template. Cells are stored
/// row-major, top row first.
///
/// # Example
///
/// ```
/// use sumfall_engine::Pack;
///
/// let pack = Pack::from_rows(&[[9u8, 5], [0, 3]]).unwrap();
/// let rotated = pack.rotated(1);
/// assert_eq!(rotated, Pack::from_rows(&[[0u8, 9], [3, 5]]).unwrap());
/// assert_eq!(pack.rotated(4), pack);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pack {
    rows: [[Block; PACK_SIZE]; PACK_SIZE],
}

impl Pack {
    #[must_use]
    pub const fn new(rows: [[Block; PACK_SIZE]; PACK_SIZE]) -> Self {
        Self { rows }
    }

    /// Builds a pack from raw integer rows, top row first.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, GridShapeError>
    where
        R: AsRef<[u8]>,
    {
        if rows.len() != PACK_SIZE {
            return Err(GridShapeError::RowCount {
                expected: PACK_SIZE,
                actual: rows.len(),
            });
        }
        let mut cells = [[Block::EMPTY; PACK_SIZE]; PACK_SIZE];
        for (y, (row, values)) in cells.iter_mut().zip(rows).enumerate() {
            let blocks = parse_row(y, values.as_ref(), PACK_SIZE)?;
            for (cell, block) in row.iter_mut().zip(blocks) {
                *cell = block;
            }
        }
        Ok(Self::new(cells))
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Block {
        self.rows[row][column]
    }

    #[must_use]
    pub fn rows(&self) -> &[[Block; PACK_SIZE]; PACK_SIZE] {
        &self.rows
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Rotates the pack 90° clockwise.
    ///
    /// Cell `(i, j)` moves to `(j, PACK_SIZE - 1 - i)`.
    #[must_use]
    pub fn rotated_once(&self) -> Self {
        let mut rows = [[Block::EMPTY; PACK_SIZE]; PACK_SIZE];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &block) in row.iter().enumerate() {
                rows[j][PACK_SIZE - 1 - i] = block;
            }
        }
        Self { rows }
    }

    /// Rotates the pack clockwise `times` quarter turns.
    ///
    /// Only `times % 4` matters.
    #[must_use]
    pub fn rotated(&self, times: usize) -> Self {
        (0..times % 4).fold(*self, |pack, _| pack.rotated_once())
    }

    /// Returns the shape the pack takes once its blocks fall to the bottom of each pack column.
    #[must_use]
    pub fn settled(&self) -> Self {
        let mut rows = [[Block::EMPTY; PACK_SIZE]; PACK_SIZE];
        for column in 0..PACK_SIZE {
            let mut y = PACK_SIZE;
            for row in (0..PACK_SIZE).rev() {
                let block = self.rows[row][column];
                if !block.is_empty() {
                    y -= 1;
                    rows[y][column] = block;
                }
            }
        }
        Self { rows }
    }

    /// Lists the rotations that land differently, in rotation order.
    ///
    /// Two rotations land the same when their settled shapes are equal.
    /// The first rotation is always included.
    #[must_use]
    pub fn distinct_rotations(&self) -> ArrayVec<(PackRotation, Self), 4> {
        let mut rotations: ArrayVec<(PackRotation, Self), 4> = ArrayVec::new();
        for rotation in PackRotation::ALL {
            let pack = self.rotated(rotation.quarter_turns());
            let settled = pack.settled();
            if rotations.iter().any(|(_, p)| p.settled() == settled) {
                continue;
            }
            rotations.push((rotation, pack));
        }
        rotations
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
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

/// Number of clockwise quarter turns applied to a pack.
///
/// - `0`: as given in the schedule
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    derive_more::Display,
)]
#[serde(into = "u8")]
pub struct PackRotation(u8);

impl PackRotation {
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Wraps `quarter_turns` modulo 4.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn new(quarter_turns: usize) -> Self {
        Self((quarter_turns % 4) as u8)
    }

    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        self.0 as usize
    }
}

impl From<PackRotation> for u8 {
    fn from(rotation: PackRotation) -> Self {
        rotation.0
    }
}
