use serde::{Deserialize, Serialize};

use crate::{GridShapeError, InvalidBlockError};

use super::ERASING_SUM;

/// A single cell value on a board or pack.
///
/// - `0`: empty
/// - `1..=ERASING_SUM`: numbered block
/// - `ERASING_SUM + 1`: obstacle block
///
/// Serializes as its raw integer value.
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
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Block(u8);

impl Block {
    pub const EMPTY: Self = Self(0);
    pub const OBSTACLE: Self = Self(ERASING_SUM + 1);

    /// Returns the numbered block `n`, or `None` if `n` is not in `1..=ERASING_SUM`.
    #[must_use]
    pub const fn numbered(n: u8) -> Option<Self> {
        if n >= 1 && n <= ERASING_SUM {
            Some(Self(n))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }

    #[must_use]
    pub const fn is_obstacle(self) -> bool {
        self.0 == Self::OBSTACLE.0
    }

    #[must_use]
    pub const fn is_numbered(self) -> bool {
        !self.is_empty() && !self.is_obstacle()
    }

    /// Checks whether two blocks cancel each other out.
    ///
    /// Only numbered blocks can be erased.
    #[must_use]
    pub const fn erases_with(self, other: Self) -> bool {
        self.is_numbered() && other.is_numbered() && self.0 + other.0 == ERASING_SUM
    }
}

impl TryFrom<u8> for Block {
    type Error = InvalidBlockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= Self::OBSTACLE.0 {
            Ok(Self(value))
        } else {
            Err(InvalidBlockError { value })
        }
    }
}

impl From<Block> for u8 {
    fn from(block: Block) -> Self {
        block.0
    }
}

/// Validates one row of raw grid input.
pub(crate) fn parse_row(
    row: usize,
    values: &[u8],
    width: usize,
) -> Result<impl Iterator<Item = Block> + '_, GridShapeError> {
    if values.len() != width {
        return Err(GridShapeError::RowWidth {
            row,
            expected: width,
            actual: values.len(),
        });
    }
    for (column, &value) in values.iter().enumerate() {
        Block::try_from(value).map_err(|source| GridShapeError::InvalidBlock {
            row,
            column,
            source,
        })?;
    }
    Ok(values.iter().map(|&value| Block(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_classification() {
        assert!(Block::EMPTY.is_empty());
        assert!(!Block::EMPTY.is_numbered());
        assert!(Block::OBSTACLE.is_obstacle());
        assert!(!Block::OBSTACLE.is_numbered());
        assert_eq!(Block::OBSTACLE.value(), 11);

        for n in 1..=ERASING_SUM {
            let block = Block::numbered(n).unwrap();
            assert!(block.is_numbered(), "{n} should be a numbered block");
        }
        assert_eq!(Block::numbered(0), None);
        assert_eq!(Block::numbered(ERASING_SUM + 1), None);
    }

    #[test]
    fn test_try_from_rejects_unknown_values() {
        assert_eq!(Block::try_from(11), Ok(Block::OBSTACLE));
        assert_eq!(Block::try_from(12), Err(InvalidBlockError { value: 12 }));
        assert_eq!(Block::try_from(255), Err(InvalidBlockError { value: 255 }));
    }

    #[test]
    fn test_erases_with() {
        let three = Block::numbered(3).unwrap();
        let seven = Block::numbered(7).unwrap();
        let five = Block::numbered(5).unwrap();

        assert!(three.erases_with(seven));
        assert!(seven.erases_with(three));
        assert!(five.erases_with(five));
        assert!(!three.erases_with(five));
        // Empty and obstacle cells never erase
        assert!(!Block::OBSTACLE.erases_with(Block::EMPTY));
        assert!(!Block::EMPTY.erases_with(Block::numbered(10).unwrap()));
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&[Block::EMPTY, Block::OBSTACLE]).unwrap();
        assert_eq!(json, "[0,11]");

        let blocks: Vec<Block> = serde_json::from_str("[0,4,11]").unwrap();
        assert_eq!(blocks, [Block::EMPTY, Block::numbered(4).unwrap(), Block::OBSTACLE]);
        assert!(serde_json::from_str::<Block>("12").is_err());
    }
}
