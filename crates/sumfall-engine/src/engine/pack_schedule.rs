use serde::Serialize;

use crate::core::Pack;

/// The packs dropped on each turn, announced before the first turn.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackSchedule {
    packs: Vec<Pack>,
}

impl PackSchedule {
    /// Number of turns in a full game.
    pub const MAX_TURNS: usize = 500;

    #[must_use]
    pub fn new(packs: Vec<Pack>) -> Self {
        Self { packs }
    }

    /// Returns the pack for a zero-based turn, or `None` past the end of the game.
    #[must_use]
    pub fn get(&self, turn: usize) -> Option<&Pack> {
        self.packs.get(turn)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

impl FromIterator<Pack> for PackSchedule {
    fn from_iter<T: IntoIterator<Item = Pack>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
