use serde::Serialize;

use crate::core::PackRotation;

/// A player's decision for one turn.
///
/// `Display` renders the protocol line: `"<column> <rotation>"` for a drop,
/// `"S"` for a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Rotate the turn's pack, then drop it with its left edge on `column`.
    #[display("{column} {rotation}")]
    Drop {
        column: usize,
        rotation: PackRotation,
    },
    /// Cast the skill instead of dropping a pack.
    #[display("S")]
    Spell,
}

impl Default for Command {
    fn default() -> Self {
        Command::Drop {
            column: 0,
            rotation: PackRotation::default(),
        }
    }
}
