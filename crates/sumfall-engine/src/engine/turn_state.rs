use serde::Serialize;

use super::PlayerStatus;

/// Everything received for one turn: the turn index and both players' states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnState {
    turn: usize,
    player: PlayerStatus,
    enemy: PlayerStatus,
}

impl TurnState {
    #[must_use]
    pub fn new(turn: usize, player: PlayerStatus, enemy: PlayerStatus) -> Self {
        Self {
            turn,
            player,
            enemy,
        }
    }

    /// Zero-based turn index.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn player(&self) -> &PlayerStatus {
        &self.player
    }

    #[must_use]
    pub fn enemy(&self) -> &PlayerStatus {
        &self.enemy
    }

    /// Drops pending obstacles onto both boards.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            turn: self.turn,
            player: self.player.normalized(),
            enemy: self.enemy.normalized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Board, BoardGeometry};

    use super::*;

    #[test]
    fn test_normalized_applies_each_players_own_counter() {
        let board = Board::empty(BoardGeometry::STANDARD);
        let player = PlayerStatus::new(board.clone()).with_obstacle_count(3);
        let enemy = PlayerStatus::new(board.clone()).with_obstacle_count(12);

        let turn = TurnState::new(7, player, enemy).normalized();

        assert_eq!(turn.turn(), 7);
        assert_eq!(turn.player().board(), &board);
        assert_eq!(turn.enemy().board().count_blocks().obstacle, 10);
    }
}
