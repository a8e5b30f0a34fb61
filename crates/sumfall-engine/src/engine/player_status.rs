use serde::Serialize;

use crate::core::Board;

/// One player's state as received at the start of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatus {
    remaining_time_ms: u32,
    obstacle_count: u32,
    skill_point: u32,
    score: u32,
    board: Board,
}

impl PlayerStatus {
    /// Creates a status with all counters at zero.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            remaining_time_ms: 0,
            obstacle_count: 0,
            skill_point: 0,
            score: 0,
            board,
        }
    }

    #[must_use]
    pub fn with_remaining_time_ms(mut self, remaining_time_ms: u32) -> Self {
        self.remaining_time_ms = remaining_time_ms;
        self
    }

    #[must_use]
    pub fn with_obstacle_count(mut self, obstacle_count: u32) -> Self {
        self.obstacle_count = obstacle_count;
        self
    }

    #[must_use]
    pub fn with_skill_point(mut self, skill_point: u32) -> Self {
        self.skill_point = skill_point;
        self
    }

    #[must_use]
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn remaining_time_ms(&self) -> u32 {
        self.remaining_time_ms
    }

    /// Pending obstacle blocks owed by the opponent.
    #[must_use]
    pub fn obstacle_count(&self) -> u32 {
        self.obstacle_count
    }

    #[must_use]
    pub fn skill_point(&self) -> u32 {
        self.skill_point
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the status with pending obstacles dropped onto its board.
    ///
    /// The obstacle counter itself is left as received.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            board: self.board.fall_obstacle(self.obstacle_count),
            ..self.clone()
        }
    }
}
