use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::{
    PlacementError,
    core::{Block, Board, PACK_SIZE, Pack},
};

/// Total score earned by a drop, indexed by the number of chains it triggered.
const CHAIN_CUMULATIVE_SCORES: [u32; 50] = [
    0, 1, 2, 4, 6, 9, 13, 19, 27, 37, 50, 67, 90, 120, 159, 210, 276, 362, 474, 620, 810, 1057,
    1378, 1795, 2337, 3042, 3959, 5151, 6701, 8716, 11335, 14740, 19167, 24923, 32405, 42132,
    54778, 71218, 92590, 120373, 156491, 203445, 264485, 343838, 446997, 581103, 755441, 982081,
    1276713, 1659735,
];

// Row/column offsets of the eight neighbours of a cell
const NEIGHBOURS: [(isize, isize); 8] = [
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Result of dropping a pack onto a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropOutcome {
    /// The board after every chain has resolved.
    pub board: Board,
    /// Number of erase steps.
    pub chain_count: usize,
    pub score: u32,
    /// Obstacle blocks this drop sends to the opponent.
    pub obstacle_count: u32,
}

impl DropOutcome {
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }
}

/// Returns the cumulative score for a number of chains.
///
/// Chains beyond the end of the score table earn the last entry.
#[must_use]
pub fn chain_score(chain_count: usize) -> u32 {
    CHAIN_CUMULATIVE_SCORES[chain_count.min(CHAIN_CUMULATIVE_SCORES.len() - 1)]
}

/// Returns the number of obstacle blocks a drop with `chain_count` chains sends.
///
/// Every two chains send one obstacle.
#[must_use]
pub fn attack_obstacle_count(chain_count: usize) -> u32 {
    u32::try_from(chain_count / 2).unwrap_or(u32::MAX)
}

/// Drops an already rotated pack with its left edge on `column`.
///
/// Each pack block falls onto the stack of its own board column, bottom pack
/// row first. Numbered blocks that touch (including diagonally) a neighbour
/// they sum to [`ERASING_SUM`](crate::ERASING_SUM) with are then erased,
/// the remaining blocks fall, and erasing repeats for blocks that moved. Each
/// erase step counts as one chain.
///
/// # Example
///
/// ```
/// use sumfall_engine::{Board, BoardGeometry, Pack, simulate_drop};
///
/// let board = Board::empty(BoardGeometry::STANDARD);
/// let pack = Pack::from_rows(&[[0u8, 0], [3, 7]]).unwrap();
///
/// let outcome = simulate_drop(&board, &pack, 0).unwrap();
/// assert_eq!(outcome.chain_count, 1);
/// assert_eq!(outcome.board, board);
/// ```
pub fn simulate_drop(board: &Board, pack: &Pack, column: usize) -> Result<DropOutcome, PlacementError> {
    let geometry = board.geometry();
    if !geometry.drop_columns().contains(&column) {
        return Err(PlacementError::ColumnOutOfRange {
            column,
            max: geometry.width().saturating_sub(PACK_SIZE),
        });
    }

    let mut board = board.clone();
    let placed = place_pack(&mut board, pack, column)?;

    let mut touched = placed.to_vec();
    let mut chain_count = 0;
    while !touched.is_empty() {
        let erased = find_erased(&board, &touched);
        if erased.is_empty() {
            break;
        }
        chain_count += 1;
        for &(row, column) in &erased {
            board.set(row, column, Block::EMPTY);
        }
        touched = board.apply_gravity();
    }

    Ok(DropOutcome {
        board,
        chain_count,
        score: chain_score(chain_count),
        obstacle_count: attack_obstacle_count(chain_count),
    })
}

fn place_pack(
    board: &mut Board,
    pack: &Pack,
    column: usize,
) -> Result<ArrayVec<(usize, usize), { PACK_SIZE * PACK_SIZE }>, PlacementError> {
    let mut placed = ArrayVec::new();
    for row in (0..PACK_SIZE).rev() {
        for dx in 0..PACK_SIZE {
            let block = pack.get(row, dx);
            if block.is_empty() {
                continue;
            }
            let x = column + dx;
            let y = board
                .landing_row(x)
                .ok_or(PlacementError::ColumnOverflow { column: x })?;
            board.set(y, x, block);
            if block.is_numbered() {
                placed.push((y, x));
            }
        }
    }
    Ok(placed)
}

fn find_erased(board: &Board, touched: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
    let geometry = board.geometry();
    let mut erased = BTreeSet::new();
    for &(y, x) in touched {
        let block = board.get(y, x);
        for (dy, dx) in NEIGHBOURS {
            let (Some(ny), Some(nx)) = (y.checked_add_signed(dy), x.checked_add_signed(dx)) else {
                continue;
            };
            if ny >= geometry.simulation_height() || nx >= geometry.width() {
                continue;
            }
            if block.erases_with(board.get(ny, nx)) {
                erased.insert((y, x));
                erased.insert((ny, nx));
            }
        }
    }
    erased
}

#[cfg(test)]
mod tests {
    use crate::core::BoardGeometry;

    use super::*;

    fn pack(rows: [[u8; 2]; 2]) -> Pack {
        Pack::from_rows(&rows).unwrap()
    }

    fn block(n: u8) -> Block {
        Block::numbered(n).unwrap()
    }

    #[test]
    fn test_drop_without_erase() {
        let board = Board::empty(BoardGeometry::STANDARD);
        let outcome = simulate_drop(&board, &pack([[1, 2], [3, 4]]), 8).unwrap();

        assert_eq!(outcome.chain_count, 0);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.board.get(18, 8), block(3));
        assert_eq!(outcome.board.get(18, 9), block(4));
        assert_eq!(outcome.board.get(17, 8), block(1));
        assert_eq!(outcome.board.get(17, 9), block(2));
        assert!(!outcome.is_game_over());
    }

    #[test]
    fn test_blocks_fall_through_empty_pack_cells() {
        let board = Board::empty(BoardGeometry::STANDARD);
        let outcome = simulate_drop(&board, &pack([[5, 1], [0, 2]]), 3).unwrap();

        assert_eq!(outcome.chain_count, 0);
        assert_eq!(outcome.board.get(18, 3), block(5));
        assert_eq!(outcome.board.get(18, 4), block(2));
        assert_eq!(outcome.board.get(17, 4), block(1));
    }

    #[test]
    fn test_single_chain_erases_pair() {
        let board = Board::empty(BoardGeometry::STANDARD);
        let outcome = simulate_drop(&board, &pack([[0, 0], [4, 6]]), 2).unwrap();

        assert_eq!(outcome.chain_count, 1);
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.obstacle_count, 0);
        assert_eq!(outcome.board, board);
    }

    #[test]
    fn test_diagonal_erase() {
        // The 2 lands on top of the 1, diagonally adjacent to the 8
        let board = Board::empty(BoardGeometry::STANDARD)
            .with_cell(18, 1, block(8))
            .with_cell(18, 0, block(1));
        let outcome = simulate_drop(&board, &pack([[2, 0], [0, 0]]), 0).unwrap();

        assert_eq!(outcome.chain_count, 1);
        assert_eq!(outcome.board.get(18, 0), block(1));
        assert_eq!(outcome.board.get(18, 1), Block::EMPTY);
        assert_eq!(outcome.board.get(17, 0), Block::EMPTY);
    }

    #[test]
    fn test_two_chains() {
        // The 1 erases the 9 below it; the 5 above falls next to the other 5
        // and erases in a second chain, leaving only the 3 behind.
        let board = Board::empty(BoardGeometry::STANDARD)
            .with_cell(18, 0, block(9))
            .with_cell(18, 1, block(5))
            .with_cell(17, 1, block(3));
        let outcome = simulate_drop(&board, &pack([[5, 0], [1, 0]]), 0).unwrap();

        assert_eq!(outcome.chain_count, 2);
        assert_eq!(outcome.score, chain_score(2));
        assert_eq!(outcome.obstacle_count, 1);
        assert_eq!(outcome.board.count_blocks().numbered, 1);
        assert_eq!(outcome.board.get(18, 1), block(3));
    }

    #[test]
    fn test_pack_fills_hole_under_floating_block() {
        let board = Board::empty(BoardGeometry::STANDARD).with_cell(17, 0, block(2));
        let outcome = simulate_drop(&board, &pack([[0, 0], [1, 0]]), 0).unwrap();

        assert_eq!(outcome.chain_count, 0);
        assert_eq!(outcome.board.get(18, 0), block(1));
        assert_eq!(outcome.board.get(17, 0), block(2));
        assert_eq!(outcome.board.get(16, 0), Block::EMPTY);
    }

    #[test]
    fn test_obstacles_never_erase() {
        let board = Board::empty(BoardGeometry::STANDARD).with_cell(18, 0, Block::OBSTACLE);
        let outcome = simulate_drop(&board, &pack([[0, 0], [0, 9]]), 0).unwrap();

        assert_eq!(outcome.chain_count, 0);
        assert_eq!(outcome.board.get(18, 0), Block::OBSTACLE);
        assert_eq!(outcome.board.get(18, 1), block(9));
    }

    #[test]
    fn test_invalid_columns() {
        let board = Board::empty(BoardGeometry::STANDARD);
        assert_eq!(
            simulate_drop(&board, &pack([[1, 1], [1, 1]]), 9),
            Err(PlacementError::ColumnOutOfRange { column: 9, max: 8 })
        );
    }

    #[test]
    fn test_overflowing_column() {
        let geometry = BoardGeometry::new(2, 1, 1);
        let board = Board::empty(geometry)
            .with_cell(1, 0, Block::OBSTACLE)
            .with_cell(0, 0, Block::OBSTACLE);
        assert_eq!(
            simulate_drop(&board, &pack([[0, 0], [1, 0]]), 0),
            Err(PlacementError::ColumnOverflow { column: 0 })
        );
    }

    #[test]
    fn test_stacking_into_margin_is_game_over() {
        let rows = vec![[11u8; 10]; 16];
        let board = Board::from_visible_rows(BoardGeometry::STANDARD, &rows).unwrap();
        let outcome = simulate_drop(&board, &pack([[1, 2], [3, 4]]), 0).unwrap();

        assert_eq!(outcome.board.get(2, 0), block(3));
        assert_eq!(outcome.board.get(1, 0), block(1));
        assert!(outcome.is_game_over());
    }

    #[test]
    fn test_attack_obstacle_count() {
        assert_eq!(attack_obstacle_count(0), 0);
        assert_eq!(attack_obstacle_count(1), 0);
        assert_eq!(attack_obstacle_count(2), 1);
        assert_eq!(attack_obstacle_count(5), 2);
        assert_eq!(attack_obstacle_count(20), 10);
    }

    #[test]
    fn test_chain_score_clamps() {
        assert_eq!(chain_score(0), 0);
        assert_eq!(chain_score(3), 4);
        assert_eq!(chain_score(49), 1_659_735);
        assert_eq!(chain_score(1000), 1_659_735);
    }
}
