use super::{block::Block, board::Board};

impl Board {
    /// Drops pending obstacle blocks onto a copy of the board.
    ///
    /// Nothing happens while `obstacle_count` is below the board width. Otherwise
    /// each column receives exactly one [`Block::OBSTACLE`] in its lowest empty
    /// cell; a column without any empty cell (margin included) is left as is.
    ///
    /// At most one obstacle lands per column per call, however large the count.
    ///
    /// # Example
    ///
    /// ```
    /// use sumfall_engine::{Block, Board, BoardGeometry};
    ///
    /// let board = Board::empty(BoardGeometry::STANDARD);
    /// assert_eq!(board.fall_obstacle(9), board);
    ///
    /// let dropped = board.fall_obstacle(10);
    /// assert!((0..10).all(|x| dropped.get(18, x) == Block::OBSTACLE));
    /// ```
    #[must_use]
    pub fn fall_obstacle(&self, obstacle_count: u32) -> Self {
        let mut board = self.clone();
        let width = self.geometry().width();
        if usize::try_from(obstacle_count).is_ok_and(|count| count < width) {
            return board;
        }
        for column in 0..width {
            if let Some(row) = self.lowest_empty_row(column) {
                board.set(row, column, Block::OBSTACLE);
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use crate::core::geometry::BoardGeometry;

    use super::*;

    fn staircase() -> Board {
        let mut rows = vec![[0u8; 10]; 16];
        for (i, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if x + i >= 16 {
                    *cell = 1;
                }
            }
        }
        Board::from_visible_rows(BoardGeometry::STANDARD, &rows).unwrap()
    }

    #[test]
    fn test_below_threshold_is_unchanged() {
        let board = staircase();
        for count in 0..10 {
            assert_eq!(board.fall_obstacle(count), board, "count {count} is below width");
        }
    }

    #[test]
    fn test_empty_standard_board() {
        let board = Board::empty(BoardGeometry::STANDARD).fall_obstacle(10);
        for (y, row) in board.rows().enumerate() {
            let expected = if y == 18 { Block::OBSTACLE } else { Block::EMPTY };
            assert!(
                row.iter().all(|&b| b == expected),
                "row {y} should be all {expected}, got {row:?}"
            );
        }
    }

    #[test]
    fn test_small_board_fills_bottom_row() {
        let geometry = BoardGeometry::new(4, 3, 0);
        let board = Board::empty(geometry).fall_obstacle(4);
        let rows: Vec<Vec<u8>> = board
            .rows()
            .map(|row| row.iter().map(|&b| b.value()).collect())
            .collect();
        assert_eq!(rows, [[0, 0, 0, 0], [0, 0, 0, 0], [11, 11, 11, 11]]);
    }

    #[test]
    fn test_lands_on_top_of_each_stack() {
        let board = staircase().fall_obstacle(46);
        for x in 0..10 {
            assert_eq!(board.column_height(x), x + 1);
            let top = 18 - x;
            assert_eq!(board.get(top, x), Block::OBSTACLE, "column {x}");
        }
        assert_eq!(board.count_blocks().obstacle, 10);
    }

    #[test]
    fn test_one_obstacle_per_column_per_call() {
        let empty = Board::empty(BoardGeometry::STANDARD);
        let once = empty.fall_obstacle(1000);
        let twice = once.fall_obstacle(1000);

        assert_eq!(once.count_blocks().obstacle, 10);
        assert_eq!(twice.count_blocks().obstacle, 20);
        for x in 0..10 {
            assert_eq!(once.column_height(x), 1);
            assert_eq!(twice.column_height(x), 2);
        }
    }

    #[test]
    fn test_full_column_is_left_unchanged() {
        let geometry = BoardGeometry::new(2, 2, 1);
        let seven = Block::numbered(7).unwrap();
        let board = Board::empty(geometry)
            .with_cell(0, 0, seven)
            .with_cell(1, 0, seven)
            .with_cell(2, 0, seven);

        let dropped = board.fall_obstacle(2);

        for y in 0..3 {
            assert_eq!(dropped.get(y, 0), seven);
        }
        assert_eq!(dropped.get(2, 1), Block::OBSTACLE);
        assert_eq!(dropped.get(1, 1), Block::EMPTY);
    }

    #[test]
    fn test_input_is_not_modified() {
        let board = staircase();
        let before = board.clone();
        let _ = board.fall_obstacle(10);
        assert_eq!(board, before);
    }
}
