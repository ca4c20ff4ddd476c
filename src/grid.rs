use std::fmt;

use crate::fill_order::Cell;

/// Square letter grid stored as `size * size` cells in row-major order.
/// `None` marks a cell that has not been assigned yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Complete grid from `size * size` letters given row by row.
    pub fn from_letters(size: usize, letters: &str) -> Option<Self> {
        let cells: Vec<Option<char>> = letters.chars().map(Some).collect();
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, cell: Cell) -> Option<char> {
        self.cells[cell.index(self.size)]
    }

    pub fn set(&mut self, cell: Cell, letter: char) {
        self.cells[cell.index(self.size)] = Some(letter);
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells[cell.index(self.size)] = None;
    }

    /// Letters left of `cell` in its row. Stops at the first unassigned cell.
    pub fn row_prefix(&self, cell: Cell) -> impl Iterator<Item = char> + '_ {
        (0..cell.col).map_while(move |col| self.get(Cell::new(cell.row, col)))
    }

    /// Letters above `cell` in its column. Stops at the first unassigned cell.
    pub fn column_prefix(&self, cell: Cell) -> impl Iterator<Item = char> + '_ {
        (0..cell.row).map_while(move |row| self.get(Cell::new(row, cell.col)))
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Flat row-major letters, `#` for unassigned cells.
    pub fn letters(&self) -> String {
        self.cells.iter().map(|cell| cell.unwrap_or('#')).collect()
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.get(Cell::new(row, col)).unwrap_or('#'))
                    .collect()
            })
            .collect()
    }

    pub fn columns(&self) -> Vec<String> {
        (0..self.size)
            .map(|col| {
                (0..self.size)
                    .map(|row| self.get(Cell::new(row, col)).unwrap_or('#'))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_unassigned() {
        let grid = Grid::new(2);
        assert_eq!(grid.letters(), "####");
        assert!(!grid.is_complete());
    }

    #[test]
    fn test_from_letters() {
        let grid = Grid::from_letters(2, "abba").unwrap();
        assert!(grid.is_complete());
        assert_eq!(grid.rows(), vec!["ab", "ba"]);
        assert!(Grid::from_letters(2, "abc").is_none());
    }

    #[test]
    fn test_rows_and_columns() {
        let grid = Grid::from_letters(4, "sarsaloeroseseen").unwrap();
        assert_eq!(grid.rows(), vec!["sars", "aloe", "rose", "seen"]);
        assert_eq!(grid.columns(), vec!["sars", "aloe", "rose", "seen"]);
        let grid = Grid::from_letters(2, "abcd").unwrap();
        assert_eq!(grid.columns(), vec!["ac", "bd"]);
    }

    #[test]
    fn test_prefixes() {
        let mut grid = Grid::new(3);
        grid.set(Cell::new(0, 0), 'c');
        grid.set(Cell::new(0, 1), 'a');
        grid.set(Cell::new(1, 0), 'a');
        let cell = Cell::new(1, 1);
        assert_eq!(grid.row_prefix(cell).collect::<String>(), "a");
        assert_eq!(grid.column_prefix(cell).collect::<String>(), "a");
        assert_eq!(grid.row_prefix(Cell::new(0, 2)).collect::<String>(), "ca");
        assert_eq!(grid.column_prefix(Cell::new(0, 2)).count(), 0);
    }

    #[test]
    fn test_set_and_clear() {
        let mut grid = Grid::new(2);
        grid.set(Cell::new(1, 0), 'x');
        assert_eq!(grid.get(Cell::new(1, 0)), Some('x'));
        assert_eq!(grid.letters(), "##x#");
        grid.clear(Cell::new(1, 0));
        assert_eq!(grid.get(Cell::new(1, 0)), None);
    }

    #[test]
    fn test_display_renders_rows() {
        let grid = Grid::from_letters(2, "abba").unwrap();
        assert_eq!(grid.to_string(), "ab\nba\n");
    }
}
