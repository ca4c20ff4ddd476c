use clap::ValueEnum;

/// Position of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index into the flat, row-major cell sequence of a `size` grid.
    pub fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }
}

/// Order in which the solver assigns cells. Either order guarantees that when
/// `(r, c)` is assigned, `(r, 0..c)` and `(0..r, c)` already are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FillOrder {
    /// Left to right, top to bottom.
    #[default]
    RowMajor,
    /// Grow a square from the top-left corner: for each k, column k down to
    /// row k-1, then row k across to column k.
    Expanding,
}

impl FillOrder {
    pub fn cells(self, size: usize) -> Vec<Cell> {
        match self {
            Self::RowMajor => (0..size)
                .flat_map(|row| (0..size).map(move |col| Cell::new(row, col)))
                .collect(),
            Self::Expanding => {
                let mut cells = Vec::with_capacity(size * size);
                for k in 0..size {
                    cells.extend((0..k).map(|row| Cell::new(row, k)));
                    cells.extend((0..=k).map(|col| Cell::new(k, col)));
                }
                cells
            }
        }
    }
}

/// True when `cells` visits every cell of a `size` grid once and each cell's
/// row and column prefixes are assigned before it.
pub fn is_prefix_contiguous(cells: &[Cell], size: usize) -> bool {
    let mut assigned = vec![false; size * size];
    for cell in cells {
        if cell.row >= size || cell.col >= size || assigned[cell.index(size)] {
            return false;
        }
        let row_ready = (0..cell.col).all(|col| assigned[Cell::new(cell.row, col).index(size)]);
        let col_ready = (0..cell.row).all(|row| assigned[Cell::new(row, cell.col).index(size)]);
        if !row_ready || !col_ready {
            return false;
        }
        assigned[cell.index(size)] = true;
    }
    assigned.iter().all(|&done| done)
}
