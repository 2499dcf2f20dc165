//! Fixed-size dense 2D container.
//!
//! A [`Grid`] stores `width * height` optional cells in row-major order
//! (`index = row * width + col`). Cells start unset unless a fill value is
//! supplied. The cell count never changes after construction.
//!
//! Cells are addressed either by linear index or by a `(col, row)`
//! [`Coordinate`]; both go through [`GridIndex`], so every accessor accepts
//! either form. Anything outside the grid is reported as a [`GridError`]
//! instead of wrapping into a neighbouring row.
//!
//! Rectangular traversal goes through [`Grid::iterate`] (and its mutable
//! twin [`Grid::iterate_mut`]), which walks half-open row/column ranges with
//! the column advancing fastest.
//!
//! # Example
//!
//! ```
//! use tileworld::resources::grid::Grid;
//! use tileworld::resources::size::Size;
//!
//! let mut grid = Grid::filled(Size::new(3, 2), 0u8);
//! grid.set((2, 1), 7).unwrap();
//! assert_eq!(grid.index_of((2, 1)).unwrap(), 5);
//! assert_eq!(grid.get(5).unwrap(), Some(&7));
//!
//! let bottom: Vec<_> = grid.iterate(1..2, 0..3).unwrap().flatten().copied().collect();
//! assert_eq!(bottom, vec![0, 0, 7]);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::ops::Range;

use crate::resources::size::Size;

/// `(col, row)` position on a grid or in a [`CoordinateSet`](crate::resources::coordinateset::CoordinateSet).
pub type Coordinate = (i32, i32);

/// Errors raised by grid access.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("coordinate ({col}, {row}) is outside a {size} grid")]
    CoordinateOutOfBounds { col: i32, row: i32, size: Size },
    #[error("index {index} is outside a grid of {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("rows {rows:?} x cols {cols:?} exceed a {size} grid")]
    RangeOutOfBounds {
        rows: Range<i32>,
        cols: Range<i32>,
        size: Size,
    },
    #[error("{cells} cells cannot back a {size} grid")]
    CellCountMismatch { cells: usize, size: Size },
}

/// Something that can be resolved to a linear cell index.
pub trait GridIndex {
    fn grid_index(self, size: Size) -> Result<usize, GridError>;
}

impl GridIndex for usize {
    fn grid_index(self, size: Size) -> Result<usize, GridError> {
        let len = size.area();
        if self < len {
            Ok(self)
        } else {
            Err(GridError::IndexOutOfBounds { index: self, len })
        }
    }
}

impl GridIndex for Coordinate {
    fn grid_index(self, size: Size) -> Result<usize, GridError> {
        let (col, row) = self;
        let in_bounds = col >= 0
            && row >= 0
            && (col as u32) < size.width()
            && (row as u32) < size.height();
        if !in_bounds {
            return Err(GridError::CoordinateOutOfBounds { col, row, size });
        }
        Ok(row as usize * size.width() as usize + col as usize)
    }
}

/// Dense row-major grid of optional cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Grid<T> {
    size: Size,
    cells: Vec<Option<T>>,
}

/// Unchecked serde shape of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid<T> {
    size: Size,
    cells: Vec<Option<T>>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        if raw.cells.len() != raw.size.area() {
            return Err(GridError::CellCountMismatch {
                cells: raw.cells.len(),
                size: raw.size,
            });
        }
        Ok(Grid {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl<T> Grid<T> {
    /// Create a grid with every cell unset.
    pub fn new(size: Size) -> Self {
        let mut cells = Vec::with_capacity(size.area());
        cells.resize_with(size.area(), || None);
        Grid { size, cells }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Total number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of a `(col, row)` coordinate.
    pub fn index_of(&self, coordinate: Coordinate) -> Result<usize, GridError> {
        coordinate.grid_index(self.size)
    }

    /// Whether the index or coordinate addresses a cell of this grid.
    pub fn contains(&self, at: impl GridIndex) -> bool {
        at.grid_index(self.size).is_ok()
    }

    /// Read a cell. `Ok(None)` means the cell exists but is unset.
    pub fn get(&self, at: impl GridIndex) -> Result<Option<&T>, GridError> {
        let index = at.grid_index(self.size)?;
        Ok(self.cells[index].as_ref())
    }

    pub fn get_mut(&mut self, at: impl GridIndex) -> Result<Option<&mut T>, GridError> {
        let index = at.grid_index(self.size)?;
        Ok(self.cells[index].as_mut())
    }

    pub fn set(&mut self, at: impl GridIndex, value: T) -> Result<(), GridError> {
        let index = at.grid_index(self.size)?;
        self.cells[index] = Some(value);
        Ok(())
    }

    /// Unset a cell, returning what it held.
    pub fn clear(&mut self, at: impl GridIndex) -> Result<Option<T>, GridError> {
        let index = at.grid_index(self.size)?;
        Ok(self.cells[index].take())
    }

    /// Cells within `rows x cols`, row-major, column advancing fastest.
    ///
    /// Both ranges are half-open. An empty range on either axis yields
    /// nothing; otherwise the ranges must lie inside the grid.
    pub fn iterate(&self, rows: Range<i32>, cols: Range<i32>) -> Result<GridIter<'_, T>, GridError> {
        let (rows, cols) = self.checked_ranges(rows, cols)?;
        Ok(GridIter {
            cells: &self.cells,
            width: self.size.width() as usize,
            row: rows.start,
            row_end: rows.end,
            col: cols.start,
            col_start: cols.start,
            col_end: cols.end,
        })
    }

    /// Mutable counterpart of [`Grid::iterate`], same order and bounds rules.
    pub fn iterate_mut(
        &mut self,
        rows: Range<i32>,
        cols: Range<i32>,
    ) -> Result<impl Iterator<Item = &mut Option<T>>, GridError> {
        let (rows, cols) = self.checked_ranges(rows, cols)?;
        let width = (self.size.width() as usize).max(1);
        Ok(self
            .cells
            .chunks_mut(width)
            .skip(rows.start)
            .take(rows.len())
            .flat_map(move |line| line[cols.clone()].iter_mut()))
    }

    fn checked_ranges(
        &self,
        rows: Range<i32>,
        cols: Range<i32>,
    ) -> Result<(Range<usize>, Range<usize>), GridError> {
        if rows.is_empty() || cols.is_empty() {
            return Ok((0..0, 0..0));
        }
        let fits = |range: &Range<i32>, limit: u32| range.start >= 0 && range.end as i64 <= limit as i64;
        if !fits(&rows, self.size.height()) || !fits(&cols, self.size.width()) {
            return Err(GridError::RangeOutOfBounds {
                rows,
                cols,
                size: self.size,
            });
        }
        Ok((
            rows.start as usize..rows.end as usize,
            cols.start as usize..cols.end as usize,
        ))
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `cell`.
    pub fn filled(size: Size, cell: T) -> Self {
        Grid {
            size,
            cells: vec![Some(cell); size.area()],
        }
    }

    /// Overwrite every cell with `cell`.
    pub fn fill(&mut self, cell: T) {
        for slot in self.cells.iter_mut() {
            *slot = Some(cell.clone());
        }
    }
}

/// Single-pass iterator returned by [`Grid::iterate`].
#[derive(Debug)]
pub struct GridIter<'a, T> {
    cells: &'a [Option<T>],
    width: usize,
    row: usize,
    row_end: usize,
    col: usize,
    col_start: usize,
    col_end: usize,
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.row_end {
            return None;
        }
        let cell = self.cells.get(self.row * self.width + self.col)?.as_ref();
        self.col += 1;
        if self.col >= self.col_end {
            self.col = self.col_start;
            self.row += 1;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.row >= self.row_end {
            0
        } else {
            let row_width = self.col_end - self.col_start;
            (self.row_end - self.row) * row_width - (self.col - self.col_start)
        };
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for GridIter<'_, T> {}

impl<T> FusedIterator for GridIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> Grid<usize> {
        let mut grid = Grid::new(Size::new(width, height));
        for index in 0..grid.len() {
            grid.set(index, index).unwrap();
        }
        grid
    }

    #[test]
    fn test_new_grid_is_unset() {
        let grid: Grid<u8> = Grid::new(Size::new(4, 3));
        assert_eq!(grid.len(), 12);
        assert!((0..12).all(|i| grid.get(i).unwrap().is_none()));
    }

    #[test]
    fn test_filled_grid_every_cell_equals_fill() {
        for (w, h) in [(1, 1), (3, 5), (7, 2), (0, 4)] {
            let grid = Grid::filled(Size::new(w, h), 'x');
            assert_eq!(grid.len(), (w * h) as usize);
            for index in 0..grid.len() {
                assert_eq!(grid.get(index).unwrap(), Some(&'x'));
            }
        }
    }

    #[test]
    fn test_index_of_is_row_major() {
        let grid: Grid<()> = Grid::new(Size::new(5, 4));
        for row in 0..4 {
            for col in 0..5 {
                assert_eq!(grid.index_of((col, row)).unwrap(), (row * 5 + col) as usize);
            }
        }
    }

    #[test]
    fn test_index_of_rejects_out_of_bounds() {
        let grid: Grid<()> = Grid::new(Size::new(5, 4));
        // (5, 0) would wrap onto (0, 1) if only the linear index were checked
        assert!(matches!(
            grid.index_of((5, 0)),
            Err(GridError::CoordinateOutOfBounds { col: 5, row: 0, .. })
        ));
        assert!(grid.index_of((-1, 2)).is_err());
        assert!(grid.index_of((0, 4)).is_err());
    }

    #[test]
    fn test_get_set_by_coordinate_and_index() {
        let mut grid = Grid::new(Size::new(3, 3));
        grid.set((1, 2), "tree").unwrap();
        assert_eq!(grid.get(7).unwrap(), Some(&"tree"));
        grid.set(0, "rock").unwrap();
        assert_eq!(grid.get((0, 0)).unwrap(), Some(&"rock"));
        assert!(matches!(
            grid.set(9, "void"),
            Err(GridError::IndexOutOfBounds { index: 9, len: 9 })
        ));
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut grid = Grid::filled(Size::new(2, 2), 1);
        *grid.get_mut((1, 1)).unwrap().unwrap() += 10;
        assert_eq!(grid.get(3).unwrap(), Some(&11));
        assert_eq!(grid.clear(3).unwrap(), Some(11));
        assert_eq!(grid.get(3).unwrap(), None);
    }

    #[test]
    fn test_fill_overwrites_everything() {
        let mut grid = numbered(3, 2);
        grid.clear(4).unwrap();
        grid.fill(9);
        assert!((0..6).all(|i| grid.get(i).unwrap() == Some(&9)));
    }

    #[test]
    fn test_iterate_row_major_within_ranges() {
        let grid = numbered(4, 4);
        let cells: Vec<usize> = grid.iterate(1..3, 1..3).unwrap().flatten().copied().collect();
        assert_eq!(cells, vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_iterate_single_row_and_column() {
        let grid = numbered(4, 3);
        let row: Vec<usize> = grid.iterate(2..3, 0..4).unwrap().flatten().copied().collect();
        assert_eq!(row, vec![8, 9, 10, 11]);
        let col: Vec<usize> = grid.iterate(0..3, 3..4).unwrap().flatten().copied().collect();
        assert_eq!(col, vec![3, 7, 11]);
    }

    #[test]
    fn test_iterate_is_exact_size_and_single_pass() {
        let grid = numbered(5, 5);
        let mut iter = grid.iterate(0..2, 1..4).unwrap();
        assert_eq!(iter.len(), 6);
        iter.next();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.by_ref().count(), 5);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iterate_empty_ranges_yield_nothing() {
        let grid = numbered(3, 3);
        assert_eq!(grid.iterate(1..1, 0..3).unwrap().count(), 0);
        assert_eq!(grid.iterate(0..3, 2..2).unwrap().count(), 0);
    }

    #[test]
    fn test_iterate_rejects_ranges_outside_grid() {
        let grid = numbered(3, 3);
        assert!(matches!(
            grid.iterate(0..4, 0..3),
            Err(GridError::RangeOutOfBounds { .. })
        ));
        assert!(grid.iterate(0..3, -1..2).is_err());
    }

    #[test]
    fn test_iterate_yields_unset_cells_as_none() {
        let mut grid = Grid::new(Size::new(2, 1));
        grid.set(1, 'b').unwrap();
        let cells: Vec<Option<&char>> = grid.iterate(0..1, 0..2).unwrap().collect();
        assert_eq!(cells, vec![None, Some(&'b')]);
    }

    #[test]
    fn test_iterate_mut_paints_region() {
        let mut grid = Grid::filled(Size::new(4, 3), 0);
        for cell in grid.iterate_mut(1..3, 2..4).unwrap() {
            *cell = Some(1);
        }
        let painted: Vec<usize> = (0..12).filter(|&i| grid.get(i).unwrap() == Some(&1)).collect();
        assert_eq!(painted, vec![6, 7, 10, 11]);
    }

    #[test]
    fn test_serde_roundtrip_and_invariant_check() {
        let grid = numbered(2, 2);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid<usize> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let broken = r#"{"size":{"width":2,"height":2},"cells":[1,2,3]}"#;
        assert!(serde_json::from_str::<Grid<usize>>(broken).is_err());
    }
}
