//! Integration tests for the grid, coordinate set and size value types.

use tileworld::resources::coordinateset::{CoordinateSet, CoordinateSetError};
use tileworld::resources::grid::{Grid, GridError};
use tileworld::resources::size::Size;

fn numbered(width: u32, height: u32) -> Grid<u32> {
    let mut grid = Grid::new(Size::new(width, height));
    for index in 0..grid.len() {
        grid.set(index, index as u32).unwrap();
    }
    grid
}

#[test]
fn index_and_coordinate_address_the_same_cell() {
    let grid = numbered(4, 3);
    assert_eq!(grid.index_of((2, 1)).unwrap(), 6);
    assert_eq!(grid.get((2, 1)).unwrap(), grid.get(6usize).unwrap());
    assert_eq!(grid.get((3, 2)).unwrap(), Some(&11));
}

#[test]
fn out_of_range_access_fails_instead_of_wrapping() {
    let mut grid = numbered(4, 3);
    // (4, 0) would wrap onto (0, 1) if the column were not checked
    assert!(matches!(
        grid.get((4, 0)),
        Err(GridError::CoordinateOutOfBounds { col: 4, row: 0, .. })
    ));
    assert!(grid.get((-1, 1)).is_err());
    assert_eq!(
        grid.set(12usize, 0),
        Err(GridError::IndexOutOfBounds { index: 12, len: 12 })
    );
    assert_eq!(grid.get(1usize).unwrap(), Some(&1));
}

#[test]
fn iterate_walks_subrange_row_major() {
    let grid = numbered(4, 3);
    let cells: Vec<u32> = grid.iterate(1..3, 1..3).unwrap().flatten().copied().collect();
    assert_eq!(cells, vec![5, 6, 9, 10]);

    let mut iter = grid.iterate(0..1, 0..4).unwrap();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.by_ref().count(), 4);
    assert_eq!(iter.next(), None);

    // a fresh iterator starts over
    assert_eq!(grid.iterate(0..1, 0..4).unwrap().count(), 4);
}

#[test]
fn iterate_rejects_ranges_outside_the_grid() {
    let grid = numbered(4, 3);
    assert!(matches!(
        grid.iterate(0..4, 0..1),
        Err(GridError::RangeOutOfBounds { .. })
    ));
    assert_eq!(grid.iterate(2..2, 0..4).unwrap().count(), 0);
}

#[test]
fn iterate_mut_writes_only_the_subrange() {
    let mut grid: Grid<char> = Grid::filled(Size::new(3, 3), '.');
    for cell in grid.iterate_mut(1..2, 0..3).unwrap() {
        *cell = Some('#');
    }
    let rows: Vec<String> = (0..3)
        .map(|row| {
            grid.iterate(row..row + 1, 0..3)
                .unwrap()
                .map(|cell| *cell.unwrap())
                .collect()
        })
        .collect();
    assert_eq!(rows, vec!["...", "###", "..."]);
}

#[test]
fn grid_serializes_with_json() {
    let grid = numbered(2, 2);
    let json = serde_json::to_string(&grid).unwrap();
    let back: Grid<u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.size(), Size::new(2, 2));
    assert_eq!(back.get((1, 1)).unwrap(), Some(&3));

    let broken = r#"{"size":{"width":3,"height":3},"cells":[1,2]}"#;
    assert!(serde_json::from_str::<Grid<u32>>(broken).is_err());
}

#[test]
fn coordinate_set_rect_membership() {
    let mut set = CoordinateSet::from_rect(2, 1, 3, 2);
    assert_eq!(set.len(), 6);
    assert!(set.has((2, 1)));
    assert!(set.has((4, 2)));
    assert!(!set.has((5, 1)));
    assert!(!set.has((2, 3)));

    set.add((2, 1));
    assert_eq!(set.len(), 6);

    set.remove((3, 2)).unwrap();
    assert!(!set.has((3, 2)));
    assert_eq!(set.remove((3, 2)), Err(CoordinateSetError::NotFound((3, 2))));
    assert_eq!(set.all().len(), 5);
}

#[test]
fn coordinate_set_empty_rect_and_collect() {
    assert!(CoordinateSet::from_rect(0, 0, 0, 5).is_empty());
    let set: CoordinateSet = [(0, 0), (1, 1), (0, 0)].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn size_multiply_is_component_wise() {
    let tiles = Size::new(20, 15);
    assert_eq!(tiles.multiply(Size::new(16, 16)), Size::new(320, 240));
    assert_eq!(tiles.to_pair(), (20, 15));
    assert_eq!(tiles.area(), 300);
}
