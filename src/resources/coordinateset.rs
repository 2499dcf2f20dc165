//! Set of grid coordinates.
//!
//! [`CoordinateSet`] records which `(col, row)` positions belong to some
//! region: walkable tiles, a building footprint, the cells a layer touched.
//! Adding is idempotent; removing something that is not there is an error,
//! so bookkeeping mistakes surface at the call site.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::resources::grid::Coordinate;

/// Errors raised by [`CoordinateSet`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSetError {
    #[error("coordinate {0:?} is not in the set")]
    NotFound(Coordinate),
}

/// Unordered membership set of `(col, row)` coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateSet {
    coordinates: FxHashSet<Coordinate>,
}

impl CoordinateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every coordinate in `[x, x + width) x [y, y + height)`.
    ///
    /// A non-positive width or height gives an empty set. Coordinates past
    /// `i32::MAX` do not exist, so the rectangle is clipped there.
    pub fn from_rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        if width <= 0 || height <= 0 {
            return Self::new();
        }
        let cols = x..=x.saturating_add(width - 1);
        (y..=y.saturating_add(height - 1))
            .flat_map(|row| cols.clone().map(move |col| (col, row)))
            .collect()
    }

    /// Insert a coordinate. Adding one that is already present changes nothing.
    pub fn add(&mut self, coordinate: Coordinate) {
        self.coordinates.insert(coordinate);
    }

    pub fn has(&self, coordinate: Coordinate) -> bool {
        self.coordinates.contains(&coordinate)
    }

    pub fn remove(&mut self, coordinate: Coordinate) -> Result<(), CoordinateSetError> {
        if self.coordinates.remove(&coordinate) {
            Ok(())
        } else {
            Err(CoordinateSetError::NotFound(coordinate))
        }
    }

    /// Read-only view of every member, in no particular order.
    pub fn all(&self) -> &FxHashSet<Coordinate> {
        &self.coordinates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.coordinates.iter()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

impl FromIterator<Coordinate> for CoordinateSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        CoordinateSet {
            coordinates: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coordinate> for CoordinateSet {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        self.coordinates.extend(iter);
    }
}
