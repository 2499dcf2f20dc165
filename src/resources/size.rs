//! Integer 2D extent.
//!
//! [`Size`] is the immutable width/height pair used to dimension grids and
//! layers. Multiplying two sizes scales component-wise, which is how a grid
//! size in tiles turns into a size in pixels (`grid_size * tile_size`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Width and height, both non-negative, fixed after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub const fn to_pair(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of cells covered by this extent.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Component-wise product. Overflow is not checked.
    pub const fn multiply(&self, other: Size) -> Size {
        Size::new(self.width * other.width, self.height * other.height)
    }
}

impl Mul for Size {
    type Output = Size;

    fn mul(self, rhs: Size) -> Size {
        self.multiply(rhs)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Size::new(width, height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_accessors() {
        let size = Size::new(20, 15);
        assert_eq!(size.width(), 20);
        assert_eq!(size.height(), 15);
        assert_eq!(size.to_pair(), (20, 15));
        assert_eq!(size.area(), 300);
    }

    #[test]
    fn test_size_multiply_is_component_wise() {
        let tiles = Size::new(20, 15);
        let tile = Size::new(16, 8);
        assert_eq!(tiles * tile, Size::new(320, 120));
        assert_eq!(tiles.multiply(tile), tile.multiply(tiles));
    }

    #[test]
    fn test_size_zero_area() {
        assert_eq!(Size::new(0, 7).area(), 0);
        assert_eq!(Size::default().to_pair(), (0, 0));
    }

    #[test]
    fn test_size_display() {
        assert_eq!(Size::new(4, 3).to_string(), "4x3");
    }
}
