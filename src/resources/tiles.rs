//! Tile kinds painted onto layers.
//!
//! Tiles are plain values; there is no global tile registry. Water cycles
//! through [`WATER_FRAMES`] animation frames, grass comes in nine pieces so a
//! rectangle of it can be drawn with proper corners and edges.

use serde::{Deserialize, Serialize};

/// Number of frames in the water animation.
pub const WATER_FRAMES: i32 = 4;

/// One of the nine slices of a grass rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrassPiece {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Water { frame: u8 },
    Grass(GrassPiece),
    House,
}

impl Tile {
    /// Water tile showing animation frame `index`, wrapped into range.
    pub fn water(index: i32) -> Tile {
        Tile::Water {
            frame: index.rem_euclid(WATER_FRAMES) as u8,
        }
    }

    /// Tiles that block movement.
    pub fn is_solid(&self) -> bool {
        matches!(self, Tile::House)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_frame_wraps() {
        assert_eq!(Tile::water(0), Tile::Water { frame: 0 });
        assert_eq!(Tile::water(5), Tile::Water { frame: 1 });
        assert_eq!(Tile::water(-1), Tile::Water { frame: 3 });
    }

    #[test]
    fn test_only_houses_are_solid() {
        assert!(Tile::House.is_solid());
        assert!(!Tile::water(2).is_solid());
        assert!(!Tile::Grass(GrassPiece::Center).is_solid());
    }
}
