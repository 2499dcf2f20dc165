//! Named tile layers.
//!
//! The world is a stack of same-sized [`Grid`]s of [`Tile`]s, drawn bottom
//! to top in the order they were appended (water first, debug overlay last).
//! Layers are looked up by name.

use bevy_ecs::prelude::Resource;
use log::{debug, warn};

use crate::resources::grid::Grid;
use crate::resources::size::Size;
use crate::resources::tiles::Tile;

/// Ordered stack of named layers sharing one grid size.
#[derive(Resource, Debug, Clone)]
pub struct LayerStack {
    grid_size: Size,
    layers: Vec<(String, Grid<Tile>)>,
}

impl LayerStack {
    pub fn new(grid_size: Size) -> Self {
        LayerStack {
            grid_size,
            layers: Vec::new(),
        }
    }

    /// Size of every layer, in tiles.
    pub fn grid_size(&self) -> Size {
        self.grid_size
    }

    /// Append an empty layer on top. A layer with the same name is replaced in place.
    pub fn append_layer(&mut self, name: impl Into<String>) -> &mut Grid<Tile> {
        let name = name.into();
        let grid = Grid::new(self.grid_size);
        match self.layers.iter().position(|(existing, _)| *existing == name) {
            Some(index) => {
                warn!("Layer '{}' already exists, replacing it", name);
                self.layers[index].1 = grid;
                &mut self.layers[index].1
            }
            None => {
                debug!("Appending layer '{}' ({})", name, self.grid_size);
                self.layers.push((name, grid));
                let last = self.layers.len() - 1;
                &mut self.layers[last].1
            }
        }
    }

    pub fn get_layer(&self, name: &str) -> Option<&Grid<Tile>> {
        self.layers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, grid)| grid)
    }

    pub fn get_layer_mut(&mut self, name: &str) -> Option<&mut Grid<Tile>> {
        self.layers
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, grid)| grid)
    }

    /// Layer names, bottom first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order_and_size() {
        let mut stack = LayerStack::new(Size::new(4, 3));
        stack.append_layer("water");
        stack.append_layer("ground");
        assert_eq!(stack.names().collect::<Vec<_>>(), vec!["water", "ground"]);
        assert_eq!(stack.get_layer("ground").unwrap().size(), Size::new(4, 3));
        assert!(stack.get_layer("sky").is_none());
    }

    #[test]
    fn test_append_existing_name_replaces_contents() {
        let mut stack = LayerStack::new(Size::new(2, 2));
        stack.append_layer("floor").fill(Tile::House);
        stack.append_layer("debug");
        stack.append_layer("floor");
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.get_layer("floor").unwrap().get(0).unwrap(), None);
        assert_eq!(stack.names().next(), Some("floor"));
    }

    #[test]
    fn test_get_layer_mut_writes_through() {
        let mut stack = LayerStack::new(Size::new(2, 2));
        stack.append_layer("ground");
        stack
            .get_layer_mut("ground")
            .unwrap()
            .set((1, 0), Tile::water(2))
            .unwrap();
        assert_eq!(
            stack.get_layer("ground").unwrap().get(1).unwrap(),
            Some(&Tile::Water { frame: 2 })
        );
    }
}
