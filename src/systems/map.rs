//! Map crafting listeners.
//!
//! These run on [`GameEvent::Init`](crate::events::game::GameEvent) with the
//! world as context and paint the initial map onto the
//! [`LayerStack`]. Each one logs and returns if a resource it needs is
//! missing, so listeners can be registered in any combination.

use bevy_ecs::prelude::*;
use log::{debug, warn};
use std::ops::Range;

use crate::resources::coordinateset::CoordinateSet;
use crate::resources::gameconfig::GameConfig;
use crate::resources::grid::{Grid, GridError};
use crate::resources::layers::LayerStack;
use crate::resources::loopmanager::LoopTick;
use crate::resources::size::Size;
use crate::resources::tiles::{GrassPiece, Tile, WATER_FRAMES};
use crate::resources::walkable::Walkable;
use crate::systems::loops::WorldLoops;

/// Footprint of a house in tiles.
pub const HOUSE_SIZE: Size = Size::new(3, 2);

/// Paint the ground layer as one grass rectangle with corners and edges.
pub fn fill_screen_with_grass(world: &mut World) {
    let Some(mut stack) = world.get_resource_mut::<LayerStack>() else {
        warn!("fill_screen_with_grass: no LayerStack resource");
        return;
    };
    let Some(ground) = stack.get_layer_mut("ground") else {
        warn!("fill_screen_with_grass: no 'ground' layer");
        return;
    };
    if let Err(e) = paint_grass(ground) {
        warn!("fill_screen_with_grass: {}", e);
    }
}

/// Nine-slice grass over the whole grid. Grids thinner than two tiles get
/// centre pieces only.
pub fn paint_grass(grid: &mut Grid<Tile>) -> Result<(), GridError> {
    let (w, h) = grid.size().to_pair();
    let (w, h) = (w as i32, h as i32);
    if w < 2 || h < 2 {
        paint(grid, 0..h, 0..w, Tile::Grass(GrassPiece::Center))?;
        return Ok(());
    }

    grid.set((0, 0), Tile::Grass(GrassPiece::TopLeft))?;
    grid.set((w - 1, 0), Tile::Grass(GrassPiece::TopRight))?;
    grid.set((0, h - 1), Tile::Grass(GrassPiece::BottomLeft))?;
    grid.set((w - 1, h - 1), Tile::Grass(GrassPiece::BottomRight))?;

    // First and last row
    paint(grid, 0..1, 1..w - 1, Tile::Grass(GrassPiece::Top))?;
    paint(grid, h - 1..h, 1..w - 1, Tile::Grass(GrassPiece::Bottom))?;
    // First and last column
    paint(grid, 1..h - 1, 0..1, Tile::Grass(GrassPiece::Left))?;
    paint(grid, 1..h - 1, w - 1..w, Tile::Grass(GrassPiece::Right))?;
    // Center
    paint(grid, 1..h - 1, 1..w - 1, Tile::Grass(GrassPiece::Center))?;
    Ok(())
}

fn paint(grid: &mut Grid<Tile>, rows: Range<i32>, cols: Range<i32>, tile: Tile) -> Result<usize, GridError> {
    let mut painted = 0;
    for cell in grid.iterate_mut(rows, cols)? {
        *cell = Some(tile);
        painted += 1;
    }
    Ok(painted)
}

/// Flood the water layer and start its animation loop.
pub fn init_water(world: &mut World) {
    let water_fps = world
        .get_resource::<GameConfig>()
        .map_or_else(|| GameConfig::new().water_fps, |config| config.water_fps);

    {
        let Some(mut stack) = world.get_resource_mut::<LayerStack>() else {
            warn!("init_water: no LayerStack resource");
            return;
        };
        let Some(water) = stack.get_layer_mut("water") else {
            warn!("init_water: no 'water' layer");
            return;
        };
        water.fill(Tile::water(0));
    }

    let Some(mut loops) = world.get_non_send_resource_mut::<WorldLoops>() else {
        warn!("init_water: no loop manager");
        return;
    };
    match loops.repeat(water_fps, WATER_FRAMES, animate_water) {
        Ok(id) => debug!("Water animation running as loop {:?} at {} fps", id, water_fps),
        Err(e) => warn!("init_water: {}", e),
    }
}

fn animate_water(tick: &mut LoopTick<'_, World>) {
    let frame = Tile::water(tick.count);
    if let Some(mut stack) = tick.context.get_resource_mut::<LayerStack>() {
        if let Some(water) = stack.get_layer_mut("water") {
            water.fill(frame);
        }
    }
}

/// Start with every tile of the world walkable.
pub fn init_walkable(world: &mut World) {
    let Some(grid_size) = world.get_resource::<LayerStack>().map(LayerStack::grid_size) else {
        warn!("init_walkable: no LayerStack resource");
        return;
    };
    let (w, h) = grid_size.to_pair();
    world.insert_resource(Walkable(CoordinateSet::from_rect(0, 0, w as i32, h as i32)));
}

/// Drop a house at a seeded random spot away from the map edge.
///
/// The house goes on `furniture_bottom` and its footprint stops being walkable.
pub fn place_house(world: &mut World) {
    let seed = world.get_resource::<GameConfig>().map_or(0, |config| config.seed);
    let Some(grid_size) = world.get_resource::<LayerStack>().map(LayerStack::grid_size) else {
        warn!("place_house: no LayerStack resource");
        return;
    };
    let mut rng = fastrand::Rng::with_seed(seed);
    let Some((col, row)) = house_origin(&mut rng, grid_size) else {
        debug!("place_house: a {} world has no room for a house", grid_size);
        return;
    };
    let (hw, hh) = HOUSE_SIZE.to_pair();
    let (hw, hh) = (hw as i32, hh as i32);

    {
        let mut stack = world.resource_mut::<LayerStack>();
        let Some(layer) = stack.get_layer_mut("furniture_bottom") else {
            warn!("place_house: no 'furniture_bottom' layer");
            return;
        };
        if let Err(e) = paint(layer, row..row + hh, col..col + hw, Tile::House) {
            warn!("place_house: {}", e);
            return;
        }
    }

    let footprint = CoordinateSet::from_rect(col, row, hw, hh);
    if let Some(mut walkable) = world.get_resource_mut::<Walkable>() {
        for &coordinate in footprint.iter() {
            if let Err(e) = walkable.0.remove(coordinate) {
                warn!("place_house: {}", e);
            }
        }
    }
    debug!("House placed at ({}, {})", col, row);
}

/// Top-left corner for a house that keeps a one-tile margin to every edge.
pub fn house_origin(rng: &mut fastrand::Rng, grid_size: Size) -> Option<(i32, i32)> {
    let (w, h) = grid_size.to_pair();
    let (hw, hh) = HOUSE_SIZE.to_pair();
    if w < hw + 2 || h < hh + 2 {
        return None;
    }
    let col = rng.u32(1..=w - hw - 1);
    let row = rng.u32(1..=h - hh - 1);
    Some((col as i32, row as i32))
}
