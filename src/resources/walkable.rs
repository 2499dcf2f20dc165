//! Tiles an actor may stand on.
//!
//! Built from the whole world rectangle at setup; anything solid placed on
//! the map removes its footprint from the set.

use bevy_ecs::prelude::Resource;

use crate::resources::coordinateset::CoordinateSet;

#[derive(Resource, Debug, Clone, Default)]
pub struct Walkable(pub CoordinateSet);
