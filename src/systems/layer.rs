//! Layer setup.

use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::layers::LayerStack;

/// Layers in draw order: map layers first, then overlays.
pub const LAYER_NAMES: [&str; 9] = [
    // map layers
    "water",
    "ground",
    "floor",
    "furniture_bottom",
    "furniture_top",
    // other
    "character",
    "tool",
    "message_box",
    "debug",
];

/// Append every layer of [`LAYER_NAMES`] to the world's [`LayerStack`].
pub fn init_layer(world: &mut World) {
    let Some(mut stack) = world.get_resource_mut::<LayerStack>() else {
        warn!("init_layer: no LayerStack resource");
        return;
    };
    for name in LAYER_NAMES {
        stack.append_layer(name);
    }
}
