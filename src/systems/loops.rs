//! Loop manager driver.
//!
//! The game's [`LoopManager`] lives in the ECS world as a non-send resource
//! so event listeners can register loops during setup. Its callbacks receive
//! the world itself as context, so the manager is taken out of the world for
//! the duration of the update and put back afterwards.
//!
//! While the update runs, callbacks must go through
//! [`LoopTick::commands`](crate::resources::loopmanager::LoopTick) to add or
//! remove loops; the resource is not in the world at that point.

use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::loopmanager::LoopManager;
use crate::resources::worldtime::WorldTime;

/// Loop manager whose callbacks see the whole world.
pub type WorldLoops = LoopManager<World>;

/// Advance every registered loop by this frame's scaled delta.
pub fn update_loops(world: &mut World) {
    let dt = world.resource::<WorldTime>().delta;
    let Some(mut loops) = world.remove_non_send_resource::<WorldLoops>() else {
        warn!("update_loops: no loop manager in the world");
        return;
    };
    loops.update(dt, world);
    world.insert_non_send_resource(loops);
}
