//! Simulation clock in milliseconds.
//!
//! Written once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time); loops
//! read `delta` from here.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldTime {
    /// Scaled milliseconds since the game started.
    pub elapsed: f32,
    /// Scaled milliseconds of the current frame.
    pub delta: f32,
    /// Multiplier applied to raw frame deltas. `0.0` freezes the world.
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        Self::with_scale(1.0)
    }
}

impl WorldTime {
    fn with_scale(time_scale: f32) -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale,
            frame_count: 0,
        }
    }

    pub fn with_time_scale(self, time_scale: f32) -> Self {
        WorldTime { time_scale, ..self }
    }
}
