//! Frame clock.
//!
//! The host hands each raw frame delta to [`update_world_time`] before the
//! loops run, so every loop sees the same scaled delta for the frame.
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::worldtime::WorldTime;

/// Advance [`WorldTime`] by `dt` unscaled milliseconds and count the frame.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut time = world.resource_mut::<WorldTime>();
    let delta = dt * time.time_scale;
    time.delta = delta;
    time.elapsed += delta;
    time.frame_count += 1;
    trace!("Frame {}: +{}ms -> {}ms", time.frame_count, time.delta, time.elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_world_time_scales_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 16.0);
        update_world_time(&mut world, 16.0);
        let time = world.resource::<WorldTime>();
        assert!((time.delta - 8.0).abs() < 1e-6);
        assert!((time.elapsed - 16.0).abs() < 1e-6);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn test_zero_scale_freezes_time() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.0));
        update_world_time(&mut world, 16.0);
        let time = world.resource::<WorldTime>();
        assert_eq!(time.elapsed, 0.0);
        assert_eq!(time.frame_count, 1);
    }
}
