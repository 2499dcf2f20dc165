use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::systems::loops::WorldLoops;

/// Schedule the switch from setup to play once the intro delay has elapsed.
///
/// If the delay cannot be scheduled the game starts playing immediately.
pub fn schedule_intro(world: &mut World) {
    let intro_ms = world
        .get_resource::<GameConfig>()
        .map_or_else(|| GameConfig::new().intro_ms, |config| config.intro_ms);

    let Some(mut loops) = world.get_non_send_resource_mut::<WorldLoops>() else {
        warn!("schedule_intro: no loop manager, starting immediately");
        start_playing(world);
        return;
    };
    let scheduled = loops.delay(intro_ms, |tick| {
        if let Some(mut state) = tick.context.get_resource_mut::<GameState>() {
            state.set(GameStates::Playing);
        }
    });

    match scheduled {
        Ok(id) => debug!("Intro of {}ms scheduled as loop {:?}", intro_ms, id),
        Err(e) => {
            warn!("schedule_intro: {}, starting immediately", e);
            start_playing(world);
        }
    }
}

fn start_playing(world: &mut World) {
    if let Some(mut state) = world.get_resource_mut::<GameState>() {
        state.set(GameStates::Playing);
    }
}
