//! Game driver.
//!
//! [`Game`] owns the ECS [`World`] holding every resource plus the
//! [`EventManager`] through which setup and per-frame logic are wired. The
//! host calls [`Game::setup`] once, then [`Game::tick`] with each frame's
//! delta in milliseconds, then [`Game::quit`]. Loops run from the first
//! tick; `Tick` listeners only once the intro is over and the game is
//! [`GameStates::Playing`].

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::eventmanager::EventManager;
use crate::events::game::GameEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::layers::LayerStack;
use crate::resources::worldtime::WorldTime;
use crate::systems::gamestate::schedule_intro;
use crate::systems::layer::init_layer;
use crate::systems::loops::{WorldLoops, update_loops};
use crate::systems::map::{fill_screen_with_grass, init_walkable, init_water, place_house};
use crate::systems::time::update_world_time;

pub struct Game {
    world: World,
    events: EventManager<World>,
}

impl Game {
    /// Build the world from `config` and register the default setup listeners.
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
        world.insert_resource(GameState::new());
        world.insert_resource(LayerStack::new(config.grid_size()));
        world.insert_non_send_resource(WorldLoops::with_policy(config.fire_policy()));
        world.insert_resource(config);

        let mut game = Game {
            world,
            events: EventManager::new(),
        };
        game.register_default_listeners();
        game
    }

    fn register_default_listeners(&mut self) {
        self.events.on(GameEvent::Init, init_layer);
        self.events.on(GameEvent::Init, fill_screen_with_grass);
        self.events.on(GameEvent::Init, init_water);
        self.events.on(GameEvent::Init, init_walkable);
        self.events.on(GameEvent::Init, place_house);
        self.events.on(GameEvent::Init, schedule_intro);
    }

    /// Enter [`GameStates::Setup`] and run every `Init` listener.
    pub fn setup(&mut self) {
        self.world.resource_mut::<GameState>().set(GameStates::Setup);
        let listeners = self.events.trigger(&GameEvent::Init, &mut self.world);
        info!(
            "Setup done: {} init listeners, {} loops running",
            listeners,
            self.loop_count()
        );
    }

    /// Advance the game by `dt` unscaled milliseconds.
    ///
    /// Returns how many `Tick` listeners ran.
    pub fn tick(&mut self, dt: f32) -> usize {
        update_world_time(&mut self.world, dt);
        update_loops(&mut self.world);
        if !self.world.resource::<GameState>().is_playing() {
            return 0;
        }
        self.events.trigger(&GameEvent::Tick, &mut self.world)
    }

    /// Enter [`GameStates::Quitting`], stop every loop and run every `Quit` listener.
    pub fn quit(&mut self) {
        self.world.resource_mut::<GameState>().set(GameStates::Quitting);
        if let Some(mut loops) = self.world.get_non_send_resource_mut::<WorldLoops>() {
            debug!("Stopping {} loops", loops.len());
            loops.clear();
        }
        let listeners = self.events.trigger(&GameEvent::Quit, &mut self.world);
        debug!("Quit handled by {} listeners", listeners);
    }

    pub fn state(&self) -> GameStates {
        self.world.resource::<GameState>().get()
    }

    pub fn loop_count(&self) -> usize {
        self.world
            .get_non_send_resource::<WorldLoops>()
            .map_or(0, WorldLoops::len)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Listeners registered here run alongside the defaults.
    pub fn events_mut(&mut self) -> &mut EventManager<World> {
        &mut self.events
    }
}
