//! High-level game state.
//!
//! The [`Game`](crate::game::Game) driver moves through
//! [`GameStates::Setup`] → [`GameStates::Playing`] → [`GameStates::Quitting`].
//! Setup ends when the intro delay scheduled by
//! [`schedule_intro`](crate::systems::gamestate::schedule_intro) fires.

use bevy_ecs::prelude::Resource;
use log::info;

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    Setup,
    Playing,
    Quitting,
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> GameStates {
        self.current
    }

    /// Switch to `state`, logging the transition.
    pub fn set(&mut self, state: GameStates) {
        if self.current != state {
            info!("Transitioning from {:?} to {:?}", self.current, state);
            self.current = state;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current == GameStates::Playing
    }
}
