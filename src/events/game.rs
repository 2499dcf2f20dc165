//! Lifecycle events fired by the [`Game`](crate::game::Game) driver.
//!
//! The driver owns an [`EventManager`](crate::events::eventmanager::EventManager)
//! whose context is the ECS `World`. Setup callbacks such as
//! [`init_layer`](crate::systems::layer::init_layer) subscribe to
//! [`GameEvent::Init`]; per-frame logic subscribes to [`GameEvent::Tick`].

use crate::events::eventmanager::{Event, EventType};

pub const INIT: EventType = EventType(1);
pub const TICK: EventType = EventType(2);
pub const QUIT: EventType = EventType(3);

/// High-level moments in the life of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Fired once from `Game::setup`, before the first tick.
    Init,
    /// Fired every frame after loops have been advanced.
    Tick,
    /// Fired once when the game is asked to stop.
    Quit,
}

impl Event for GameEvent {
    fn event_type(&self) -> EventType {
        match self {
            GameEvent::Init => INIT,
            GameEvent::Tick => TICK,
            GameEvent::Quit => QUIT,
        }
    }
}

impl From<GameEvent> for EventType {
    fn from(event: GameEvent) -> Self {
        event.event_type()
    }
}
