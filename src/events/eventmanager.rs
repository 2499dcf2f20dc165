//! Typed event dispatch.
//!
//! [`EventManager`] maps an [`EventType`] key to the listeners registered for
//! it and calls them synchronously, in registration order, whenever that
//! type is triggered. The context passed to [`EventManager::trigger`] is
//! forwarded to every listener untouched; the manager never looks inside it.
//!
//! Anything implementing [`Event`] can be triggered, including a bare
//! [`EventType`], so callers can fire either a raw key or a richer event
//! value that knows its own key.
//!
//! Listeners live as long as the manager; there is no unsubscribe. While a
//! dispatch is running the manager is exclusively borrowed, so a listener
//! cannot register more listeners into the list being walked.
//!
//! # Example
//!
//! ```
//! use tileworld::events::eventmanager::{EventManager, EventType};
//!
//! const SCORE: EventType = EventType(7);
//!
//! let mut events: EventManager<u32> = EventManager::new();
//! events.on(SCORE, |score| *score += 10);
//! events.on(SCORE, |score| *score *= 2);
//!
//! let mut score = 1;
//! assert_eq!(events.trigger(&SCORE, &mut score), 2);
//! assert_eq!(score, 22);
//! ```

use log::{debug, trace};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Key identifying a kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventType(pub u32);

impl From<u32> for EventType {
    fn from(raw: u32) -> Self {
        EventType(raw)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

/// A value that can be dispatched through an [`EventManager`].
pub trait Event {
    fn event_type(&self) -> EventType;
}

impl Event for EventType {
    fn event_type(&self) -> EventType {
        *self
    }
}

/// Boxed listener callback.
pub type ListenerCallback<C> = Box<dyn FnMut(&mut C)>;

/// A callback bound to one event type.
pub struct EventListener<C> {
    event_type: EventType,
    callback: ListenerCallback<C>,
}

impl<C> EventListener<C> {
    pub fn new(event_type: EventType, callback: impl FnMut(&mut C) + 'static) -> Self {
        EventListener {
            event_type,
            callback: Box::new(callback),
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Run the callback with `context`.
    pub fn invoke(&mut self, context: &mut C) {
        (self.callback)(context);
    }
}

impl<C> fmt::Debug for EventListener<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}

// Most event types carry one or two listeners.
type ListenerList<C> = SmallVec<[EventListener<C>; 2]>;

/// Registry of listeners keyed by [`EventType`].
pub struct EventManager<C> {
    listeners: FxHashMap<EventType, ListenerList<C>>,
}

impl<C> Default for EventManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventManager<C> {
    pub fn new() -> Self {
        EventManager {
            listeners: FxHashMap::default(),
        }
    }

    /// Append a listener for `event_type`.
    pub fn on(&mut self, event_type: impl Into<EventType>, callback: impl FnMut(&mut C) + 'static) {
        let event_type = event_type.into();
        let list = self.listeners.entry(event_type).or_default();
        list.push(EventListener::new(event_type, callback));
        debug!("Listener #{} registered for {}", list.len(), event_type);
    }

    /// Call every listener of the event's type, in registration order.
    ///
    /// Returns how many listeners ran; zero when nothing listens.
    pub fn trigger(&mut self, event: &impl Event, context: &mut C) -> usize {
        let event_type = event.event_type();
        let Some(list) = self.listeners.get_mut(&event_type) else {
            trace!("No listeners for {}", event_type);
            return 0;
        };
        trace!("Triggering {} on {} listener(s)", event_type, list.len());
        for listener in list.iter_mut() {
            listener.invoke(context);
        }
        list.len()
    }

    pub fn listener_count(&self, event_type: impl Into<EventType>) -> usize {
        self.listeners
            .get(&event_type.into())
            .map_or(0, |list| list.len())
    }

    pub fn has_listeners(&self, event_type: impl Into<EventType>) -> bool {
        self.listener_count(event_type) > 0
    }

    /// Event types with at least one listener, in no particular order.
    pub fn event_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.listeners.keys().copied()
    }
}

impl<C> fmt::Debug for EventManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.listeners.iter().map(|(key, list)| (key, list.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPE_A: EventType = EventType(1);
    const TYPE_B: EventType = EventType(2);

    struct Collision {
        damage: u32,
    }

    impl Event for Collision {
        fn event_type(&self) -> EventType {
            TYPE_A
        }
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut events: EventManager<Vec<&'static str>> = EventManager::new();
        events.on(TYPE_A, |log| log.push("l1"));
        events.on(TYPE_A, |log| log.push("l2"));

        let mut log = Vec::new();
        assert_eq!(events.trigger(&TYPE_A, &mut log), 2);
        assert_eq!(log, vec!["l1", "l2"]);
    }

    #[test]
    fn test_trigger_without_listeners_is_noop() {
        let mut events: EventManager<Vec<&'static str>> = EventManager::new();
        events.on(TYPE_A, |log| log.push("a"));

        let mut log = Vec::new();
        assert_eq!(events.trigger(&TYPE_B, &mut log), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_trigger_accepts_event_values() {
        let mut events: EventManager<u32> = EventManager::new();
        events.on(TYPE_A, |hp| *hp -= 1);

        let mut hp = 10;
        let hit = Collision { damage: 3 };
        events.trigger(&hit, &mut hp);
        assert_eq!(hp, 9);
        assert_eq!(hit.damage, 3);
    }

    #[test]
    fn test_raw_keys_convert() {
        let mut events: EventManager<()> = EventManager::new();
        events.on(5u32, |_| {});
        assert_eq!(events.listener_count(EventType(5)), 1);
        assert!(events.has_listeners(5u32));
        assert!(!events.has_listeners(6u32));
        assert_eq!(events.event_types().collect::<Vec<_>>(), vec![EventType(5)]);
    }

    #[test]
    fn test_listeners_keep_state_between_triggers() {
        let mut events: EventManager<Vec<u32>> = EventManager::new();
        let mut calls = 0;
        events.on(TYPE_A, move |seen| {
            calls += 1;
            seen.push(calls);
        });

        let mut seen = Vec::new();
        events.trigger(&TYPE_A, &mut seen);
        events.trigger(&TYPE_A, &mut seen);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_listener_reports_its_type() {
        let mut listener: EventListener<u8> = EventListener::new(TYPE_B, |n| *n += 1);
        assert_eq!(listener.event_type(), TYPE_B);
        let mut n = 0;
        listener.invoke(&mut n);
        assert_eq!(n, 1);
    }
}
