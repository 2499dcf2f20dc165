//! Tileworld library.
//!
//! A small tile-based world runtime: a rectangular [`Grid`](resources::grid::Grid)
//! container, coordinate sets, frame-rate driven loops and typed event
//! dispatch, plus a headless game layer built on them with `bevy_ecs`.

pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
