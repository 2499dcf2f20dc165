//! World systems and listeners.
//!
//! Submodules overview
//! - [`gamestate`] – intro delay and play state condition
//! - [`layer`] – create the standard layer stack
//! - [`loops`] – drive the world's loop manager each frame
//! - [`map`] – paint grass, water and the house; track walkable tiles
//! - [`time`] – update simulation time and delta

pub mod gamestate;
pub mod layer;
pub mod loops;
pub mod map;
pub mod time;
