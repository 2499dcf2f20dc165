//! Event dispatch and the game's lifecycle events.
//!
//! Submodules:
//! - [`eventmanager`] – typed listener registry with synchronous dispatch
//! - [`game`] – init, tick and quit events fired by the game driver
pub mod eventmanager;
pub mod game;
