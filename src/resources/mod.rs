//! Data structures and ECS resources.
//!
//! Overview
//! - `size` – width/height pair used for grids and pixel extents
//! - `grid` – fixed-size 2D container addressed by index or coordinate
//! - `coordinateset` – unordered set of grid coordinates
//! - `loopmanager` – frame-rate driven loops with deferred changes
//! - `tiles` – tile kinds painted onto layers
//! - `layers` – named stack of tile grids
//! - `walkable` – coordinates a character may step on
//! - `gameconfig` – settings loaded from an INI file
//! - `gamestate` – high-level game state
//! - `worldtime` – simulation time and delta
pub mod coordinateset;
pub mod gameconfig;
pub mod gamestate;
pub mod grid;
pub mod layers;
pub mod loopmanager;
pub mod size;
pub mod tiles;
pub mod walkable;
pub mod worldtime;
