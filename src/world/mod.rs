//! World state module
//!
//! Tile map construction and queries, the player snapshot the simulation
//! reads each tick, simulation events, setup serialization and the
//! top-level [`World`] update loop.

pub mod config;
pub mod events;
pub mod grid;
pub mod player;
pub mod sim;

pub use config::{AgentSpawn, ConfigError, WorldConfig};
pub use events::{EventQueue, WorldEvent};
pub use grid::{Obstacle, TileKind, TileMap};
pub use player::PlayerView;
pub use sim::World;
