//! A tile-grid agent simulation engine built in Rust
//!
//! This engine provides:
//! - Tile map construction from obstacle rectangles
//! - 8-directional A* pathfinding with wall padding
//! - Sub-stepped collision movement with wall sliding
//! - Melee agent AI (chase, telegraph, bash, recover)

pub mod ai;
pub mod motion;
pub mod world;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{Agent, AgentKind, AgentState, Path, SeparationParams, find_path};
    pub use crate::motion::{CollisionBox, Knockback, move_with_collision};
    pub use crate::world::{
        AgentSpawn, EventQueue, Obstacle, PlayerView, TileKind, TileMap, World, WorldConfig,
        WorldEvent,
    };
    pub use glam::Vec2;
}
