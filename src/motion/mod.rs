//! Movement and collision module
//!
//! Shared motion resolution for every moving body: sub-stepped tile
//! collision with wall sliding, and decaying knockback impulses.

mod knockback;
mod resolver;

pub use knockback::Knockback;
pub use resolver::{CollisionBox, MoveOutcome, move_with_collision};
