//! Agent intelligence and navigation
//!
//! Provides grid pathfinding, local separation and the melee agent
//! state machine.

mod agent;
mod pathfinding;
pub mod separation;

pub use agent::{Agent, AgentKind, AgentState, AgentTuning, VisualState};
pub use pathfinding::{Path, PathNode, find_path};
pub use separation::{SeparationParams, separation_step};
