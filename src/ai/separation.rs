//! Local separation force between agents
//!
//! Pairwise repulsion that keeps agents from clumping into a single stack.
//! Runs on a start-of-tick position snapshot so the result does not depend
//! on agent update order within the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Distances below which two coincident agents are treated as one point
/// and skipped, avoiding a divide-by-near-zero.
const MIN_DIST_SQ: f32 = 1e-4;
const MIN_SUM_LEN: f32 = 1e-3;

/// Separation tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeparationParams {
    /// Radius within which neighbors push each other apart, in pixels
    pub desired_distance: f32,
    /// Repulsion speed in pixels per second
    pub strength: f32,
}

impl Default for SeparationParams {
    fn default() -> Self {
        Self {
            desired_distance: 15.0,
            strength: 6.0,
        }
    }
}

/// Displacement for the agent at `self_index` this tick.
///
/// Each neighbor inside `desired_distance` contributes a push away from it,
/// scaled by `(desired - dist) / desired`; the sum is normalized and scaled
/// by strength and dt. Returns zero when nothing is in range.
#[must_use]
pub fn separation_step(
    self_index: usize,
    positions: &[(usize, Vec2)],
    params: &SeparationParams,
    dt: f32,
) -> Vec2 {
    let Some(&(_, self_pos)) = positions.iter().find(|(i, _)| *i == self_index) else {
        return Vec2::ZERO;
    };

    let mut push = Vec2::ZERO;
    for &(other_index, other_pos) in positions {
        if other_index == self_index {
            continue;
        }
        let delta = self_pos - other_pos;
        let dist_sq = delta.length_squared();
        if dist_sq < params.desired_distance * params.desired_distance && dist_sq > MIN_DIST_SQ {
            let dist = dist_sq.sqrt();
            let weight = (params.desired_distance - dist) / params.desired_distance;
            push += (delta / dist) * weight;
        }
    }

    let len = push.length();
    if len > MIN_SUM_LEN {
        (push / len) * params.strength * dt
    } else {
        Vec2::ZERO
    }
}
