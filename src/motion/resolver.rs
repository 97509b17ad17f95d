//! Sub-stepped tile collision resolution
//!
//! Every moving body routes its displacement through [`move_with_collision`],
//! which is what keeps the no-overlap invariant: a collision box never ends a
//! tick inside a blocked tile, no matter how large the requested move is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::world::{TileKind, TileMap};

/// Upper bound on the distance covered by one sub-step, in map pixels.
/// Bounds the tunneling distance for arbitrarily fast moves.
const SUB_STEP: f32 = 2.0;

/// Axis-aligned collision box attached to a body position.
///
/// Smaller than the sprite and offset from the body origin, matching the
/// feet-area boxes used for tile collision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionBox {
    /// Offset of the box's lower-left corner from the body position
    pub offset: Vec2,
    /// Box size in pixels
    pub size: Vec2,
}

impl CollisionBox {
    #[must_use]
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    /// World-space center of the box for a body at `pos`
    #[must_use]
    pub fn center(&self, pos: Vec2) -> Vec2 {
        pos + self.offset + self.size / 2.0
    }

    /// Does the box overlap any blocked tile when the body sits at `pos`?
    #[must_use]
    pub fn overlaps_blocked(&self, pos: Vec2, map: &TileMap) -> bool {
        let ts = map.tile_size() as f32;
        let min = pos + self.offset;
        let max = min + self.size;

        let left = (min.x / ts).floor() as i32;
        let right = (max.x / ts).floor() as i32;
        let bottom = (min.y / ts).floor() as i32;
        let top = (max.y / ts).floor() as i32;

        for y in bottom..=top {
            for x in left..=right {
                if map.is_tile(x, y, TileKind::Blocked) {
                    return true;
                }
            }
        }
        false
    }
}

/// Result of a resolved move
#[derive(Debug, Clone, Copy)]
pub struct MoveOutcome {
    /// Final body position
    pub position: Vec2,
    /// The X axis hit a wall and its remainder was dropped
    pub blocked_x: bool,
    /// The Y axis hit a wall and its remainder was dropped
    pub blocked_y: bool,
}

/// Resolve a desired displacement against the tile map.
///
/// The displacement is first clamped to `max_step` (the body's speed cap for
/// this tick, so instantaneous forces cannot teleport it), then applied in
/// sub-steps of at most [`SUB_STEP`] pixels. Each sub-step attempts the X and
/// Y components independently; a component that would overlap a blocked tile
/// is zeroed for the rest of the call, which produces wall sliding instead of
/// a hard stop.
#[must_use]
pub fn move_with_collision(
    map: &TileMap,
    pos: Vec2,
    bbox: &CollisionBox,
    desired: Vec2,
    max_step: f32,
) -> MoveOutcome {
    let desired = desired.clamp_length_max(max_step.max(0.0));
    let len = desired.length();

    let mut outcome = MoveOutcome {
        position: pos,
        blocked_x: false,
        blocked_y: false,
    };
    if len <= f32::EPSILON {
        return outcome;
    }

    let steps = (len / SUB_STEP).ceil().max(1.0);
    let inc = desired / steps;

    for _ in 0..steps as usize {
        if !outcome.blocked_x && inc.x != 0.0 {
            let next = outcome.position + Vec2::new(inc.x, 0.0);
            if bbox.overlaps_blocked(next, map) {
                outcome.blocked_x = true;
            } else {
                outcome.position = next;
            }
        }
        if !outcome.blocked_y && inc.y != 0.0 {
            let next = outcome.position + Vec2::new(0.0, inc.y);
            if bbox.overlaps_blocked(next, map) {
                outcome.blocked_y = true;
            } else {
                outcome.position = next;
            }
        }
        if (outcome.blocked_x || inc.x == 0.0) && (outcome.blocked_y || inc.y == 0.0) {
            break;
        }
    }

    outcome
}
