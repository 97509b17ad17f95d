//! Read-only view of the player consumed by the AI

use glam::Vec2;

use crate::motion::CollisionBox;

/// Per-tick snapshot of the player supplied by the external game loop.
///
/// The core only reads this; player movement, input and animation live
/// outside the simulation.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    /// World position
    pub position: Vec2,
    /// Tile collision box
    pub collision: CollisionBox,
    /// The attack swing is currently active
    pub attacking: bool,
    /// Normalized attack aim direction
    pub attack_dir: Vec2,
    /// Attack reach in pixels
    pub attack_range: f32,
    /// Damage dealt per connected swing
    pub attack_damage: f32,
}

impl PlayerView {
    /// An idle player at `position` with default melee stats
    #[must_use]
    pub fn idle(position: Vec2) -> Self {
        Self {
            position,
            collision: CollisionBox::new(Vec2::new(-4.0, -16.0), Vec2::new(8.0, 4.0)),
            attacking: false,
            attack_dir: Vec2::X,
            attack_range: 28.0,
            attack_damage: 60.0,
        }
    }

    /// Copy of this view with an active swing along `dir`
    #[must_use]
    pub fn attacking(mut self, dir: Vec2) -> Self {
        self.attacking = true;
        self.attack_dir = dir.normalize_or_zero();
        self
    }
}
