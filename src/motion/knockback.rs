//! Knockback impulses with linear decay

use glam::Vec2;

/// An externally imposed velocity impulse that decays toward zero at a fixed
/// rate per second. Integration happens through the motion resolver, so a
/// knocked-back body stops at walls instead of clipping through them.
#[derive(Debug, Clone, Copy)]
pub struct Knockback {
    velocity: Vec2,
    decay: f32,
}

impl Knockback {
    #[must_use]
    pub fn new(decay: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            decay,
        }
    }

    /// Replace the current impulse with a new one along `dir`
    pub fn impulse(&mut self, dir: Vec2, strength: f32) {
        self.velocity = dir * strength;
    }

    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Displacement for this tick; decays the stored velocity afterwards.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        let displacement = self.velocity * dt;
        let amount = self.decay * dt;
        self.velocity.x = approach_zero(self.velocity.x, amount);
        self.velocity.y = approach_zero(self.velocity.y, amount);
        displacement
    }

    /// Drop the X component, used when the resolver reports a wall hit
    pub fn cancel_x(&mut self) {
        self.velocity.x = 0.0;
    }

    /// Drop the Y component, used when the resolver reports a wall hit
    pub fn cancel_y(&mut self) {
        self.velocity.y = 0.0;
    }
}

/// Move `value` toward zero by `amount` without overshooting
fn approach_zero(value: f32, amount: f32) -> f32 {
    if value > 0.0 {
        (value - amount).max(0.0)
    } else if value < 0.0 {
        (value + amount).min(0.0)
    } else {
        0.0
    }
}
