//! Event queue for the presentation layer
//!
//! The simulation core never renders, shakes a camera, or plays a sound; it
//! raises events and lets the surrounding game loop react. The queue is
//! double-buffered: events raised during a tick become readable right after
//! `World::tick` returns and are discarded on the next tick.

use std::collections::VecDeque;

use glam::Vec2;

/// Things that happened inside the simulation this tick.
///
/// Fire-and-forget: the core expects no response. `#[non_exhaustive]` so new
/// variants can be added without breaking wildcard consumers.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum WorldEvent {
    /// The player's attack connected with an agent. The consumer should
    /// trigger hit-pause / camera-shake feedback.
    AgentStruck {
        /// Index of the struck agent
        agent: usize,
        /// Knockback direction (away from the player), normalized
        direction: Vec2,
        /// Damage applied
        damage: f32,
    },

    /// An agent's health reached zero
    AgentSlain {
        /// Index of the slain agent
        agent: usize,
    },

    /// An agent committed to a charge attack after its telegraph window
    BashStarted {
        /// Index of the charging agent
        agent: usize,
        /// Captured charge direction, normalized
        direction: Vec2,
    },
}

/// Double-buffered event queue.
///
/// Push is O(1) amortized; the buffers are reused across ticks so steady
/// state allocates nothing.
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Events being written this tick
    pending: VecDeque<WorldEvent>,
    /// Events from the finished tick, ready for consumers
    ready: VecDeque<WorldEvent>,
}

impl EventQueue {
    const DEFAULT_CAPACITY: usize = 32;

    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            ready: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }

    /// Queue an event for consumers
    #[inline]
    pub fn push(&mut self, event: WorldEvent) {
        self.pending.push_back(event);
    }

    /// Swap buffers at the tick boundary: pending events become readable,
    /// last tick's events are dropped.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.ready);
        self.pending.clear();
    }

    /// Iterate over the finished tick's events
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &WorldEvent> {
        self.ready.iter()
    }

    /// Drain the finished tick's events, taking ownership
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = WorldEvent> + '_ {
        self.ready.drain(..)
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.ready.len()
    }

    /// Drop everything, pending and ready
    pub fn clear(&mut self) {
        self.pending.clear();
        self.ready.clear();
    }
}
