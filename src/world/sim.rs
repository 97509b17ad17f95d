//! World state and the per-tick update loop

use glam::Vec2;

use crate::ai::{Agent, AgentKind, separation};
use crate::world::config::WorldConfig;
use crate::world::events::{EventQueue, WorldEvent};
use crate::world::grid::TileMap;
use crate::world::player::PlayerView;

/// Owns the static map, the agent arena and the event queue.
///
/// Single-threaded and synchronous: `tick` advances every agent once, in
/// stable slot order, against an externally supplied frame delta. Agents
/// keep their slot for the lifetime of the world, so indices in events stay
/// valid even after deaths.
#[derive(Debug)]
pub struct World {
    map: TileMap,
    agents: Vec<Agent>,
    events: EventQueue,
    separation: crate::ai::SeparationParams,
    seed: u64,
}

impl World {
    /// Build a world from a setup descriptor
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        let map = TileMap::build(
            config.map_width,
            config.map_height,
            config.tile_size,
            &config.obstacles,
        );
        let mut world = Self {
            map,
            agents: Vec::with_capacity(config.spawns.len()),
            events: EventQueue::new(),
            separation: config.separation,
            seed: config.seed,
        };
        for spawn in &config.spawns {
            world.spawn_agent(spawn.kind, spawn.position);
        }
        log::info!(
            "world ready: {}x{} tiles, {} agents",
            world.map.width(),
            world.map.height(),
            world.agents.len()
        );
        world
    }

    /// Add an agent and return its stable index
    pub fn spawn_agent(&mut self, kind: AgentKind, position: Vec2) -> usize {
        let index = self.agents.len();
        self.agents.push(Agent::new(index, kind, position, self.seed));
        index
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Per agent, in slot order: throttled path replanning, separation from
    /// a start-of-tick position snapshot, then the state-machine update
    /// (locomotion, knockback, hit detection). Events raised here are
    /// readable from [`World::events`] as soon as this returns.
    pub fn tick(&mut self, dt: f32, player: &PlayerView) {
        // One-tick-stale neighbor positions keep separation independent of
        // the update order within this pass
        let snapshot: Vec<(usize, Vec2)> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_alive())
            .map(|(i, a)| (i, a.position()))
            .collect();

        for i in 0..self.agents.len() {
            let agent = &mut self.agents[i];
            if !agent.is_alive() {
                continue;
            }

            agent.replan(dt, &self.map, player.position);

            let push = separation::separation_step(i, &snapshot, &self.separation, dt);
            agent.apply_separation(push, &self.map, dt);

            agent.update(dt, player, &self.map, &mut self.events);
        }

        self.events.swap();
    }

    // ------------------------------------------------------------------
    // Read access for the surrounding game loop
    // ------------------------------------------------------------------

    #[must_use]
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> impl Iterator<Item = &WorldEvent> {
        self.events.iter()
    }
}
