//! Melee agent controller
//!
//! Per-agent state machine (chase → telegraph → charge → recover), path
//! following with throttled replanning, knockback integration and
//! hit-detection against the player's swing. Everything that moves the
//! agent goes through the motion resolver.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ai::pathfinding::{self, Path};
use crate::motion::{CollisionBox, Knockback, move_with_collision};
use crate::world::{EventQueue, PlayerView, TileMap, WorldEvent};

/// Minimum dot product between attack aim and the player→agent direction
/// for a swing to connect (forward cone of roughly 145 degrees).
const HIT_CONE_DOT: f32 = 0.3;
/// Duration of the hurt flash exposed through the visual state
const HURT_FLASH_TIME: f32 = 0.2;
/// Distance at which a path node counts as reached
const NODE_REACH: f32 = 1.0;

/// Combat state of an agent. Cyclic: Chasing → Channeling → Bashing →
/// Recovering → Chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    /// Following the current path toward the player
    Chasing,
    /// Holding position during the attack telegraph
    Channeling,
    /// Charging along the captured direction
    Bashing,
    /// Brief idle pause after a charge
    Recovering,
}

/// Animation tag read by the presentation layer; never consumed by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Idle,
    Walking,
    Telegraph,
    Charging,
    Hurt,
    Dead,
}

/// Enemy archetype. Kinds share the state-machine core and differ only in
/// their tuning preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    /// Slow shield-bearer with a long telegraph and a heavy charge
    Charger,
    /// Faster, frailer variant with a short telegraph
    Stalker,
}

impl AgentKind {
    /// Tuning preset for this kind
    #[must_use]
    pub fn tuning(self) -> AgentTuning {
        match self {
            AgentKind::Charger => AgentTuning::charger(),
            AgentKind::Stalker => AgentTuning::stalker(),
        }
    }
}

/// Kind-specific tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTuning {
    /// Locomotion speed in pixels per second
    pub move_speed: f32,
    /// Distance to the player that triggers the telegraph
    pub attack_range: f32,
    /// Telegraph duration in seconds
    pub channel_time: f32,
    /// Charge duration in seconds
    pub bash_duration: f32,
    /// Charge speed as a multiple of `move_speed`
    pub bash_speed_multiplier: f32,
    /// Cooldown before another telegraph can start
    pub bash_cooldown: f32,
    /// Idle pause after a charge
    pub recover_time: f32,
    /// Knockback decay rate in pixels per second squared
    pub knockback_decay: f32,
    /// Knockback impulse strength when struck
    pub knockback_strength: f32,
    /// Hit points
    pub max_health: f32,
    /// Tile collision box (feet area, smaller than the sprite)
    pub collision: CollisionBox,
    /// Base seconds between path replans
    pub replan_interval: f32,
    /// Upper bound of the random replan offset
    pub replan_jitter: f32,
    /// Distance at which the replan interval stops shrinking
    pub replan_near_distance: f32,
}

impl AgentTuning {
    #[must_use]
    pub fn charger() -> Self {
        Self {
            move_speed: 30.0,
            attack_range: 35.0,
            channel_time: 0.75,
            bash_duration: 0.35,
            bash_speed_multiplier: 6.0,
            bash_cooldown: 2.0,
            recover_time: 1.0,
            knockback_decay: 150.0,
            knockback_strength: 100.0,
            max_health: 100.0,
            collision: CollisionBox::new(Vec2::new(-4.0, -16.0), Vec2::new(8.0, 4.0)),
            replan_interval: 1.0,
            replan_jitter: 2.0,
            replan_near_distance: 120.0,
        }
    }

    #[must_use]
    pub fn stalker() -> Self {
        Self {
            move_speed: 45.0,
            attack_range: 28.0,
            channel_time: 0.4,
            bash_duration: 0.25,
            bash_speed_multiplier: 5.0,
            bash_cooldown: 1.2,
            recover_time: 0.5,
            knockback_strength: 120.0,
            max_health: 60.0,
            ..Self::charger()
        }
    }
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self::charger()
    }
}

/// An AI-controlled melee enemy
#[derive(Debug)]
pub struct Agent {
    index: usize,
    kind: AgentKind,
    tuning: AgentTuning,
    position: Vec2,
    facing: Vec2,

    state: AgentState,
    state_timer: f32,
    bash_cooldown: f32,
    bash_dir: Vec2,

    path: Path,
    target_index: usize,
    path_timer: f32,
    rng: StdRng,

    knockback: Knockback,
    hit_this_swing: bool,
    hurt_timer: f32,
    health: f32,
    alive: bool,
}

impl Agent {
    /// Spawn an agent. `index` is its stable slot in the world's agent list;
    /// together with the world seed it makes the replan jitter reproducible.
    #[must_use]
    pub fn new(index: usize, kind: AgentKind, position: Vec2, world_seed: u64) -> Self {
        let tuning = kind.tuning();
        let mut rng =
            StdRng::seed_from_u64(world_seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));

        // Staggered initial offset so a freshly spawned pack does not replan
        // in the same tick
        let path_timer = if tuning.replan_jitter > 0.0 {
            rng.gen_range(0.0..tuning.replan_jitter)
        } else {
            0.0
        };

        Self {
            index,
            kind,
            knockback: Knockback::new(tuning.knockback_decay),
            health: tuning.max_health,
            tuning,
            position,
            facing: Vec2::X,
            state: AgentState::Chasing,
            state_timer: 0.0,
            bash_cooldown: 0.0,
            bash_dir: Vec2::X,
            path: Path::default(),
            target_index: 0,
            path_timer,
            rng,
            hit_this_swing: false,
            hurt_timer: 0.0,
            alive: true,
        }
    }

    // ------------------------------------------------------------------
    // Read accessors for the presentation layer
    // ------------------------------------------------------------------

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Normalized direction the agent faces (toward the player while chasing)
    #[must_use]
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    #[must_use]
    pub fn collision(&self) -> CollisionBox {
        self.tuning.collision
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Animation tag for rendering
    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        if !self.alive {
            return VisualState::Dead;
        }
        if self.hurt_timer > 0.0 {
            return VisualState::Hurt;
        }
        match self.state {
            AgentState::Channeling => VisualState::Telegraph,
            AgentState::Bashing => VisualState::Charging,
            AgentState::Recovering => VisualState::Idle,
            AgentState::Chasing => {
                if self.path.get(self.target_index).is_some() {
                    VisualState::Walking
                } else {
                    VisualState::Idle
                }
            }
        }
    }

    fn collision_box(&self) -> CollisionBox {
        self.tuning.collision
    }

    /// Per-tick displacement cap: nothing, including stacked impulses, may
    /// move the body faster than its charge speed
    fn max_step(&self, dt: f32) -> f32 {
        self.tuning.move_speed * self.tuning.bash_speed_multiplier * dt
    }

    // ------------------------------------------------------------------
    // Path planning
    // ------------------------------------------------------------------

    /// Throttled replan. Runs the pathfinder when the per-agent timer
    /// elapses or the current path has been walked to its end; an empty
    /// (unreachable) result simply waits for the next scheduled attempt.
    pub(crate) fn replan(&mut self, dt: f32, map: &TileMap, player_pos: Vec2) {
        self.path_timer -= dt;
        let exhausted = !self.path.is_empty() && self.target_index >= self.path.len();
        if self.path_timer > 0.0 && !exhausted {
            return;
        }

        let start = map.world_to_tile(self.collision_box().center(self.position));
        let goal = map.world_to_tile(player_pos);

        // Resume near the node we were already walking toward, not our raw
        // position, so a fresh path does not snap the agent backward
        let previous_target = self
            .path
            .get(self.target_index.min(self.path.len().saturating_sub(1)));

        let new_path = pathfinding::find_path(map, start, goal);
        self.target_index = match previous_target {
            Some(node) if !new_path.is_empty() => new_path.nearest_index(node),
            _ => 0,
        };
        if new_path.is_empty() {
            log::debug!("agent {}: no path {:?} -> {:?}", self.index, start, goal);
        }
        self.path = new_path;

        // Close to the player the interval shrinks, so near-range agents
        // track course changes more tightly
        let dist = (player_pos - self.position).length();
        let proximity = (dist / self.tuning.replan_near_distance).clamp(0.3, 1.0);
        let jitter = if self.tuning.replan_jitter > 0.0 {
            self.rng.gen_range(0.0..self.tuning.replan_jitter)
        } else {
            0.0
        };
        self.path_timer = (self.tuning.replan_interval + jitter) * proximity;
    }

    fn follow_path(&mut self, map: &TileMap, dt: f32) {
        let Some(target) = self.path.get(self.target_index) else {
            return;
        };
        let target_pos = map.tile_center(target.x, target.y);
        let delta = target_pos - self.collision_box().center(self.position);
        let dist = delta.length();

        if dist > NODE_REACH {
            let step = (delta / dist) * self.tuning.move_speed * dt;
            self.position = move_with_collision(
                map,
                self.position,
                &self.collision_box(),
                step,
                self.max_step(dt),
            )
            .position;
        } else {
            self.target_index += 1;
        }
    }

    // ------------------------------------------------------------------
    // Per-tick update
    // ------------------------------------------------------------------

    /// Advance the state machine one tick. Separation is applied by the
    /// world beforehand; knockback decay and hit detection run here every
    /// tick regardless of state.
    pub fn update(&mut self, dt: f32, player: &PlayerView, map: &TileMap, events: &mut EventQueue) {
        if !self.alive {
            return;
        }

        if self.bash_cooldown > 0.0 {
            self.bash_cooldown -= dt;
        }
        if self.hurt_timer > 0.0 {
            self.hurt_timer -= dt;
        }
        self.state_timer -= dt;

        match self.state {
            AgentState::Chasing => {
                self.follow_path(map, dt);

                let to_player = player.position - self.position;
                if to_player.length_squared() > f32::EPSILON {
                    self.facing = to_player.normalize();
                }
                if to_player.length() < self.tuning.attack_range && self.bash_cooldown <= 0.0 {
                    self.state = AgentState::Channeling;
                    self.state_timer = self.tuning.channel_time;
                    // Aim is captured once here; the charge never re-aims
                    let dir = to_player.normalize_or_zero();
                    self.bash_dir = if dir == Vec2::ZERO { self.facing } else { dir };
                    log::debug!("agent {}: telegraphing bash", self.index);
                }
            }

            AgentState::Channeling => {
                // Hold position; this wind-up is the player's reaction window
                if self.state_timer <= 0.0 {
                    self.state = AgentState::Bashing;
                    self.state_timer = self.tuning.bash_duration;
                    events.push(WorldEvent::BashStarted {
                        agent: self.index,
                        direction: self.bash_dir,
                    });
                }
            }

            AgentState::Bashing => {
                // Quadratic falloff from full charge speed down to zero
                let progress = 1.0 - (self.state_timer / self.tuning.bash_duration).clamp(0.0, 1.0);
                let decel = 1.0 - progress * progress;
                let speed = self.tuning.move_speed * self.tuning.bash_speed_multiplier * decel;
                self.position = move_with_collision(
                    map,
                    self.position,
                    &self.collision_box(),
                    self.bash_dir * speed * dt,
                    self.max_step(dt),
                )
                .position;

                if self.state_timer <= 0.0 {
                    self.bash_cooldown = self.tuning.bash_cooldown;
                    self.state = AgentState::Recovering;
                    self.state_timer = self.tuning.recover_time;
                }
            }

            AgentState::Recovering => {
                if self.state_timer <= 0.0 {
                    self.state = AgentState::Chasing;
                }
            }
        }

        self.integrate_knockback(dt, map);
        self.handle_attack(player, events);
    }

    /// Apply a separation displacement computed by the world, routed through
    /// the resolver like every other move
    pub(crate) fn apply_separation(&mut self, impulse: Vec2, map: &TileMap, dt: f32) {
        if impulse == Vec2::ZERO || !self.alive {
            return;
        }
        self.position = move_with_collision(
            map,
            self.position,
            &self.collision_box(),
            impulse,
            self.max_step(dt),
        )
        .position;
    }

    fn integrate_knockback(&mut self, dt: f32, map: &TileMap) {
        if !self.knockback.is_active() {
            return;
        }
        let displacement = self.knockback.step(dt);
        let out = move_with_collision(
            map,
            self.position,
            &self.collision_box(),
            displacement,
            self.max_step(dt),
        );
        self.position = out.position;
        // A wall eats the impulse on that axis
        if out.blocked_x {
            self.knockback.cancel_x();
        }
        if out.blocked_y {
            self.knockback.cancel_y();
        }
    }

    /// Test the player's active swing against this agent. Credits at most
    /// one hit per attack activation; the flag clears when the swing ends.
    fn handle_attack(&mut self, player: &PlayerView, events: &mut EventQueue) {
        if !player.attacking {
            self.hit_this_swing = false;
        }
        if !player.attacking || self.hit_this_swing {
            return;
        }

        let delta = self.position - player.position;
        let dist = delta.length();
        if dist > player.attack_range || dist <= 1e-3 {
            return;
        }
        let dir = delta / dist;
        if player.attack_dir.dot(dir) <= HIT_CONE_DOT {
            return;
        }

        self.hit_this_swing = true;
        self.hurt_timer = HURT_FLASH_TIME;
        self.knockback.impulse(dir, self.tuning.knockback_strength);
        self.health -= player.attack_damage;
        events.push(WorldEvent::AgentStruck {
            agent: self.index,
            direction: dir,
            damage: player.attack_damage,
        });
        log::debug!(
            "agent {}: struck for {} ({} hp left)",
            self.index,
            player.attack_damage,
            self.health.max(0.0)
        );

        if self.health <= 0.0 {
            self.alive = false;
            events.push(WorldEvent::AgentSlain { agent: self.index });
            log::debug!("agent {}: slain", self.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::pathfinding::PathNode;
    use crate::world::Obstacle;

    const TILE: i32 = 16;
    const DT: f32 = 1.0 / 60.0;

    fn open_map() -> TileMap {
        TileMap::build(20 * TILE, 20 * TILE, TILE, &[])
    }

    /// Body position that puts the agent's collision-box center on a tile center
    fn pos_for_center_tile(map: &TileMap, x: i32, y: i32) -> Vec2 {
        let bbox = AgentTuning::charger().collision;
        map.tile_center(x, y) - bbox.offset - bbox.size / 2.0
    }

    fn idle_player(pos: Vec2) -> PlayerView {
        PlayerView::idle(pos)
    }

    /// Step the agent until its state changes or the budget runs out
    fn step_until(
        agent: &mut Agent,
        player: &PlayerView,
        map: &TileMap,
        events: &mut EventQueue,
        expected: AgentState,
        max_ticks: usize,
    ) {
        for _ in 0..max_ticks {
            if agent.state() == expected {
                return;
            }
            agent.update(DT, player, map, events);
        }
        panic!("never reached {expected:?}, stuck in {:?}", agent.state());
    }

    #[test]
    fn test_full_attack_cycle() {
        let map = open_map();
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, Vec2::new(160.0, 160.0), 1);
        // In range, off cooldown
        let player = idle_player(Vec2::new(180.0, 160.0));

        assert_eq!(agent.state(), AgentState::Chasing);
        agent.update(DT, &player, &map, &mut events);
        assert_eq!(agent.state(), AgentState::Channeling);

        step_until(&mut agent, &player, &map, &mut events, AgentState::Bashing, 60);
        step_until(&mut agent, &player, &map, &mut events, AgentState::Recovering, 60);
        step_until(&mut agent, &player, &map, &mut events, AgentState::Chasing, 90);

        // Cooldown started when the bash ended
        assert!(agent.bash_cooldown > 0.0);
        events.swap();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, WorldEvent::BashStarted { agent: 0, .. }))
        );
    }

    #[test]
    fn test_cooldown_blocks_channeling_reentry() {
        let map = open_map();
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, Vec2::new(160.0, 160.0), 1);
        let player = idle_player(Vec2::new(180.0, 160.0));

        // Run one full cycle back to Chasing
        agent.update(DT, &player, &map, &mut events);
        step_until(&mut agent, &player, &map, &mut events, AgentState::Bashing, 60);
        step_until(&mut agent, &player, &map, &mut events, AgentState::Recovering, 60);
        step_until(&mut agent, &player, &map, &mut events, AgentState::Chasing, 90);

        // Still in range, but the cooldown must hold it in Chasing
        while agent.bash_cooldown > 0.0 {
            agent.update(DT, &player, &map, &mut events);
            if agent.bash_cooldown > 0.0 {
                assert_ne!(agent.state(), AgentState::Channeling);
            }
        }
    }

    #[test]
    fn test_channeling_holds_position() {
        let map = open_map();
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, Vec2::new(160.0, 160.0), 1);
        let player = idle_player(Vec2::new(180.0, 160.0));

        agent.update(DT, &player, &map, &mut events);
        assert_eq!(agent.state(), AgentState::Channeling);
        let held = agent.position();

        for _ in 0..10 {
            agent.update(DT, &player, &map, &mut events);
            if agent.state() != AgentState::Channeling {
                break;
            }
            assert_eq!(agent.position(), held);
        }
    }

    #[test]
    fn test_bash_aim_is_captured_not_tracked() {
        let map = open_map();
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, Vec2::new(160.0, 160.0), 1);

        let player = idle_player(Vec2::new(180.0, 160.0));
        agent.update(DT, &player, &map, &mut events);
        assert_eq!(agent.state(), AgentState::Channeling);

        // Player repositions during the telegraph; the charge must still go +X
        let moved = idle_player(Vec2::new(160.0, 300.0));
        step_until(&mut agent, &moved, &map, &mut events, AgentState::Bashing, 60);
        let before = agent.position();
        agent.update(DT, &moved, &map, &mut events);
        let step = agent.position() - before;

        assert!(step.x > 0.0);
        assert!(step.y.abs() < 1e-3);
    }

    #[test]
    fn test_single_hit_credit_per_swing() {
        let map = open_map();
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, Vec2::new(180.0, 160.0), 1);

        // Wide range so knockback drift can't push the agent out of reach
        let mut swing = idle_player(Vec2::new(160.0, 160.0)).attacking(Vec2::X);
        swing.attack_range = 100.0;
        agent.update(DT, &swing, &map, &mut events);
        let health_after_first = agent.health();
        assert!(health_after_first < agent.tuning.max_health);

        // Same activation: no second credit
        for _ in 0..10 {
            agent.update(DT, &swing, &map, &mut events);
        }
        assert_eq!(agent.health(), health_after_first);

        // Swing ends, new swing lands again
        let mut rest = idle_player(Vec2::new(160.0, 160.0));
        rest.attack_range = 100.0;
        agent.update(DT, &rest, &map, &mut events);
        agent.update(DT, &swing, &map, &mut events);
        assert!(agent.health() < health_after_first);
    }

    #[test]
    fn test_hit_outside_cone_or_range_misses() {
        let map = open_map();
        let mut events = EventQueue::new();

        // Behind the player relative to the aim direction
        let mut behind = Agent::new(0, AgentKind::Charger, Vec2::new(140.0, 160.0), 1);
        let swing = idle_player(Vec2::new(160.0, 160.0)).attacking(Vec2::X);
        behind.update(DT, &swing, &map, &mut events);
        assert_eq!(behind.health(), behind.tuning.max_health);

        // In the cone but out of range
        let mut far = Agent::new(1, AgentKind::Charger, Vec2::new(300.0, 160.0), 1);
        far.update(DT, &swing, &map, &mut events);
        assert_eq!(far.health(), far.tuning.max_health);
    }

    #[test]
    fn test_hit_applies_knockback_and_event() {
        let map = open_map();
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, Vec2::new(180.0, 160.0), 1);

        let swing = idle_player(Vec2::new(160.0, 160.0)).attacking(Vec2::X);
        let before = agent.position();
        agent.update(DT, &swing, &map, &mut events);
        assert_eq!(agent.visual_state(), VisualState::Hurt);

        // Knockback integrates on the following tick, away from the player
        agent.update(DT, &swing, &map, &mut events);
        assert!(agent.position().x > before.x);

        events.swap();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, WorldEvent::AgentStruck { agent: 0, .. }))
        );
    }

    #[test]
    fn test_lethal_hit_raises_slain() {
        let map = open_map();
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Stalker, Vec2::new(180.0, 160.0), 1);

        let mut swing = idle_player(Vec2::new(160.0, 160.0)).attacking(Vec2::X);
        swing.attack_damage = 1000.0;
        agent.update(DT, &swing, &map, &mut events);

        assert!(!agent.is_alive());
        assert_eq!(agent.visual_state(), VisualState::Dead);
        events.swap();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, WorldEvent::AgentSlain { agent: 0 }))
        );

        // Dead agents are inert
        let pos = agent.position();
        agent.update(DT, &swing, &map, &mut events);
        assert_eq!(agent.position(), pos);
    }

    #[test]
    fn test_knockback_stops_at_wall() {
        // Wall directly to the agent's right
        let wall = Obstacle::blocking("wall", 12 * TILE, 0, TILE - 1, 20 * TILE - 1);
        let map = TileMap::build(20 * TILE, 20 * TILE, TILE, &[wall]);
        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, Vec2::new(185.0, 160.0), 1);

        let swing = idle_player(Vec2::new(165.0, 160.0)).attacking(Vec2::X);
        agent.update(DT, &swing, &map, &mut events);
        let rest = idle_player(Vec2::new(165.0, 160.0));
        for _ in 0..120 {
            agent.update(DT, &rest, &map, &mut events);
        }

        assert!(!agent.tuning.collision.overlaps_blocked(agent.position(), &map));
        // Blocked axis cancels the remaining impulse
        assert_eq!(agent.knockback.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_replan_resumes_at_previous_target_node() {
        let map = open_map();
        let mut agent = Agent::new(0, AgentKind::Charger, pos_for_center_tile(&map, 2, 2), 1);

        // Walking an old straight path, four nodes in
        agent.path = pathfinding::find_path(&map, (2, 2), (10, 2));
        agent.target_index = 4;
        let previous = agent.path.get(4).unwrap();
        assert_eq!(previous, PathNode { x: 6, y: 2 });

        agent.path_timer = 0.0;
        agent.replan(DT, &map, map.tile_center(10, 6));

        assert!(!agent.path.is_empty());
        assert_eq!(agent.target_index, agent.path.nearest_index(previous));
        // Regression: resuming from the raw agent position would give 0
        assert_ne!(agent.target_index, 0);
    }

    #[test]
    fn test_replan_waits_for_timer_when_unreachable() {
        // Player sealed in; path stays empty and the agent holds position
        let ring = [
            (8, 8),
            (9, 8),
            (10, 8),
            (8, 9),
            (10, 9),
            (8, 10),
            (9, 10),
            (10, 10),
        ];
        let objects: Vec<Obstacle> = ring
            .iter()
            .map(|&(x, y)| Obstacle::blocking("wall", x * TILE, y * TILE, TILE - 1, TILE - 1))
            .collect();
        let map = TileMap::build(20 * TILE, 20 * TILE, TILE, &objects);

        let mut events = EventQueue::new();
        let mut agent = Agent::new(0, AgentKind::Charger, pos_for_center_tile(&map, 2, 2), 1);
        let player = idle_player(map.tile_center(9, 9));

        agent.path_timer = 0.0;
        agent.replan(DT, &map, player.position);
        assert!(agent.path.is_empty());
        assert!(agent.path_timer > 0.0, "failed replan still reschedules");

        let held = agent.position();
        for _ in 0..30 {
            agent.replan(DT, &map, player.position);
            agent.update(DT, &player, &map, &mut events);
        }
        assert_eq!(agent.position(), held);
    }

    #[test]
    fn test_follow_path_advances_node_index() {
        let map = open_map();
        let mut events = EventQueue::new();
        let start = pos_for_center_tile(&map, 2, 2);
        let mut agent = Agent::new(0, AgentKind::Charger, start, 1);
        let player = idle_player(map.tile_center(9, 2));

        agent.path = pathfinding::find_path(&map, (2, 2), (9, 2));
        let first_center = agent.position().x;

        for _ in 0..240 {
            agent.update(DT, &player, &map, &mut events);
        }
        assert!(agent.target_index > 0, "agent never advanced along its path");
        assert!(agent.position().x > first_center);
    }

    #[test]
    fn test_jitter_is_reproducible_per_seed() {
        let a = Agent::new(3, AgentKind::Charger, Vec2::ZERO, 42);
        let b = Agent::new(3, AgentKind::Charger, Vec2::ZERO, 42);
        let c = Agent::new(4, AgentKind::Charger, Vec2::ZERO, 42);

        assert_eq!(a.path_timer, b.path_timer);
        assert_ne!(a.path_timer, c.path_timer);
    }

    #[test]
    fn test_kind_presets_differ() {
        let charger = AgentKind::Charger.tuning();
        let stalker = AgentKind::Stalker.tuning();
        assert!(stalker.move_speed > charger.move_speed);
        assert!(stalker.channel_time < charger.channel_time);
        assert!(stalker.max_health < charger.max_health);
    }
}
