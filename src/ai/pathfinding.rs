//! A* pathfinding on the coarse walkability grid
//!
//! 8-directional grid search for AI agents, with a one-tile padding rule so
//! a tile-sized body never clips corners or squeezes through diagonal gaps.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::world::TileMap;

const SQRT_2: f32 = std::f32::consts::SQRT_2;

/// A single path waypoint in tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
    pub x: i32,
    pub y: i32,
}

impl PathNode {
    /// Squared grid distance to another node
    #[must_use]
    pub fn dist_sq(self, other: PathNode) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Ordered node sequence from start to goal, inclusive.
///
/// An empty path means "no route"; callers treat it as hold-position.
#[derive(Debug, Clone, Default)]
pub struct Path {
    nodes: Vec<PathNode>,
}

impl Path {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<PathNode> {
        self.nodes.get(index).copied()
    }

    #[must_use]
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Index of the node closest to `target`, or 0 for an empty path.
    ///
    /// Used to resume a freshly computed path near the node an agent was
    /// already walking toward, instead of snapping back to node 0.
    #[must_use]
    pub fn nearest_index(&self, target: PathNode) -> usize {
        self.nodes
            .iter()
            .enumerate()
            .min_by_key(|(_, n)| n.dist_sq(target))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// A* open-set entry. Equality is by coordinate only; ordering follows the
/// search contract: min f-cost first, FIFO among ties (seq is a monotone
/// insertion counter).
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    x: i32,
    y: i32,
    g_cost: f32,
    f_cost: f32,
    seq: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap; older entries win ties
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// True if any cell within a 1-tile Chebyshev radius is blocked.
///
/// Cells off the map count as open, so edge-of-map routes stay valid.
fn padded_blocked(map: &TileMap, tile_x: i32, tile_y: i32) -> bool {
    for y in (tile_y - 1)..=(tile_y + 1) {
        for x in (tile_x - 1)..=(tile_x + 1) {
            if map.is_blocked(x, y) {
                return true;
            }
        }
    }
    false
}

fn heuristic(x: i32, y: i32, goal_x: i32, goal_y: i32) -> f32 {
    // Euclidean distance gives smooth diagonals and is admissible for the
    // 1 / sqrt(2) step costs, so the first goal pop is optimal
    let dx = (x - goal_x) as f32;
    let dy = (y - goal_y) as f32;
    (dx * dx + dy * dy).sqrt()
}

fn neighbors(x: i32, y: i32) -> SmallVec<[(i32, i32); 8]> {
    let mut result = SmallVec::new();
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            result.push((x + dx, y + dy));
        }
    }
    result
}

/// Find a path between two tiles using A*.
///
/// Returns an empty path when the start or goal is out of bounds or the
/// goal is unreachable; the caller holds position and retries later.
#[must_use]
pub fn find_path(map: &TileMap, start: (i32, i32), goal: (i32, i32)) -> Path {
    let (start_x, start_y) = start;
    let (goal_x, goal_y) = goal;

    // Bounds check early to avoid searching for an off-map goal
    if !map.in_bounds(start_x, start_y) || !map.in_bounds(goal_x, goal_y) {
        return Path::default();
    }

    let mut open = BinaryHeap::new();
    let mut closed: FxHashSet<(i32, i32)> = FxHashSet::default();
    let mut came_from: FxHashMap<(i32, i32), (i32, i32)> = FxHashMap::default();
    let mut g_score: FxHashMap<(i32, i32), f32> = FxHashMap::default();
    let mut seq: u64 = 0;

    g_score.insert((start_x, start_y), 0.0);
    open.push(OpenNode {
        x: start_x,
        y: start_y,
        g_cost: 0.0,
        f_cost: heuristic(start_x, start_y, goal_x, goal_y),
        seq,
    });

    while let Some(current) = open.pop() {
        let key = (current.x, current.y);

        if key == (goal_x, goal_y) {
            return reconstruct(&came_from, key);
        }

        // Skip entries made stale by a later cost relaxation
        if current.g_cost > g_score.get(&key).copied().unwrap_or(f32::MAX) {
            continue;
        }
        closed.insert(key);

        for (nx, ny) in neighbors(current.x, current.y) {
            if !map.in_bounds(nx, ny) {
                continue;
            }
            // 1-tile padding keeps a tile-sized body off corners
            if padded_blocked(map, nx, ny) {
                continue;
            }
            if closed.contains(&(nx, ny)) {
                continue;
            }

            let diagonal = (nx - current.x).abs() + (ny - current.y).abs() == 2;
            let step = if diagonal { SQRT_2 } else { 1.0 };
            let tentative_g = current.g_cost + step;

            if tentative_g < g_score.get(&(nx, ny)).copied().unwrap_or(f32::MAX) {
                came_from.insert((nx, ny), key);
                g_score.insert((nx, ny), tentative_g);
                seq += 1;
                open.push(OpenNode {
                    x: nx,
                    y: ny,
                    g_cost: tentative_g,
                    f_cost: tentative_g + heuristic(nx, ny, goal_x, goal_y),
                    seq,
                });
            }
        }
    }

    // Open set exhausted: goal unreachable
    Path::default()
}

fn reconstruct(came_from: &FxHashMap<(i32, i32), (i32, i32)>, goal: (i32, i32)) -> Path {
    let mut nodes = vec![PathNode {
        x: goal.0,
        y: goal.1,
    }];
    let mut curr = goal;
    while let Some(&prev) = came_from.get(&curr) {
        nodes.push(PathNode {
            x: prev.0,
            y: prev.1,
        });
        curr = prev;
    }
    nodes.reverse();
    Path { nodes }
}
