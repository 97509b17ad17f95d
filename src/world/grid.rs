//! Tile classification grid built from placed obstacle rectangles

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Classification of a single map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable floor
    #[default]
    Open,
    /// Solid geometry (world border or obstacle), blocks movement and pathing
    Blocked,
    /// Stair tile, walkable
    Stairs,
    /// Altar interaction zone, walkable
    Altar,
    /// Speed boost zone, walkable
    Boost,
}

/// A placed rectangular object that stamps its classification onto the grid.
///
/// Coordinates are in map pixels; the collision rectangle is the object
/// position plus `offset`, extending `size` pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Identifier for debugging
    pub name: String,
    /// Top-left corner in pixels
    pub pos: (i32, i32),
    /// Offset of the collision rectangle from `pos`
    pub offset: (i32, i32),
    /// Collision rectangle size in pixels
    pub size: (i32, i32),
    /// Classification this rectangle stamps
    pub kind: TileKind,
}

impl Obstacle {
    /// Convenience constructor for a blocking rectangle with no offset.
    pub fn blocking(name: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            name: name.into(),
            pos: (x, y),
            offset: (0, 0),
            size: (w, h),
            kind: TileKind::Blocked,
        }
    }
}

/// Static tile map with a derived coarse walkability grid.
///
/// Built once at world setup; immutable afterwards. The fine grid holds a
/// `TileKind` per cell, the coarse grid a single `blocked` bit used by the
/// pathfinder (doors, altars and boosts are not obstacles there).
#[derive(Debug, Clone)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: i32,
    tiles: Vec<TileKind>,
    blocked: Vec<bool>,
}

impl TileMap {
    /// Build a map from its pixel dimensions and a list of placed objects.
    ///
    /// Objects are stamped in registration order; later objects overwrite
    /// earlier ones in overlapping cells.
    #[must_use]
    pub fn build(map_width: i32, map_height: i32, tile_size: i32, objects: &[Obstacle]) -> Self {
        let width = (map_width / tile_size).max(0) as usize;
        let height = (map_height / tile_size).max(0) as usize;

        let mut map = Self {
            width,
            height,
            tile_size,
            tiles: vec![TileKind::Open; width * height],
            blocked: vec![false; width * height],
        };

        for obj in objects {
            map.stamp(obj);
        }

        // Coarse walkability, derived once after all stamps
        for i in 0..map.tiles.len() {
            map.blocked[i] = map.tiles[i] == TileKind::Blocked;
        }

        log::debug!(
            "tile map built: {}x{} tiles of {} px, {} objects",
            width,
            height,
            tile_size,
            objects.len()
        );
        map
    }

    /// Stamp one object's collision rectangle onto the fine grid.
    fn stamp(&mut self, obj: &Obstacle) {
        let start_x = (obj.pos.0 + obj.offset.0) / self.tile_size;
        let start_y = (obj.pos.1 + obj.offset.1) / self.tile_size;
        let end_x = (obj.pos.0 + obj.offset.0 + obj.size.0) / self.tile_size;
        let end_y = (obj.pos.1 + obj.offset.1 + obj.size.1) / self.tile_size;

        for y in start_y..=end_y {
            for x in start_x..=end_x {
                if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                    self.tiles[y as usize * self.width + x as usize] = obj.kind;
                }
            }
        }
    }

    /// Width in tiles
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile edge length in pixels
    #[must_use]
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Check whether a tile coordinate lies on the map
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Check a tile's classification; out-of-range coordinates are never a match.
    #[must_use]
    pub fn is_tile(&self, x: i32, y: i32, kind: TileKind) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.tiles[y as usize * self.width + x as usize] == kind
    }

    /// Coarse walkability query for the pathfinder; out-of-range is open.
    #[must_use]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.blocked[y as usize * self.width + x as usize]
    }

    /// Convert a world position to the tile containing it
    #[must_use]
    pub fn world_to_tile(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.tile_size as f32).floor() as i32,
            (pos.y / self.tile_size as f32).floor() as i32,
        )
    }

    /// World-space center of a tile
    #[must_use]
    pub fn tile_center(&self, x: i32, y: i32) -> Vec2 {
        let ts = self.tile_size as f32;
        Vec2::new(x as f32 * ts + ts / 2.0, y as f32 * ts + ts / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_map() -> TileMap {
        TileMap::build(160, 160, 16, &[])
    }

    #[test]
    fn test_empty_map_is_open() {
        let map = open_map();
        assert_eq!(map.width(), 10);
        assert_eq!(map.height(), 10);
        for y in 0..10 {
            for x in 0..10 {
                assert!(!map.is_blocked(x, y));
                assert!(map.is_tile(x, y, TileKind::Open));
            }
        }
    }

    #[test]
    fn test_stamp_marks_inclusive_tile_range() {
        let wall = Obstacle::blocking("wall", 16, 16, 32, 16);
        let map = TileMap::build(160, 160, 16, &[wall]);

        // (16..=48, 16..=32) px covers tiles x 1..=3, y 1..=2 inclusive
        for y in 1..=2 {
            for x in 1..=3 {
                assert!(map.is_blocked(x, y), "tile ({x},{y}) should be blocked");
            }
        }
        assert!(!map.is_blocked(0, 0));
        assert!(!map.is_blocked(4, 1));
    }

    #[test]
    fn test_last_write_wins() {
        let wall = Obstacle::blocking("wall", 0, 0, 16, 16);
        let altar = Obstacle {
            name: "altar".into(),
            pos: (0, 0),
            offset: (0, 0),
            size: (16, 16),
            kind: TileKind::Altar,
        };
        let map = TileMap::build(160, 160, 16, &[wall, altar]);

        assert!(map.is_tile(0, 0, TileKind::Altar));
        // Altar is walkable for the pathfinder
        assert!(!map.is_blocked(0, 0));
    }

    #[test]
    fn test_out_of_range_queries_degrade_gracefully() {
        let map = open_map();
        assert!(!map.is_blocked(-1, 0));
        assert!(!map.is_blocked(0, -1));
        assert!(!map.is_blocked(100, 100));
        assert!(!map.is_tile(-5, -5, TileKind::Open));
    }

    #[test]
    fn test_offset_obstacle_stamps_collision_rect_not_sprite() {
        let obj = Obstacle {
            name: "statue".into(),
            pos: (32, 32),
            offset: (16, 16),
            size: (16, 16),
            kind: TileKind::Blocked,
        };
        let map = TileMap::build(160, 160, 16, &[obj]);

        assert!(!map.is_blocked(2, 2));
        assert!(map.is_blocked(3, 3));
    }

    #[test]
    fn test_world_to_tile_and_center_roundtrip() {
        let map = open_map();
        let center = map.tile_center(3, 7);
        assert_eq!(map.world_to_tile(center), (3, 7));
        assert_eq!(center, Vec2::new(56.0, 120.0));
    }
}
