//! World setup descriptors
//!
//! Arena layouts are plain data: map dimensions, obstacle rectangles and
//! agent spawns, loadable from RON or JSON.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ai::{AgentKind, SeparationParams};
use crate::world::grid::Obstacle;

/// One agent to place at world setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpawn {
    pub kind: AgentKind,
    pub position: Vec2,
}

/// Everything needed to build a [`crate::world::World`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Map width in pixels
    pub map_width: i32,
    /// Map height in pixels
    pub map_height: i32,
    /// Tile edge length in pixels
    pub tile_size: i32,
    /// Seed for per-agent timing jitter
    pub seed: u64,
    /// Placed objects stamped onto the tile grid, in order
    pub obstacles: Vec<Obstacle>,
    /// Agents present from the first tick
    pub spawns: Vec<AgentSpawn>,
    /// Separation force tuning
    #[serde(default)]
    pub separation: SeparationParams,
}

impl WorldConfig {
    /// Minimal arena: the given pixel dimensions with a one-tile blocked
    /// border, no interior obstacles, no agents.
    #[must_use]
    pub fn bordered(map_width: i32, map_height: i32, tile_size: i32, seed: u64) -> Self {
        let t = tile_size;
        let obstacles = vec![
            Obstacle::blocking("border-bottom", 0, 0, map_width - 1, t - 1),
            Obstacle::blocking("border-top", 0, map_height - t, map_width - 1, t - 1),
            Obstacle::blocking("border-left", 0, 0, t - 1, map_height - 1),
            Obstacle::blocking("border-right", map_width - t, 0, t - 1, map_height - 1),
        ];
        Self {
            map_width,
            map_height,
            tile_size,
            seed,
            obstacles,
            spawns: Vec::new(),
            separation: SeparationParams::default(),
        }
    }

    /// Save to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Self =
            ron::from_str(&content).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        Ok(config)
    }

    /// Save to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        Ok(config)
    }
}

/// Errors from loading or saving world configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileKind;

    fn sample_config() -> WorldConfig {
        let mut config = WorldConfig::bordered(320, 320, 16, 7);
        config.obstacles.push(Obstacle {
            name: "pillar".into(),
            pos: (96, 96),
            offset: (0, 0),
            size: (31, 31),
            kind: TileKind::Blocked,
        });
        config.spawns.push(AgentSpawn {
            kind: AgentKind::Charger,
            position: Vec2::new(250.0, 150.0),
        });
        config
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = sample_config();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: WorldConfig = ron::from_str(&ron_str).unwrap();

        assert_eq!(loaded.map_width, 320);
        assert_eq!(loaded.obstacles.len(), 5);
        assert_eq!(loaded.spawns.len(), 1);
        assert_eq!(loaded.spawns[0].kind, AgentKind::Charger);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = sample_config();
        let json_str = serde_json::to_string_pretty(&config).unwrap();
        let loaded: WorldConfig = serde_json::from_str(&json_str).unwrap();

        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.obstacles[4].name, "pillar");
    }

    #[test]
    fn test_bordered_blocks_the_rim() {
        let config = WorldConfig::bordered(160, 160, 16, 0);
        let map = crate::world::TileMap::build(
            config.map_width,
            config.map_height,
            config.tile_size,
            &config.obstacles,
        );

        for i in 0..10 {
            assert!(map.is_blocked(i, 0));
            assert!(map.is_blocked(i, 9));
            assert!(map.is_blocked(0, i));
            assert!(map.is_blocked(9, i));
        }
        assert!(!map.is_blocked(5, 5));
    }
}
