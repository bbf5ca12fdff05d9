// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::moves::Heuristics;
use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub strategy: StrategyConfig,
    pub debug: DebugConfig,
}

/// Values returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    #[serde(default)]
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Move selection switches
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Emitted when no safe move exists
    pub default_move: Direction,
    pub seek_food: bool,
    pub avoid_head_adjacency: bool,
    /// Makes choices reproducible: each turn seeds its own rng from `seed ^ turn`
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl StrategyConfig {
    /// Filter settings handed to the move selector
    pub fn heuristics(&self) -> Heuristics {
        Heuristics {
            seek_food: self.seek_food,
            avoid_head_adjacency: self.avoid_head_adjacency,
            default_move: self.default_move,
        }
    }
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: String::new(),
                color: "#880088".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            strategy: StrategyConfig {
                default_move: Direction::Down,
                seek_food: true,
                avoid_head_adjacency: true,
                rng_seed: None,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
