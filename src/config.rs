// Configuration module for reading Snake.toml
// Every threshold the move policy uses lives here rather than in the code.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub strategy: StrategyConfig,
    pub policy: PolicyConfig,
    pub perimeter: PerimeterConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Response deadline handling
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Which move strategy answers /move
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Flood-fill scoring with the prioritized policy
    Scored,
    /// Walk to the nearest corner and circle it
    Perimeter,
    /// Keep going the same way while it is safe, otherwise pick at random
    Wanderer,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Scored => "scored",
            StrategyKind::Perimeter => "perimeter",
            StrategyKind::Wanderer => "wanderer",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
}

/// Thresholds for the scored move policy
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Flood fill depth for candidate scoring. Omit to use our own length.
    #[serde(default)]
    pub depth_limit: Option<usize>,
    /// Flood fill depth around opponent heads
    pub threat_zone_depth: usize,
    /// Forage unconditionally before this turn
    pub early_turn_threshold: i32,
    /// Forage whenever health drops below this
    pub forage_health_threshold: i32,
    /// Above this many snakes, play for room
    pub population_threshold: usize,
    /// In a crowded game, below this health prefer food and above it avoid food
    pub population_hunger_threshold: i32,
    /// Head-to-head: below this health seek food, otherwise roam
    pub low_health_threshold: i32,
}

impl PolicyConfig {
    /// Depth for candidate flood fills, given our current length
    pub fn depth_for(&self, length: i32) -> usize {
        self.depth_limit
            .unwrap_or_else(|| usize::try_from(length).unwrap_or(0))
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            depth_limit: None,
            threat_zone_depth: 2,
            early_turn_threshold: 70,
            forage_health_threshold: 50,
            population_threshold: 7,
            population_hunger_threshold: 30,
            low_health_threshold: 45,
        }
    }
}

/// Corner patrol shape
#[derive(Debug, Deserialize, Clone)]
pub struct PerimeterConfig {
    /// Cells along the wall before the loop turns back
    pub loop_length: usize,
}

/// Returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
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

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            strategy: StrategyConfig {
                kind: StrategyKind::Scored,
            },
            policy: PolicyConfig::default(),
            perimeter: PerimeterConfig { loop_length: 5 },
            appearance: AppearanceConfig {
                author: "Dave-Smith".to_string(),
                color: "#9af5b2".to_string(),
                head: "silly".to_string(),
                tail: "bolt".to_string(),
                version: "0.1.0".to_string(),
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
