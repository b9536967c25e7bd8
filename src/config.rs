//! Game configuration
//!
//! Read from a JSON file; any missing field takes its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, STARTING_LIVES};
use crate::sim::PowerUpKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Screen ===
    pub width: f32,
    pub height: f32,

    // === Gameplay ===
    pub starting_lives: u32,
    /// Seed for power-up drop rolls
    pub seed: u64,
    /// Level files, in menu order
    pub levels: Vec<PathBuf>,
    /// Power-up names that never drop (e.g. "chaos")
    pub disabled_power_ups: Vec<String>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Headless runs ===
    /// Frames to simulate
    pub frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,

            starting_lives: STARTING_LIVES,
            seed: 0x5eed_b10c,
            levels: ["one", "two", "three", "four", "five"]
                .iter()
                .map(|name| PathBuf::from(format!("levels/{name}.lvl")))
                .collect(),
            disabled_power_ups: Vec::new(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            frames: 60 * 60,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `path`, falling back to defaults if it is missing or bad
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Invalid config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Height of the brick area: the top half of the screen
    pub fn level_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Disabled kinds; unknown names are skipped
    pub fn disabled_kinds(&self) -> Vec<PowerUpKind> {
        self.disabled_power_ups
            .iter()
            .filter_map(|name| {
                let kind = PowerUpKind::from_name(name);
                if kind.is_none() {
                    log::debug!("Ignoring unknown power-up {name:?}");
                }
                kind
            })
            .collect()
    }
}
