//! Loader and costume configuration.

use serde::{Deserialize, Serialize};

/// Format constants for the binary chore loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Chore names must be strictly shorter than this (terminator included).
    pub max_name_len: u32,
    /// Raw chore durations below this are taken as seconds and scaled to milliseconds.
    pub seconds_threshold: f32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_name_len: 32,
            seconds_threshold: 1000.0,
        }
    }
}

/// Configuration for a costume instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostumeConfig {
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Capacity hint for the material cache.
    #[serde(default)]
    pub initial_material_capacity: usize,
}

impl CostumeConfig {
    /// Parse a config from JSON; missing fields fall back to defaults.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
