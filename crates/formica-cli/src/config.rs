//! Configuration management for the Formica CLI.

use anyhow::{Context, Result};
use formica_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "formica.toml";

/// Formica project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nest: NestConfig,
    #[serde(default)]
    pub pheromone: PheromoneConfig,
    #[serde(default)]
    pub food: FoodConfig,
    /// Extra stimulus kinds on top of the built-in ones.
    #[serde(default, rename = "stimulus", skip_serializing_if = "Vec::is_empty")]
    pub stimuli: Vec<StimulusType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestConfig {
    #[serde(default = "default_nest_name")]
    pub name: String,
    #[serde(default = "default_nest_side")]
    pub width: i64,
    #[serde(default = "default_nest_side")]
    pub height: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PheromoneConfig {
    #[serde(default = "default_field_width")]
    pub width: i64,
    #[serde(default = "default_field_height")]
    pub height: i64,
    /// Levels below this are dropped after each decay tick.
    #[serde(default = "default_evaporation_threshold")]
    pub evaporation_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodConfig {
    #[serde(default = "default_food_name")]
    pub name: String,
    #[serde(default = "default_food_side")]
    pub width: i64,
    #[serde(default = "default_food_side")]
    pub height: i64,
    #[serde(default = "default_food_total")]
    pub total: f64,
}

// Default value functions
fn default_nest_name() -> String { "nest".to_string() }
fn default_nest_side() -> i64 { 10 }
fn default_field_width() -> i64 { 64 }
fn default_field_height() -> i64 { 48 }
fn default_evaporation_threshold() -> f64 { 1e-6 }
fn default_food_name() -> String { "food".to_string() }
fn default_food_side() -> i64 { 4 }
fn default_food_total() -> f64 { 100.0 }

impl Default for Config {
    fn default() -> Self {
        Self {
            nest: NestConfig::default(),
            pheromone: PheromoneConfig::default(),
            food: FoodConfig::default(),
            stimuli: Vec::new(),
        }
    }
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            name: default_nest_name(),
            width: default_nest_side(),
            height: default_nest_side(),
        }
    }
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            width: default_field_width(),
            height: default_field_height(),
            evaporation_threshold: default_evaporation_threshold(),
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            name: default_food_name(),
            width: default_food_side(),
            height: default_food_side(),
            total: default_food_total(),
        }
    }
}

impl Config {
    /// Load config from formica.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Built-in stimulus kinds plus the configured ones.
    pub fn registry(&self) -> Result<StimulusRegistry> {
        let mut registry = StimulusRegistry::new();
        for kind in &self.stimuli {
            registry
                .register(kind.clone())
                .with_context(|| format!("Failed to register stimulus {}", kind.name()))?;
        }
        Ok(registry)
    }
}

/// Find formica.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
