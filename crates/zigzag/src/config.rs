use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::tracker::types::TrackerConfig;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "zigzag";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<TuningConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

/// Overrides for the geometric tests. Unset fields keep the built-in values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersection_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_radius: Option<f64>,

    /// Lane width around the ideal segment. Absent or `0` disables the lane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_corridor_width: Option<f64>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Read the config at `path`. Unlike progress, a missing file is an error
    /// so `config` commands can point at the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "No config at {}. Run `zigzag config show` to see defaults.",
                path.display()
            );
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// The saved config, or built-in defaults when there is none. An invalid
    /// file is reported and ignored.
    pub fn load_or_default() -> Self {
        let path = match Self::path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("{e:#}; using default tuning");
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("{e:#}; using default tuning");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config dir: {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# ZigZag configuration\n{yaml}");
        std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
        tracing::debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Built-in tuning with this config's overrides applied.
    pub fn tracker_config(&self) -> TrackerConfig {
        let mut config = TrackerConfig::default();
        if let Some(tuning) = &self.tuning {
            if let Some(v) = tuning.intersection_threshold {
                config.intersection_threshold = v;
            }
            if let Some(v) = tuning.warning_threshold {
                config.warning_threshold = v;
            }
            if let Some(v) = tuning.detection_radius {
                config.detection_radius = v;
            }
            config.path_corridor_width = tuning.path_corridor_width.filter(|w| *w > 0.0);
        }
        config.normalized()
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.windowed" => {
                let windowed = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            "tuning.intersection_threshold" => {
                let v = parse_distance(key, value)?;
                let warning = self.tracker_config().warning_threshold;
                let warning_set = self
                    .tuning
                    .as_ref()
                    .is_some_and(|t| t.warning_threshold.is_some());
                if warning_set && v > warning {
                    anyhow::bail!(
                        "Invalid intersection_threshold: {value}. Must not exceed warning_threshold ({warning})."
                    );
                }
                self.tuning
                    .get_or_insert_with(TuningConfig::default)
                    .intersection_threshold = Some(v);
            }
            "tuning.warning_threshold" => {
                let v = parse_distance(key, value)?;
                let intersection = self.tracker_config().intersection_threshold;
                if v < intersection {
                    anyhow::bail!(
                        "Invalid warning_threshold: {value}. Must be at least intersection_threshold ({intersection})."
                    );
                }
                self.tuning
                    .get_or_insert_with(TuningConfig::default)
                    .warning_threshold = Some(v);
            }
            "tuning.detection_radius" => {
                let v = parse_distance(key, value)?;
                if v == 0.0 {
                    anyhow::bail!("Invalid detection_radius: {value}. Must be greater than 0.");
                }
                self.tuning
                    .get_or_insert_with(TuningConfig::default)
                    .detection_radius = Some(v);
            }
            "tuning.path_corridor_width" => {
                let width = match value {
                    "off" | "none" => None,
                    "on" => Some(TrackerConfig::DEFAULT_CORRIDOR_WIDTH),
                    _ => Some(parse_distance(key, value)?).filter(|w| *w > 0.0),
                };
                self.tuning
                    .get_or_insert_with(TuningConfig::default)
                    .path_corridor_width = width;
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.windowed, tuning.intersection_threshold, tuning.warning_threshold, tuning.detection_radius, tuning.path_corridor_width"
            ),
        }
        Ok(())
    }
}

/// Distances are in grid units: finite, non-negative, and smaller than the board.
fn parse_distance(key: &str, value: &str) -> Result<f64> {
    let v: f64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {key}: {value}. Must be a number."))?;
    if !v.is_finite() || !(0.0..8.0).contains(&v) {
        anyhow::bail!("Invalid {key}: {value}. Must be between 0 and 8 grid units.");
    }
    Ok(v)
}
