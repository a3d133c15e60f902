use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "progress.yaml";
const APP_DIR: &str = "zigzag";

/// The two numbers that survive between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default = "first_level")]
    pub current_level: u32,

    #[serde(default = "first_level")]
    pub best_level: u32,
}

fn first_level() -> u32 {
    1
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_level: 1,
            best_level: 1,
        }
    }
}

impl Progress {
    pub fn new(current_level: u32, best_level: u32) -> Self {
        Self {
            current_level,
            best_level,
        }
        .sanitized()
    }

    /// Levels start at 1 and the best level is never below the current one.
    pub fn sanitized(self) -> Self {
        let current_level = self.current_level.max(1);
        Self {
            current_level,
            best_level: self.best_level.max(current_level),
        }
    }

    /// Move to the next level, raising the best level if it was passed.
    /// Returns the new level.
    pub fn advance(&mut self) -> u32 {
        self.current_level = self.current_level.saturating_add(1);
        if self.current_level > self.best_level {
            self.best_level = self.current_level;
        }
        self.current_level
    }

    /// Back to level 1. The best level is kept.
    pub fn reset_level(&mut self) {
        self.current_level = 1;
    }

    pub fn path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Read progress from `path`. A missing file is a fresh start, not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        let progress: Progress = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid progress file {}", path.display()))?;
        Ok(progress.sanitized())
    }

    pub fn load_or_default() -> Self {
        match Self::path() {
            Ok(path) => Self::load_or_recover_from(&path),
            Err(e) => {
                tracing::warn!("{e:#}; starting from level 1");
                Self::default()
            }
        }
    }

    /// Like [`Progress::load_from`], but an unreadable file is moved to
    /// `progress.yaml.bak` so the next save cannot overwrite it.
    pub fn load_or_recover_from(path: &Path) -> Self {
        let err = match Self::load_from(path) {
            Ok(progress) => return progress,
            Err(e) => e,
        };
        let backup = path.with_extension("yaml.bak");
        match std::fs::rename(path, &backup) {
            Ok(()) => tracing::warn!(
                "{err:#}; kept it as {} and starting from level 1",
                backup.display()
            ),
            Err(e) => tracing::warn!(
                "{err:#}; could not move it to {}: {e}; starting from level 1",
                backup.display()
            ),
        }
        Self::default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create data dir: {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).with_context(|| format!("write {}", path.display()))?;
        tracing::debug!(
            current_level = self.current_level,
            best_level = self.best_level,
            "saved progress to {}",
            path.display()
        );
        Ok(())
    }
}
