// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::{FileSlot, MemorySlot, StorageSlot};

/// The name of the application, used for directories and files.
pub const APP_NAME: &str = "yearmark";

/// Seconds between two checks of the current day.
pub const DEFAULT_TICK_INTERVAL: u64 = 60;

/// Configuration for yearmark.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Default directory for exported backups.
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,

    /// Seconds between two checks of the current day.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            backup_dir: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        // Normalize backup directory
        if let Some(a) = &self.backup_dir {
            self.backup_dir = Some(
                expand_path(a)
                    .map_err(|e| format!("Failed to expand backup directory path: {e}"))?,
            );
        }

        if self.tick_interval == 0 {
            tracing::warn!("tick interval must be positive, using the default");
            self.tick_interval = DEFAULT_TICK_INTERVAL;
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval.max(1))
    }

    /// The slot holding the persisted document. Without a state directory
    /// nothing outlives the process.
    pub fn storage_slot(&self) -> Box<dyn StorageSlot> {
        match &self.state_dir {
            Some(dir) => Box::new(FileSlot::in_dir(dir)),
            None => {
                tracing::warn!("no state directory, annotations will not be persisted");
                Box::new(MemorySlot::new())
            }
        }
    }

    /// The directory backups are exported to when none is given.
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

/// The user-specific state directory, without the application name.
pub fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}
