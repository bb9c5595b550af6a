// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! This module provides helper functions to create configurations, a fixed
//! clock and sample backup documents.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use yearmark_core::{Config, YearProgress};

/// A backup exported by an older release, before custom emojis existed.
pub const SAMPLE_BACKUP: &str = r##"{
  "version": "1.0",
  "year": 2024,
  "marks": {
    "2024-01-01": { "emoji": "🎉", "note": "new year" },
    "2024-03-15": { "color": "#FFB7C5" },
    "2024-12-25": { "color": "#98E4C9", "emoji": "🎂" }
  },
  "theme": "sakura",
  "exportedAt": "2024-06-01T12:00:00.000Z"
}"##;

/// Creates a test configuration pointing at the given state directory.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    TestConfigBuilder::new().with_state_dir(state_dir).build()
}

/// A local timestamp at noon of the given day.
#[must_use]
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("noon is unambiguous")
}

/// Opens the application on the configuration with a fixed clock.
#[must_use]
pub fn open_app(config: Config, now: DateTime<Local>) -> YearProgress {
    let slot = config.storage_slot();
    YearProgress::with_slot(config, slot, now)
}

/// Builder for creating test configurations.
#[derive(Debug, Default)]
pub struct TestConfigBuilder {
    state_dir: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
    tick_interval: Option<u64>,
}

impl TestConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state_dir(mut self, path: &Path) -> Self {
        self.state_dir = Some(path.to_path_buf());
        self
    }

    #[must_use]
    #[allow(dead_code)]
    pub fn with_backup_dir(mut self, path: &Path) -> Self {
        self.backup_dir = Some(path.to_path_buf());
        self
    }

    #[must_use]
    #[allow(dead_code)]
    pub fn with_tick_interval(mut self, seconds: u64) -> Self {
        self.tick_interval = Some(seconds);
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        let defaults = Config::default();
        Config {
            state_dir: self.state_dir,
            backup_dir: self.backup_dir,
            tick_interval: self.tick_interval.unwrap_or(defaults.tick_interval),
        }
    }
}
