// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.

use std::time::Duration;

use yearmark_core::{Config, YearProgress};

use crate::common::{TestConfigBuilder, setup_temp_dirs};

#[tokio::test]
async fn config_state_dir_is_used_for_storage() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&dirs.state_dir)
        .with_tick_interval(5)
        .build();

    // Act
    let mut app = YearProgress::new(config).unwrap();
    app.open_day(1).unwrap();
    app.set_note("first day");

    // Assert
    assert!(dirs.state_dir.join("yearmark.json").exists());
    assert_eq!(app.config().tick_interval(), Duration::from_secs(5));
}

#[tokio::test]
async fn config_parsed_from_toml() {
    let dirs = setup_temp_dirs().await.unwrap();
    let raw = format!(
        "state_dir = {:?}\nbackup_dir = {:?}\n",
        dirs.state_dir.display().to_string(),
        dirs.backup_dir.display().to_string()
    );
    let config: Config = toml::from_str(&raw).unwrap();

    let app = YearProgress::new(config).unwrap();
    let path = app.export_to(None).await.unwrap();
    assert!(path.starts_with(&dirs.backup_dir));
}
