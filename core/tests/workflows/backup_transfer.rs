// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Exporting a backup and restoring it elsewhere.

use yearmark_core::{Confirmation, Error, ImportOutcome, Theme};

use crate::common::{
    SAMPLE_BACKUP, TestConfigBuilder, assert_file_exists, assert_marked, at, open_app,
    setup_temp_dirs, test_config,
};

#[tokio::test]
async fn export_then_import_into_fresh_state() {
    // Arrange
    let source_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&source_dirs.state_dir)
        .with_backup_dir(&source_dirs.backup_dir)
        .build();
    let mut source = open_app(config, at(2024, 6, 1));
    source.open_day(75).unwrap();
    source.toggle_color("#C9B1FF");
    source.set_theme(Theme::Mint);

    // Act
    let path = source.export_to(None).await.unwrap();

    // Assert
    assert_file_exists(&path);
    assert_eq!(
        path,
        source_dirs.backup_dir.join("year-progress-backup-2024.json")
    );

    let target_dirs = setup_temp_dirs().await.unwrap();
    let mut target = open_app(test_config(&target_dirs.state_dir), at(2024, 6, 1));
    let plan = target.plan_import_file(&path).await.unwrap();
    assert!(!plan.requires_confirmation());
    assert_eq!(
        target.apply_import(plan, Confirmation::Declined),
        ImportOutcome::Applied { marks: 1 }
    );
    assert_marked(&target, "2024-03-15");
    assert_eq!(target.store().theme(), Theme::Mint);
    assert_eq!(target.store().marks(), source.store().marks());
}

#[tokio::test]
async fn import_over_existing_marks_needs_confirmation() {
    let dirs = setup_temp_dirs().await.unwrap();
    let path = dirs
        .create_backup_file("old.json", SAMPLE_BACKUP)
        .await
        .unwrap();

    let mut app = open_app(test_config(&dirs.state_dir), at(2024, 6, 1));
    app.open_day(100).unwrap();
    app.toggle_emoji("🌙");
    app.close_editor();

    let plan = app.plan_import_file(&path).await.unwrap();
    assert!(plan.requires_confirmation());
    assert_eq!(
        app.apply_import(plan.clone(), Confirmation::Declined),
        ImportOutcome::Cancelled
    );
    assert_marked(&app, "2024-04-09");

    assert_eq!(
        app.apply_import(plan, Confirmation::Confirmed),
        ImportOutcome::Applied { marks: 3 }
    );
    assert_eq!(app.store().theme(), Theme::Sakura);
    assert_marked(&app, "2024-12-25");

    // restored data is persisted
    drop(app);
    let app = open_app(test_config(&dirs.state_dir), at(2024, 6, 1));
    assert_eq!(app.store().marks().len(), 3);
}

#[tokio::test]
async fn corrupt_backup_leaves_store_untouched() {
    let dirs = setup_temp_dirs().await.unwrap();
    let not_json = dirs
        .create_backup_file("broken.json", "{{{")
        .await
        .unwrap();
    let no_marks = dirs
        .create_backup_file("nomarks.json", r#"{"version": "1.0"}"#)
        .await
        .unwrap();

    let mut app = open_app(test_config(&dirs.state_dir), at(2024, 6, 1));
    app.open_day(1).unwrap();
    app.toggle_emoji("⭐");

    assert!(matches!(
        app.plan_import_file(&not_json).await,
        Err(Error::ImportFailed(_))
    ));
    assert!(matches!(
        app.plan_import_file(&no_marks).await,
        Err(Error::InvalidBackupFormat(_))
    ));
    assert!(matches!(
        app.plan_import_file(&dirs.backup_dir.join("missing.json")).await,
        Err(Error::ImportRead { .. })
    ));
    assert_marked(&app, "2024-01-01");
}
