// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Annotating days and seeing the result survive a restart.

use yearmark_core::{DayKey, DayStatus, Refresh, Theme};

use crate::common::{assert_marked, assert_unmarked, at, open_app, setup_temp_dirs, test_config};

#[tokio::test]
async fn annotation_survives_restart() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let mut app = open_app(test_config(&dirs.state_dir), at(2024, 3, 20));

    // Act
    app.open_day(75).unwrap();
    assert_eq!(app.toggle_color("#FFB7C5"), Refresh::Day(75));
    app.toggle_emoji("🎉");
    app.set_note("  birthday party  ");
    app.close_editor();
    drop(app);

    // Assert
    let app = open_app(test_config(&dirs.state_dir), at(2024, 3, 21));
    assert_marked(&app, "2024-03-15");
    let key: DayKey = "2024-03-15".parse().unwrap();
    let annotation = app.store().annotation(&key).unwrap();
    assert_eq!(annotation.color.as_deref(), Some("#FFB7C5"));
    assert_eq!(annotation.emoji.as_deref(), Some("🎉"));
    assert_eq!(annotation.note.as_deref(), Some("birthday party"));
    assert!(app.grid().cell(75).unwrap().mark.as_ref().unwrap().has_note);
}

#[tokio::test]
async fn toggling_twice_leaves_no_trace() {
    let dirs = setup_temp_dirs().await.unwrap();
    let mut app = open_app(test_config(&dirs.state_dir), at(2024, 3, 20));

    app.open_day(75).unwrap();
    app.toggle_color("#FFB7C5");
    app.toggle_color("#FFB7C5");
    drop(app);

    let app = open_app(test_config(&dirs.state_dir), at(2024, 3, 20));
    assert_unmarked(&app, "2024-03-15");
    assert!(!app.store().has_marks());
}

#[tokio::test]
async fn settings_survive_restart() {
    let dirs = setup_temp_dirs().await.unwrap();
    let mut app = open_app(test_config(&dirs.state_dir), at(2024, 6, 1));

    app.set_theme(Theme::Honey);
    app.select_year(2023);
    app.edit_custom_emojis(" 🐱 🐶 🐱 ");
    app.commit_custom_emojis();
    drop(app);

    let app = open_app(test_config(&dirs.state_dir), at(2024, 6, 1));
    assert_eq!(app.store().theme(), Theme::Honey);
    assert_eq!(app.year(), 2023);
    assert_eq!(app.store().custom_emojis(), "🐱 🐶");
    assert!(app.grid().cells().all(|c| c.status == DayStatus::Past));
}

#[tokio::test]
async fn corrupt_document_starts_fresh() {
    let dirs = setup_temp_dirs().await.unwrap();
    tokio::fs::write(dirs.state_dir.join("yearmark.json"), "{ definitely broken")
        .await
        .unwrap();

    let mut app = open_app(test_config(&dirs.state_dir), at(2024, 6, 1));
    assert!(!app.store().has_marks());
    assert_eq!(app.year(), 2024);
    assert_eq!(app.store().theme(), Theme::Lavender);

    // the next save replaces the corrupt document
    app.open_day(1).unwrap();
    app.toggle_emoji("⭐");
    let app = open_app(test_config(&dirs.state_dir), at(2024, 6, 1));
    assert_marked(&app, "2024-01-01");
}
