// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::path::Path;

use yearmark_core::{DayKey, YearProgress};

/// Asserts that the day carries an annotation, both in the store and in the
/// rendered grid.
///
/// # Panics
///
/// Panics if the day is unmarked or outside the selected year.
pub fn assert_marked(app: &YearProgress, key: &str) {
    let key: DayKey = key.parse().expect("valid day key");
    assert!(
        app.store().annotation(&key).is_some(),
        "{key} should be marked in the store"
    );

    let cell = app.grid().cell(key.day()).expect("day inside the year");
    assert!(cell.mark.is_some(), "{key} should be marked in the grid");
}

/// Asserts that the day carries no annotation.
///
/// # Panics
///
/// Panics if the day is marked.
#[allow(dead_code)]
pub fn assert_unmarked(app: &YearProgress, key: &str) {
    let key: DayKey = key.parse().expect("valid day key");
    assert!(
        app.store().annotation(&key).is_none(),
        "{key} should not be marked"
    );
}

/// Asserts that a file exists at the given path.
///
/// # Panics
///
/// Panics if the file doesn't exist.
#[allow(dead_code)]
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist: {}", path.display());
}
