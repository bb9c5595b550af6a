// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Custom assertion helpers
//! - Temporary directory management with auto-cleanup

mod assertions;
mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use assertions::{assert_file_exists, assert_marked, assert_unmarked};
#[allow(unused_imports)]
pub use fixtures::{SAMPLE_BACKUP, TestConfigBuilder, at, open_app, test_config};
pub use temp_dir::setup_temp_dirs;
