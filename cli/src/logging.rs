// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_NAME: &str = "yearmark.log";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,

    /// A file in the state directory, for when the terminal is owned by the TUI.
    StateFile,
}

/// Install the global subscriber, filtered by `RUST_LOG`.
pub fn init_tracing(target: LogTarget, state_dir: Option<&Path>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::StateFile => match state_dir.map(open_log_file) {
            Some(Ok(file)) => builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            // stderr would corrupt the TUI
            _ => builder.with_writer(io::sink).try_init(),
        },
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn open_log_file(state_dir: &Path) -> io::Result<File> {
    fs::create_dir_all(state_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(state_dir))
}

fn log_file_path(state_dir: &Path) -> PathBuf {
    state_dir.join(LOG_FILE_NAME)
}
