// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised by the yearmark core.
///
/// None of them is fatal: callers keep their prior state and surface the
/// message either in the log or to the user.
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// The persisted document could not be read or parsed.
    StorageRead(String),

    /// The persisted document could not be written.
    StorageWrite(io::Error),

    /// The backup payload is JSON, but not a backup document.
    InvalidBackupFormat(String),

    /// The backup payload could not be decoded at all.
    ImportFailed(String),

    /// The backup file could not be read.
    ImportRead { path: PathBuf, source: io::Error },

    /// The backup file could not be written.
    ExportFailed { path: PathBuf, source: io::Error },

    /// The day ordinal does not exist in the year.
    InvalidDay { year: i32, day: u32 },

    /// The string is not a `YYYY-MM-DD` day key.
    InvalidDayKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageRead(e) => write!(f, "Failed to load saved data: {e}"),
            Self::StorageWrite(e) => write!(f, "Failed to save data: {e}"),
            Self::InvalidBackupFormat(e) => write!(f, "Invalid backup file: {e}"),
            Self::ImportFailed(e) => {
                write!(f, "Failed to restore backup, the file may be corrupted: {e}")
            }
            Self::ImportRead { path, source } => {
                write!(f, "Failed to read file {}: {source}", path.display())
            }
            Self::ExportFailed { path, source } => {
                write!(f, "Failed to export data to {}: {source}", path.display())
            }
            Self::InvalidDay { year, day } => write!(f, "Day {day} does not exist in {year}"),
            Self::InvalidDayKey(key) => write!(f, "Invalid day key: {key}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StorageWrite(e) => Some(e),
            Self::ImportRead { source, .. } | Self::ExportFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::StorageWrite(e)
    }
}
