// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Portable export of the annotation store.
//!
//! Importing is split in two phases: [`parse_backup`] validates the untrusted
//! payload without touching anything, and [`ImportPlan::apply`] replaces the
//! store once the caller has decided whether the overwrite is confirmed.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

use crate::annotation::{RawMarks, marks_from_raw};
use crate::{AnnotationStore, Error, Marks, Theme};

/// Version tag written into every backup.
pub const BACKUP_VERSION: &str = "1.0";

/// The backup file name for the given year.
pub fn backup_file_name(year: i32) -> String {
    format!("year-progress-backup-{year}.json")
}

/// The versioned, human readable export of the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    pub marks: Marks,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    /// Absent in exports made before custom emojis existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_emojis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

impl Backup {
    pub fn new(
        year: i32,
        marks: Marks,
        theme: Theme,
        custom_emojis: String,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version: BACKUP_VERSION.to_owned(),
            year: Some(year),
            marks,
            theme: Some(theme),
            custom_emojis: Some(custom_emojis),
            exported_at: Some(exported_at),
        }
    }

    /// The file name to offer, derived from the exported year.
    pub fn file_name(&self) -> String {
        match self.year {
            Some(year) => backup_file_name(year),
            None => "year-progress-backup.json".to_owned(),
        }
    }

    /// Pretty printed JSON, as written to disk.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Parse an untrusted backup payload.
///
/// Input that is not JSON fails with [`Error::ImportFailed`], JSON without a
/// `marks` mapping fails with [`Error::InvalidBackupFormat`].
pub fn parse_backup(bytes: &[u8]) -> Result<Backup, Error> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| Error::ImportFailed(e.to_string()))?;

    if !matches!(value.get("marks"), Some(Value::Object(_))) {
        return Err(Error::InvalidBackupFormat(
            "missing `marks` mapping".to_owned(),
        ));
    }

    let raw: BackupRaw =
        serde_json::from_value(value).map_err(|e| Error::InvalidBackupFormat(e.to_string()))?;

    let theme = raw.theme.and_then(|theme| match theme.parse::<Theme>() {
        Ok(theme) => Some(theme),
        Err(_) => {
            tracing::warn!(%theme, "ignoring unrecognized theme in backup");
            None
        }
    });

    Ok(Backup {
        version: raw.version.unwrap_or_else(|| BACKUP_VERSION.to_owned()),
        year: raw.year,
        marks: marks_from_raw(raw.marks),
        theme,
        custom_emojis: raw.custom_emojis,
        exported_at: raw.exported_at.and_then(|a| a.parse().ok()),
    })
}

/// Read a backup file chosen by the user.
#[tracing::instrument]
pub async fn read_backup_file(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).await.map_err(|source| Error::ImportRead {
        path: path.to_owned(),
        source,
    })
}

/// Write the backup. When `dest` is a directory the conventional file name is
/// appended. Returns the written path.
#[tracing::instrument(skip(backup))]
pub async fn write_backup_file(backup: &Backup, dest: &Path) -> Result<PathBuf, Error> {
    let path = if fs::metadata(dest).await.is_ok_and(|m| m.is_dir()) {
        dest.join(backup.file_name())
    } else {
        dest.to_owned()
    };

    let content = backup.to_json().map_err(|e| Error::ExportFailed {
        path: path.clone(),
        source: std::io::Error::other(e),
    })?;

    fs::write(&path, content)
        .await
        .map_err(|source| Error::ExportFailed {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), "backup exported");
    Ok(path)
}

/// The caller's answer to "this will replace your current data, continue?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// What happened to an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The store now holds the backup's annotations.
    Applied { marks: usize },

    /// The overwrite was declined, the store is untouched.
    Cancelled,
}

/// A parsed backup waiting to be applied.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    backup: Backup,
    requires_confirmation: bool,
}

impl ImportPlan {
    pub fn new(store: &AnnotationStore, backup: Backup) -> Self {
        Self {
            backup,
            requires_confirmation: store.has_marks(),
        }
    }

    /// Whether applying would destroy existing annotations.
    pub fn requires_confirmation(&self) -> bool {
        self.requires_confirmation
    }

    pub fn backup(&self) -> &Backup {
        &self.backup
    }

    /// Replace the store's content with the backup, unless a required
    /// confirmation was declined. Marks added since the plan was made also
    /// require it. The store is not saved here.
    pub fn apply(self, store: &mut AnnotationStore, confirmation: Confirmation) -> ImportOutcome {
        let requires_confirmation = self.requires_confirmation || store.has_marks();
        if requires_confirmation && confirmation == Confirmation::Declined {
            tracing::info!("import declined, keeping current data");
            return ImportOutcome::Cancelled;
        }

        let Backup {
            marks,
            theme,
            custom_emojis,
            ..
        } = self.backup;

        store.replace_marks(marks);
        if let Some(theme) = theme {
            store.set_theme(theme);
        }
        if let Some(custom) = custom_emojis {
            store.set_custom_emojis(custom);
        }

        let count = store.marks().len();
        tracing::info!(marks = count, "backup restored");
        ImportOutcome::Applied { marks: count }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupRaw {
    #[serde(default)]
    version: Option<String>,

    #[serde(default)]
    year: Option<i32>,

    marks: RawMarks,

    #[serde(default)]
    theme: Option<String>,

    #[serde(default)]
    custom_emojis: Option<String>,

    #[serde(default)]
    exported_at: Option<String>,
}
