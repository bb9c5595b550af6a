// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of yearmark: the calendar of a year, the annotations attached to its
//! days and their persistence.

mod annotation;
mod backup;
mod config;
mod date;
mod editor;
mod error;
mod grid;
mod storage;
mod store;
mod theme;
mod year_progress;

pub use crate::annotation::{Annotation, AnnotationPatch, Marks};
pub use crate::backup::{
    BACKUP_VERSION, Backup, Confirmation, ImportOutcome, ImportPlan, backup_file_name,
    parse_backup, read_backup_file, write_backup_file,
};
pub use crate::config::{APP_NAME, Config, DEFAULT_TICK_INTERVAL, expand_path, get_state_dir};
pub use crate::date::{
    DayKey, date_of, day_key, day_of_year, days_in_year, format_display_date, is_leap_year,
    is_weekend, month_name,
};
pub use crate::editor::{Editor, EditorState, OpenDay};
pub use crate::error::Error;
pub use crate::grid::{CellMark, DayCell, DayStatus, MonthGroup, Progress, YearGrid, today_index};
pub use crate::storage::{FileSlot, MemorySlot, STORAGE_FILE_NAME, StorageSlot};
pub use crate::store::AnnotationStore;
pub use crate::theme::{COLORS, DEFAULT_EMOJIS, Theme, emoji_palette, normalize_emojis};
pub use crate::year_progress::{Refresh, YearProgress};
