// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

use crate::backup::{
    Backup, Confirmation, ImportOutcome, ImportPlan, parse_backup, read_backup_file,
    write_backup_file,
};
use crate::storage::StorageSlot;
use crate::{AnnotationStore, Config, Editor, Error, Theme, YearGrid};

/// What the view has to redraw after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    None,

    /// Only the cell of the given day.
    Day(u32),

    /// The whole grid.
    Full,
}

/// Yearmark application core, the single owner of all state.
#[derive(Debug)]
pub struct YearProgress {
    now: DateTime<Local>,
    config: Config,
    store: AnnotationStore,
    grid: YearGrid,
    editor: Editor,
}

impl YearProgress {
    /// Creates a new instance with the given configuration, loading the
    /// persisted document from the state directory.
    #[tracing::instrument(skip_all)]
    pub fn new(mut config: Config) -> Result<Self, Box<dyn StdError>> {
        config.normalize()?;
        let slot = config.storage_slot();
        Ok(Self::with_slot(config, slot, Local::now()))
    }

    /// Creates an instance on top of an explicit storage slot and clock.
    pub fn with_slot(config: Config, slot: Box<dyn StorageSlot>, now: DateTime<Local>) -> Self {
        let today = now.date_naive();
        let store = AnnotationStore::load(slot, today);
        let grid = YearGrid::build(store.selected_year(), store.marks(), today);
        Self {
            now,
            config,
            store,
            grid,
            editor: Editor::new(),
        }
    }

    /// The current time in the instance.
    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn grid(&self) -> &YearGrid {
        &self.grid
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn year(&self) -> i32 {
        self.store.selected_year()
    }

    /// Refresh the current time to now.
    pub fn refresh_now(&mut self) -> Refresh {
        self.set_now(Local::now())
    }

    /// Move the clock, rebuilding the grid when the day rolled over.
    pub fn set_now(&mut self, now: DateTime<Local>) -> Refresh {
        let rolled_over = now.date_naive() != self.today();
        self.now = now;
        if rolled_over {
            tracing::info!(today = %self.today(), "day rolled over");
            self.rebuild();
            Refresh::Full
        } else {
            Refresh::None
        }
    }

    /// Show another year. The editor is closed and the selection persisted.
    pub fn select_year(&mut self, year: i32) -> Refresh {
        if year == self.year() || year <= 0 {
            return Refresh::None;
        }

        tracing::debug!(year, "selecting year");
        self.editor.close();
        self.store.set_selected_year(year);
        self.store.save_or_log();
        self.rebuild();
        Refresh::Full
    }

    pub fn select_current_year(&mut self) -> Refresh {
        self.select_year(self.today().year())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Refresh {
        if theme == self.store.theme() {
            return Refresh::None;
        }

        tracing::debug!(%theme, "changing theme");
        self.store.set_theme(theme);
        self.store.save_or_log();
        Refresh::Full
    }

    /// Update the custom emoji list as it is typed, without normalizing.
    pub fn edit_custom_emojis(&mut self, custom: impl Into<String>) {
        self.store.set_custom_emojis(custom);
    }

    /// Normalize and persist the custom emoji list, once editing is done.
    pub fn commit_custom_emojis(&mut self) -> &str {
        self.store.normalize_custom_emojis();
        self.store.save_or_log();
        self.store.custom_emojis()
    }

    /// The emojis to offer in the editor.
    pub fn emoji_palette(&self) -> Vec<String> {
        self.store.emoji_palette()
    }

    /// Open the editor on a day of the selected year.
    pub fn open_day(&mut self, day: u32) -> Result<(), Error> {
        self.editor.open(self.year(), day, &self.store)
    }

    pub fn close_editor(&mut self) -> Refresh {
        match self.editor.close() {
            Some(day) => Refresh::Day(day),
            None => Refresh::None,
        }
    }

    pub fn toggle_color(&mut self, color: &str) -> Refresh {
        let day = self.editor.toggle_color(&mut self.store, color);
        self.after_edit(day)
    }

    pub fn toggle_emoji(&mut self, emoji: &str) -> Refresh {
        let day = self.editor.toggle_emoji(&mut self.store, emoji);
        self.after_edit(day)
    }

    pub fn set_note(&mut self, note: impl Into<String>) -> Refresh {
        let day = self.editor.set_note(&mut self.store, note);
        self.after_edit(day)
    }

    /// Remove every field of the day being edited.
    pub fn clear_day(&mut self) -> Refresh {
        let day = self.editor.clear(&mut self.store);
        self.after_edit(day)
    }

    /// Persist the whole document.
    pub fn save(&self) -> Result<(), Error> {
        self.store.save()
    }

    /// Snapshot the store into a backup stamped with the current time.
    pub fn export_backup(&self) -> Backup {
        self.store.export_backup(Utc::now())
    }

    /// Write a backup to `dest`, or to the configured backup directory.
    pub async fn export_to(&self, dest: Option<&Path>) -> Result<PathBuf, Error> {
        let backup = self.export_backup();
        match dest {
            Some(dest) => write_backup_file(&backup, dest).await,
            None => write_backup_file(&backup, &self.config.backup_dir()).await,
        }
    }

    /// Validate a backup payload against the current store.
    pub fn plan_import(&self, bytes: &[u8]) -> Result<ImportPlan, Error> {
        let backup = parse_backup(bytes)?;
        Ok(ImportPlan::new(&self.store, backup))
    }

    /// Read and validate a backup file.
    pub async fn plan_import_file(&self, path: &Path) -> Result<ImportPlan, Error> {
        let bytes = read_backup_file(path).await?;
        self.plan_import(&bytes)
    }

    /// Apply a planned import and persist the result. An applied import
    /// requires a full redraw.
    pub fn apply_import(&mut self, plan: ImportPlan, confirmation: Confirmation) -> ImportOutcome {
        let outcome = plan.apply(&mut self.store, confirmation);
        if let ImportOutcome::Applied { .. } = outcome {
            self.editor.close();
            self.store.save_or_log();
            self.rebuild();
        }
        outcome
    }

    fn after_edit(&mut self, day: Option<u32>) -> Refresh {
        let Some(day) = day else {
            return Refresh::None;
        };

        self.store.save_or_log();
        self.grid.refresh_day(day, self.store.marks());
        Refresh::Day(day)
    }

    fn rebuild(&mut self) {
        self.grid = YearGrid::build(self.year(), self.store.marks(), self.today());
    }
}
