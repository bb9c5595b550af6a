// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::{cell::RefCell, rc::Rc};

use chrono::Datelike;
use yearmark_core::{
    Confirmation, Error, ImportOutcome, ImportPlan, Refresh, YearProgress, expand_path,
};

use crate::tui::dispatcher::{Action, CursorMove, Dispatcher};

/// The view shown on top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Grid,
    Editor,
    Settings,
}

/// Work that has to be awaited outside of action handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Export,
    Import(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub error: bool,
}

/// State of the terminal interface, wrapping the application core.
#[derive(Debug)]
pub struct AppStore {
    pub core: YearProgress,

    /// Day of the selected year under the cursor.
    pub cursor: u32,
    pub page: Page,
    pub status: Option<Status>,
    pub import_path: String,
    pub pending_import: Option<ImportPlan>,
    pub task: Option<Task>,
}

impl AppStore {
    pub fn new(core: YearProgress) -> Self {
        let mut store = Self {
            core,
            cursor: 1,
            page: Page::Grid,
            status: None,
            import_path: String::new(),
            pending_import: None,
            task: None,
        };
        store.reset_cursor();
        store
    }

    pub fn into_core(self) -> YearProgress {
        self.core
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().handle(action);
        }));
        dispatcher.register(callback);
    }

    pub fn handle(&mut self, action: &Action) {
        match action {
            Action::MoveCursor(m) => self.move_cursor(*m),
            Action::JumpToToday => {
                let refresh = self.core.select_current_year();
                self.after(refresh);
                self.reset_cursor();
            }
            Action::OpenEditor => match self.core.open_day(self.cursor) {
                Ok(()) => self.page = Page::Editor,
                Err(e) => self.fail(&e),
            },
            Action::CloseEditor => {
                let refresh = self.core.close_editor();
                self.after(refresh);
                self.page = Page::Grid;
            }
            Action::ToggleColor(color) => {
                let refresh = self.core.toggle_color(color);
                self.after(refresh);
            }
            Action::ToggleEmoji(emoji) => {
                let refresh = self.core.toggle_emoji(emoji);
                self.after(refresh);
            }
            Action::UpdateNote(note) => {
                let refresh = self.core.set_note(note.clone());
                self.after(refresh);
            }
            Action::ClearDay => {
                let refresh = self.core.clear_day();
                self.after(refresh);
            }
            Action::OpenSettings => self.page = Page::Settings,
            Action::CloseSettings => {
                self.pending_import = None;
                self.page = Page::Grid;
            }
            Action::SelectYear(year) => {
                let refresh = self.core.select_year(*year);
                self.after(refresh);
            }
            Action::SelectTheme(theme) => {
                let refresh = self.core.set_theme(*theme);
                self.after(refresh);
            }
            Action::UpdateCustomEmojis(custom) => self.core.edit_custom_emojis(custom.clone()),
            Action::CommitCustomEmojis => {
                self.core.commit_custom_emojis();
            }
            Action::UpdateImportPath(path) => self.import_path = path.clone(),
            Action::Export => self.task = Some(Task::Export),
            Action::RequestImport => self.request_import(),
            Action::ConfirmImport(confirmed) => {
                if let Some(plan) = self.pending_import.take() {
                    self.apply_import(plan, (*confirmed).into());
                }
            }
            Action::Tick => {
                let refresh = self.core.refresh_now();
                self.after(refresh);
            }
        }
    }

    /// Report the result of an export task.
    pub fn exported(&mut self, result: Result<PathBuf, Error>) {
        match result {
            Ok(path) => self.info(format!("Backup saved to {}", path.display())),
            Err(e) => self.fail(&e),
        }
    }

    /// Continue an import once the file has been read.
    pub fn received_import(&mut self, result: Result<Vec<u8>, Error>) {
        let plan = match result.and_then(|bytes| self.core.plan_import(&bytes)) {
            Ok(plan) => plan,
            Err(e) => return self.fail(&e),
        };

        if plan.requires_confirmation() {
            let text = format!(
                "Replace {} marked day(s) with {} from the backup? [y/n]",
                self.core.store().marks().len(),
                plan.backup().marks.len()
            );
            self.info(text);
            self.pending_import = Some(plan);
        } else {
            self.apply_import(plan, Confirmation::Confirmed);
        }
    }

    fn request_import(&mut self) {
        let path = self.import_path.trim();
        if path.is_empty() {
            self.error("Enter the path of a backup file first");
            return;
        }

        match expand_path(Path::new(path)) {
            Ok(path) => self.task = Some(Task::Import(path)),
            Err(e) => self.error(e.to_string()),
        }
    }

    fn apply_import(&mut self, plan: ImportPlan, confirmation: Confirmation) {
        match self.core.apply_import(plan, confirmation) {
            ImportOutcome::Applied { marks } => {
                self.after(Refresh::Full);
                self.info(format!("Restored {marks} marked day(s)"));
            }
            ImportOutcome::Cancelled => self.info("Import cancelled"),
        }
    }

    fn move_cursor(&mut self, m: CursorMove) {
        let grid = self.core.grid();
        let day_count = grid.day_count();
        self.cursor = match m {
            CursorMove::Left => self.cursor.saturating_sub(1).max(1),
            CursorMove::Right => (self.cursor + 1).min(day_count),
            CursorMove::Up | CursorMove::Down => {
                let months = grid.months();
                let located = months.iter().enumerate().find_map(|(i, month)| {
                    month
                        .days
                        .iter()
                        .position(|cell| cell.day == self.cursor)
                        .map(|pos| (i, pos))
                });
                let Some((month, pos)) = located else {
                    return;
                };

                let target = match m {
                    CursorMove::Up => month.checked_sub(1),
                    _ => Some(month + 1),
                };
                match target.and_then(|i| months.get(i)) {
                    Some(group) => group.days[pos.min(group.days.len() - 1)].day,
                    None => self.cursor,
                }
            }
        };
    }

    /// Put the cursor on today, or on the first day of another year.
    fn reset_cursor(&mut self) {
        let today = self.core.today();
        self.cursor = if today.year() == self.core.year() {
            today.ordinal()
        } else {
            1
        };
    }

    fn after(&mut self, refresh: Refresh) {
        match refresh {
            Refresh::Full => {
                let day_count = self.core.grid().day_count();
                self.cursor = self.cursor.clamp(1, day_count);
                if !self.core.editor().is_open() && self.page == Page::Editor {
                    self.page = Page::Grid;
                }
            }
            Refresh::Day(day) => tracing::trace!(day, "cell refreshed"),
            Refresh::None => {}
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            error: false,
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            error: true,
        });
    }

    fn fail(&mut self, err: &Error) {
        tracing::warn!(%err, "operation failed");
        self.error(err.to_string());
    }
}
