// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use yearmark_core::Theme;

use crate::tui::app_store::AppStore;
use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Button, Form, FormItem, Input, RadioGroup, Stepper};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::grid_view::status_line;

const HINTS: &[(&str, &str)] = &[
    ("Prev", "<Up>"),
    ("Next", "<Down>"),
    ("Change", "<←→>"),
    ("Close", "<Esc>"),
];

type SettingsForm = Form<AppStore, Box<dyn FormItem<AppStore>>>;

/// Year, theme, emoji palette and backups.
pub struct Settings {
    page: SinglePage<AppStore, SettingsBody>,
}

impl Settings {
    pub fn new() -> Self {
        let items: Vec<Box<dyn FormItem<AppStore>>> = vec![
            Box::new(Stepper::<_, YearAccess>::new("Year", 1)),
            Box::new(RadioGroup::<_, _, ThemeAccess>::new(
                "Theme",
                Theme::ALL.to_vec(),
                Theme::ALL.iter().map(|t| t.display_name().to_owned()).collect(),
            )),
            Box::new(Input::<_, CustomEmojisAccess>::new(
                "Custom emojis (space separated, empty for defaults)",
            )),
            Box::new(Button::new("Backup", "Export", Action::Export)),
            Box::new(Input::<_, ImportPathAccess>::new("Backup file to restore")),
            Box::new(Button::new("Restore", "Import", Action::RequestImport)),
        ];
        let body = SettingsBody {
            form: Form::new(items),
        };
        let page = SinglePage::new(|_| "Settings".to_owned(), body).with_hints(HINTS);
        Self { page }
    }
}

impl Component<AppStore> for Settings {
    fn render(&self, store: &RefCell<AppStore>, area: Rect, buf: &mut Buffer) {
        self.page.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<AppStore>, area: Rect) -> Option<(u16, u16)> {
        self.page.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let pending = store.borrow().pending_import.is_some();
        if pending {
            match event.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    dispatcher.dispatch(Action::ConfirmImport(true))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    dispatcher.dispatch(Action::ConfirmImport(false))
                }
                _ => {}
            }
            return Some(Message::Handled);
        }

        match self.page.on_key(dispatcher, store, area, event) {
            Some(Message::Exit) => {
                self.page.deactivate(dispatcher, store);
                dispatcher.dispatch(Action::CloseSettings);
                Some(Message::Handled)
            }
            msg => msg,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        self.page.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        self.page.deactivate(dispatcher, store);
    }
}

/// The form with the status message below it.
struct SettingsBody {
    form: SettingsForm,
}

impl SettingsBody {
    fn split(area: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area)
    }
}

impl Component<AppStore> for SettingsBody {
    fn render(&self, store: &RefCell<AppStore>, area: Rect, buf: &mut Buffer) {
        let [form, status] = Self::split(area);
        self.form.render(store, form, buf);
        if let Some(line) = status_line(&store.borrow()) {
            line.centered().render(status, buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<AppStore>, area: Rect) -> Option<(u16, u16)> {
        let [form, _] = Self::split(area);
        self.form.get_cursor_position(store, form)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let [form, _] = Self::split(area);
        self.form.on_key(dispatcher, store, form, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        self.form.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        self.form.deactivate(dispatcher, store);
    }
}

struct YearAccess;

impl Access<AppStore, i32> for YearAccess {
    fn get(store: &RefCell<AppStore>) -> i32 {
        store.borrow().core.year()
    }

    fn set(dispatcher: &mut Dispatcher, value: i32) -> bool {
        dispatcher.dispatch(Action::SelectYear(value));
        true
    }
}

struct ThemeAccess;

impl Access<AppStore, Theme> for ThemeAccess {
    fn get(store: &RefCell<AppStore>) -> Theme {
        store.borrow().core.store().theme()
    }

    fn set(dispatcher: &mut Dispatcher, value: Theme) -> bool {
        dispatcher.dispatch(Action::SelectTheme(value));
        true
    }
}

struct CustomEmojisAccess;

impl Access<AppStore, String> for CustomEmojisAccess {
    fn get(store: &RefCell<AppStore>) -> String {
        store.borrow().core.store().custom_emojis().to_owned()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateCustomEmojis(value));
        true
    }

    fn commit(dispatcher: &mut Dispatcher) {
        dispatcher.dispatch(Action::CommitCustomEmojis);
    }
}

struct ImportPathAccess;

impl Access<AppStore, String> for ImportPathAccess {
    fn get(store: &RefCell<AppStore>) -> String {
        store.borrow().import_path.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateImportPath(value));
        true
    }
}
