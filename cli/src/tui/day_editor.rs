// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use yearmark_core::COLORS;

use crate::tui::app_store::AppStore;
use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Form, FormItem, Input, PaletteAccess, TogglePalette};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::parse_hex_color;

const HINTS: &[(&str, &str)] = &[
    ("Prev", "<Up>"),
    ("Next", "<Down>"),
    ("Pick", "<Enter>"),
    ("Clear day", "<C-d>"),
    ("Close", "<Esc>"),
];

/// Popup editing the color, emoji and note of one day.
pub struct DayEditor {
    page: SinglePage<AppStore, Form<AppStore, Box<dyn FormItem<AppStore>>>>,
}

impl DayEditor {
    pub fn new() -> Self {
        let items: Vec<Box<dyn FormItem<AppStore>>> = vec![
            Box::new(Input::<_, NoteAccess>::new("Note")),
            Box::new(TogglePalette::<_, ColorAccess>::new("Color")),
            Box::new(TogglePalette::<_, EmojiAccess>::new("Emoji")),
        ];
        let page = SinglePage::new(title, Form::new(items)).with_hints(HINTS);
        Self { page }
    }
}

impl Component<AppStore> for DayEditor {
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
        if is_clear_key(&event) {
            dispatcher.dispatch(Action::ClearDay);
            return Some(Message::Handled);
        }

        match self.page.on_key(dispatcher, store, area, event) {
            Some(Message::Exit) => {
                self.page.deactivate(dispatcher, store);
                dispatcher.dispatch(Action::CloseEditor);
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

/// Ctrl+D, which no form item takes as input.
fn is_clear_key(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('d')
}

fn title(store: &AppStore) -> String {
    store
        .core
        .editor()
        .open_day()
        .map(|day| day.title.clone())
        .unwrap_or_default()
}

struct NoteAccess;

impl Access<AppStore, String> for NoteAccess {
    fn get(store: &RefCell<AppStore>) -> String {
        let store = store.borrow();
        match store.core.editor().open_day() {
            Some(day) => day.note.clone(),
            None => String::new(),
        }
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateNote(value));
        true
    }
}

struct ColorAccess;

impl PaletteAccess<AppStore> for ColorAccess {
    fn options(_store: &RefCell<AppStore>) -> Vec<String> {
        COLORS.iter().map(|c| c.to_string()).collect()
    }

    fn selected(store: &RefCell<AppStore>) -> Option<String> {
        let store = store.borrow();
        store.core.editor().open_day().and_then(|d| d.color.clone())
    }

    fn toggle(dispatcher: &mut Dispatcher, value: String) {
        dispatcher.dispatch(Action::ToggleColor(value));
    }

    fn swatch(option: &str) -> Span<'static> {
        match parse_hex_color(option) {
            Some(color) => Span::styled("●", Style::new().fg(color)),
            None => Span::raw("?"),
        }
    }
}

struct EmojiAccess;

impl PaletteAccess<AppStore> for EmojiAccess {
    fn options(store: &RefCell<AppStore>) -> Vec<String> {
        store.borrow().core.emoji_palette()
    }

    fn selected(store: &RefCell<AppStore>) -> Option<String> {
        let store = store.borrow();
        store.core.editor().open_day().and_then(|d| d.emoji.clone())
    }

    fn toggle(dispatcher: &mut Dispatcher, value: String) {
        dispatcher.dispatch(Action::ToggleEmoji(value));
    }

    fn swatch(option: &str) -> Span<'static> {
        Span::raw(option.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{Local, TimeZone};
    use yearmark_core::{Config, DayKey, MemorySlot, YearProgress};

    use super::*;
    use crate::tui::app_store::Page;

    fn setup() -> (Rc<RefCell<AppStore>>, Dispatcher, MemorySlot) {
        let slot = MemorySlot::new();
        let now = Local.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let core = YearProgress::with_slot(Config::default(), Box::new(slot.clone()), now);
        let store = Rc::new(RefCell::new(AppStore::new(core)));
        let mut dispatcher = Dispatcher::new();
        AppStore::register_to(store.clone(), &mut dispatcher);
        dispatcher.dispatch(Action::OpenEditor);
        (store, dispatcher, slot)
    }

    fn annotation(store: &RefCell<AppStore>) -> Option<yearmark_core::Annotation> {
        let key: DayKey = "2024-03-15".parse().unwrap();
        store.borrow().core.store().annotation(&key).cloned()
    }

    #[test]
    fn test_edit_note_color_and_emoji() {
        let (store, mut dispatcher, slot) = setup();
        let mut editor = DayEditor::new();
        let area = Rect::new(0, 0, 60, 20);
        editor.activate(&mut dispatcher, &store);

        let mut press = |code| editor.on_key(&mut dispatcher, &store, area, KeyEvent::from(code));
        for c in "hi".chars() {
            press(KeyCode::Char(c));
        }
        press(KeyCode::Down);
        press(KeyCode::Enter); // first color
        press(KeyCode::Down);
        press(KeyCode::Right);
        press(KeyCode::Enter); // second emoji

        let a = annotation(&store).unwrap();
        assert_eq!(a.note.as_deref(), Some("hi"));
        assert_eq!(a.color.as_deref(), Some(COLORS[0]));
        assert_eq!(a.emoji.as_deref(), Some("😊"));
        assert!(slot.content().unwrap().contains("2024-03-15"));
    }

    #[test]
    fn test_delete_in_note_keeps_color_and_emoji() {
        let (store, mut dispatcher, _) = setup();
        let mut editor = DayEditor::new();
        let area = Rect::new(0, 0, 60, 20);
        editor.activate(&mut dispatcher, &store);

        let mut press = |code| editor.on_key(&mut dispatcher, &store, area, KeyEvent::from(code));
        for c in "hi".chars() {
            press(KeyCode::Char(c));
        }
        press(KeyCode::Down);
        press(KeyCode::Enter);
        press(KeyCode::Down);
        press(KeyCode::Enter);
        press(KeyCode::Up);
        press(KeyCode::Up);
        press(KeyCode::Home);
        press(KeyCode::Delete);

        let a = annotation(&store).unwrap();
        assert_eq!(a.note.as_deref(), Some("i"));
        assert_eq!(a.color.as_deref(), Some(COLORS[0]));
        assert!(a.emoji.is_some());
    }

    #[test]
    fn test_ctrl_d_clears_and_esc_closes() {
        let (store, mut dispatcher, _) = setup();
        let mut editor = DayEditor::new();
        let area = Rect::new(0, 0, 60, 20);
        editor.activate(&mut dispatcher, &store);

        editor.on_key(&mut dispatcher, &store, area, KeyEvent::from(KeyCode::Char('x')));
        assert!(annotation(&store).is_some());

        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let msg = editor.on_key(&mut dispatcher, &store, area, ctrl_d);
        assert_eq!(msg, Some(Message::Handled));
        assert!(annotation(&store).is_none());

        let msg = editor.on_key(&mut dispatcher, &store, area, KeyEvent::from(KeyCode::Esc));
        assert_eq!(msg, Some(Message::Handled));
        assert_eq!(store.borrow().page, Page::Grid);
        assert!(!store.borrow().core.editor().is_open());
    }

    #[test]
    fn test_render_shows_day_title() {
        let (store, _, _) = setup();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        DayEditor::new().render(&store, area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Friday, March 15, 2024"));
        assert!(text.contains("Note"));
        assert!(text.contains("Emoji"));
    }
}
