// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::date::{day_key, format_display_date};
use crate::{Annotation, AnnotationStore, DayKey, Error};

/// The editable fields of the day being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDay {
    pub day: u32,
    pub key: DayKey,

    /// Header text, e.g. `Friday, March 15, 2024`.
    pub title: String,

    /// Note as typed, trimmed only when committed.
    pub note: String,
    pub color: Option<String>,
    pub emoji: Option<String>,
}

impl OpenDay {
    fn annotation(&self) -> Annotation {
        Annotation {
            color: self.color.clone(),
            emoji: self.emoji.clone(),
            note: Some(self.note.clone()),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Open(OpenDay),
}

/// Editing surface of a single day.
///
/// Every change is written through to the store right away, so closing never
/// loses anything. All operations on a closed editor do nothing and return
/// `None`; otherwise they return the edited day.
#[derive(Debug, Default)]
pub struct Editor {
    state: EditorState,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open(_))
    }

    pub fn open_day(&self) -> Option<&OpenDay> {
        match &self.state {
            EditorState::Open(day) => Some(day),
            EditorState::Closed => None,
        }
    }

    /// Load the day's annotation, or blank fields, into the editor.
    pub fn open(&mut self, year: i32, day: u32, store: &AnnotationStore) -> Result<(), Error> {
        let key = day_key(year, day)?;
        let title = format_display_date(year, day)?;
        let annotation = store.annotation(&key).cloned().unwrap_or_default();

        tracing::debug!(%key, "opening editor");
        self.state = EditorState::Open(OpenDay {
            day,
            key,
            title,
            note: annotation.note.unwrap_or_default(),
            color: annotation.color,
            emoji: annotation.emoji,
        });
        Ok(())
    }

    /// Close the editor, returning the day that was open.
    pub fn close(&mut self) -> Option<u32> {
        match std::mem::take(&mut self.state) {
            EditorState::Open(day) => Some(day.day),
            EditorState::Closed => None,
        }
    }

    /// Select the color, or deselect it when it is already selected.
    pub fn toggle_color(&mut self, store: &mut AnnotationStore, color: &str) -> Option<u32> {
        self.edit(store, |day| toggle(&mut day.color, color))
    }

    /// Select the emoji, or deselect it when it is already selected.
    pub fn toggle_emoji(&mut self, store: &mut AnnotationStore, emoji: &str) -> Option<u32> {
        self.edit(store, |day| toggle(&mut day.emoji, emoji))
    }

    pub fn set_note(&mut self, store: &mut AnnotationStore, note: impl Into<String>) -> Option<u32> {
        let note = note.into();
        self.edit(store, |day| day.note = note)
    }

    /// Empty every field, which removes the day's annotation.
    pub fn clear(&mut self, store: &mut AnnotationStore) -> Option<u32> {
        self.edit(store, |day| {
            day.note.clear();
            day.color = None;
            day.emoji = None;
        })
    }

    fn edit(&mut self, store: &mut AnnotationStore, f: impl FnOnce(&mut OpenDay)) -> Option<u32> {
        let EditorState::Open(day) = &mut self.state else {
            return None;
        };

        f(day);
        store.replace_annotation(day.key, day.annotation());
        Some(day.day)
    }
}

fn toggle(slot: &mut Option<String>, value: &str) {
    if slot.as_deref() == Some(value) {
        *slot = None;
    } else {
        *slot = Some(value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::storage::MemorySlot;

    fn store() -> AnnotationStore {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        AnnotationStore::load(Box::new(MemorySlot::new()), today)
    }

    fn key(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn opens_with_blank_fields() {
        let store = store();
        let mut editor = Editor::new();
        editor.open(2024, 75, &store).unwrap();
        let day = editor.open_day().unwrap();

        assert_eq!(day.title, "Friday, March 15, 2024");
        assert_eq!(day.key, key("2024-03-15"));
        assert_eq!(day.note, "");
        assert_eq!(day.color, None);
        assert_eq!(day.emoji, None);
        assert!(editor.is_open());
    }

    #[test]
    fn opens_with_stored_annotation() {
        let mut store = store();
        store.replace_annotation(
            key("2024-03-15"),
            Annotation {
                color: Some("#98E4C9".to_string()),
                emoji: Some("🌸".to_string()),
                note: Some("walk".to_string()),
            },
        );

        let mut editor = Editor::new();
        editor.open(2024, 75, &store).unwrap();
        let day = editor.open_day().unwrap();
        assert_eq!(day.note, "walk");
        assert_eq!(day.color.as_deref(), Some("#98E4C9"));
        assert_eq!(day.emoji.as_deref(), Some("🌸"));
    }

    #[test]
    fn rejects_out_of_range_day() {
        let store = store();
        let mut editor = Editor::new();
        assert!(matches!(
            editor.open(2023, 366, &store),
            Err(Error::InvalidDay { year: 2023, day: 366 })
        ));
        assert!(!editor.is_open());
    }

    #[test]
    fn color_toggle_commits_and_deselects() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open(2024, 75, &store).unwrap();

        assert_eq!(editor.toggle_color(&mut store, "#FFB7C5"), Some(75));
        let annotation = store.annotation(&key("2024-03-15")).unwrap();
        assert_eq!(annotation.color.as_deref(), Some("#FFB7C5"));

        editor.toggle_color(&mut store, "#FFB7C5");
        assert!(store.annotation(&key("2024-03-15")).is_none());
        assert_eq!(editor.open_day().unwrap().color, None);
    }

    #[test]
    fn selecting_another_option_replaces_it() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open(2024, 75, &store).unwrap();

        editor.toggle_emoji(&mut store, "🎉");
        editor.toggle_emoji(&mut store, "⭐");
        let annotation = store.annotation(&key("2024-03-15")).unwrap();
        assert_eq!(annotation.emoji.as_deref(), Some("⭐"));
    }

    #[test]
    fn note_is_trimmed_on_commit() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open(2024, 1, &store).unwrap();

        editor.set_note(&mut store, "  dentist at 9  ");
        let annotation = store.annotation(&key("2024-01-01")).unwrap();
        assert_eq!(annotation.note.as_deref(), Some("dentist at 9"));
        assert_eq!(editor.open_day().unwrap().note, "  dentist at 9  ");

        editor.set_note(&mut store, "   ");
        assert!(store.annotation(&key("2024-01-01")).is_none());
    }

    #[test]
    fn clear_removes_the_annotation() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open(2024, 2, &store).unwrap();
        editor.toggle_color(&mut store, "#C9B1FF");
        editor.toggle_emoji(&mut store, "🌙");
        editor.set_note(&mut store, "late");

        assert_eq!(editor.clear(&mut store), Some(2));
        assert!(!store.has_marks());
        let day = editor.open_day().unwrap();
        assert_eq!((day.color.as_ref(), day.emoji.as_ref()), (None, None));
    }

    #[test]
    fn closed_editor_ignores_edits() {
        let mut store = store();
        let mut editor = Editor::new();
        assert_eq!(editor.toggle_color(&mut store, "#FFB7C5"), None);
        assert_eq!(editor.set_note(&mut store, "x"), None);
        assert_eq!(editor.clear(&mut store), None);
        assert_eq!(editor.close(), None);
        assert!(!store.has_marks());
    }

    #[test]
    fn close_keeps_committed_edits() {
        let mut store = store();
        let mut editor = Editor::new();
        editor.open(2024, 75, &store).unwrap();
        editor.toggle_emoji(&mut store, "🎂");

        assert_eq!(editor.close(), Some(75));
        assert_eq!(editor.state(), &EditorState::Closed);
        assert!(store.annotation(&key("2024-03-15")).is_some());
    }
}
