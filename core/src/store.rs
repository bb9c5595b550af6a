// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::annotation::{RawMarks, marks_from_raw, normalize_marks};
use crate::backup::Backup;
use crate::storage::StorageSlot;
use crate::theme::{emoji_palette, normalize_emojis};
use crate::{Annotation, AnnotationPatch, DayKey, Error, Marks, Theme};

/// The annotations of every day, plus the user's settings, backed by a
/// storage slot.
#[derive(Debug)]
pub struct AnnotationStore {
    slot: Box<dyn StorageSlot>,
    marks: Marks,
    theme: Theme,
    selected_year: i32,
    custom_emojis: String,
}

impl AnnotationStore {
    /// Load the persisted document from the slot.
    ///
    /// Missing or corrupt data yields the defaults, `today` decides the
    /// default year. Failures are logged and never returned.
    #[tracing::instrument(skip(slot))]
    pub fn load(slot: Box<dyn StorageSlot>, today: NaiveDate) -> Self {
        let raw = match read_document(slot.as_ref()) {
            Ok(Some(raw)) => {
                tracing::debug!("loaded saved document");
                raw
            }
            Ok(None) => {
                tracing::debug!("no saved document, using defaults");
                DocumentRaw::default()
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable saved document");
                DocumentRaw::default()
            }
        };

        let selected_year = match raw.selected_year {
            Some(year) if year > 0 => year,
            _ => today.year(),
        };

        Self {
            slot,
            marks: raw.marks.map(marks_from_raw).unwrap_or_default(),
            theme: raw.theme.unwrap_or_default(),
            selected_year,
            custom_emojis: raw.custom_emojis.unwrap_or_default(),
        }
    }

    /// Write the whole document to the slot.
    pub fn save(&self) -> Result<(), Error> {
        let document = DocumentRef {
            year: self.selected_year,
            selected_year: self.selected_year,
            marks: &self.marks,
            theme: self.theme,
            custom_emojis: &self.custom_emojis,
            last_updated: Utc::now(),
        };

        let content = serde_json::to_string(&document)
            .map_err(|e| Error::StorageWrite(std::io::Error::other(e)))?;
        self.slot.write(&content).map_err(Error::StorageWrite)
    }

    /// Save, logging instead of returning a failure. The in-memory state
    /// stays authoritative until the next successful write.
    pub fn save_or_log(&self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%err, "failed to save document");
                false
            }
        }
    }

    pub fn annotation(&self, key: &DayKey) -> Option<&Annotation> {
        self.marks.get(key)
    }

    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Whether at least one day carries an annotation.
    pub fn has_marks(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Merge the patch into the day's annotation. When no field remains
    /// populated the day is removed and `None` is returned.
    pub fn set_annotation(&mut self, key: DayKey, patch: AnnotationPatch) -> Option<&Annotation> {
        let current = self.marks.remove(&key).unwrap_or_default();
        let annotation = current.apply(patch);
        self.insert_or_remove(key, annotation)
    }

    /// Overwrite the day's annotation as a whole.
    pub fn replace_annotation(&mut self, key: DayKey, annotation: Annotation) -> Option<&Annotation> {
        self.insert_or_remove(key, annotation.normalized())
    }

    /// Remove the day's annotation, returns whether there was one.
    pub fn clear_annotation(&mut self, key: &DayKey) -> bool {
        self.marks.remove(key).is_some()
    }

    pub(crate) fn replace_marks(&mut self, marks: Marks) {
        self.marks = normalize_marks(marks);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn set_selected_year(&mut self, year: i32) {
        self.selected_year = year;
    }

    /// The raw custom emoji list, empty when the defaults are in use.
    pub fn custom_emojis(&self) -> &str {
        &self.custom_emojis
    }

    pub fn set_custom_emojis(&mut self, custom: impl Into<String>) {
        self.custom_emojis = custom.into();
    }

    /// Deduplicate and re-space the custom emoji list. A blank list falls
    /// back to the defaults.
    pub fn normalize_custom_emojis(&mut self) -> &str {
        self.custom_emojis = normalize_emojis(&self.custom_emojis);
        &self.custom_emojis
    }

    /// The emojis to offer in the editor.
    pub fn emoji_palette(&self) -> Vec<String> {
        emoji_palette(&self.custom_emojis)
    }

    /// Snapshot the store into a backup document.
    pub fn export_backup(&self, exported_at: DateTime<Utc>) -> Backup {
        Backup::new(
            self.selected_year,
            self.marks.clone(),
            self.theme,
            self.custom_emojis.clone(),
            exported_at,
        )
    }

    fn insert_or_remove(&mut self, key: DayKey, annotation: Annotation) -> Option<&Annotation> {
        if annotation.is_empty() {
            tracing::debug!(%key, "removing empty annotation");
            self.marks.remove(&key);
            None
        } else {
            tracing::debug!(%key, ?annotation, "saving annotation");
            self.marks.insert(key, annotation);
            self.marks.get(&key)
        }
    }
}

fn read_document(slot: &dyn StorageSlot) -> Result<Option<DocumentRaw>, Error> {
    let Some(content) = slot
        .read()
        .map_err(|e| Error::StorageRead(e.to_string()))?
    else {
        return Ok(None);
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| Error::StorageRead(e.to_string()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    year: i32,
    selected_year: i32,
    marks: &'a Marks,
    theme: Theme,
    custom_emojis: &'a str,
    last_updated: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRaw {
    #[serde(default)]
    marks: Option<RawMarks>,

    #[serde(default)]
    theme: Option<Theme>,

    #[serde(default)]
    selected_year: Option<i32>,

    #[serde(default)]
    custom_emojis: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;
    use crate::day_key;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    fn empty_store() -> (AnnotationStore, MemorySlot) {
        let slot = MemorySlot::new();
        let store = AnnotationStore::load(Box::new(slot.clone()), today());
        (store, slot)
    }

    #[test]
    fn loads_defaults_when_nothing_saved() {
        let (store, _) = empty_store();
        assert!(store.marks().is_empty());
        assert_eq!(store.theme(), Theme::Lavender);
        assert_eq!(store.selected_year(), 2024);
        assert_eq!(store.custom_emojis(), "");
    }

    #[test]
    fn loads_defaults_when_document_is_corrupt() {
        let slot = MemorySlot::with_content("{ not json");
        let store = AnnotationStore::load(Box::new(slot), today());
        assert!(store.marks().is_empty());
        assert_eq!(store.selected_year(), 2024);
    }

    #[test]
    fn loads_saved_document() {
        let slot = MemorySlot::with_content(
            r##"{
                "year": 2023,
                "selectedYear": 2023,
                "marks": {"2023-05-01": {"emoji": "🌸", "note": "spring"}},
                "theme": "mint",
                "customEmojis": "🌸 🌿",
                "lastUpdated": "2023-05-01T10:00:00.000Z"
            }"##,
        );
        let store = AnnotationStore::load(Box::new(slot), today());

        assert_eq!(store.selected_year(), 2023);
        assert_eq!(store.theme(), Theme::Mint);
        assert_eq!(store.custom_emojis(), "🌸 🌿");
        let key: DayKey = "2023-05-01".parse().unwrap();
        assert_eq!(store.annotation(&key).unwrap().note.as_deref(), Some("spring"));
    }

    #[test]
    fn unknown_theme_loads_as_default() {
        let slot = MemorySlot::with_content(r#"{"marks": {}, "theme": "vaporwave"}"#);
        let store = AnnotationStore::load(Box::new(slot), today());
        assert_eq!(store.theme(), Theme::Lavender);
    }

    #[test]
    fn saves_whole_document() {
        let (mut store, slot) = empty_store();
        let key = day_key(2024, 75).unwrap();
        store.set_annotation(key, AnnotationPatch::color(Some("#FFB7C5".to_string())));
        store.set_theme(Theme::Honey);
        store.save().unwrap();

        let saved: serde_json::Value = serde_json::from_str(&slot.content().unwrap()).unwrap();
        assert_eq!(saved["marks"]["2024-03-15"]["color"], "#FFB7C5");
        assert_eq!(saved["theme"], "honey");
        assert_eq!(saved["selectedYear"], 2024);
        assert_eq!(saved["customEmojis"], "");
        assert!(saved["lastUpdated"].is_string());

        let reloaded = AnnotationStore::load(Box::new(slot), today());
        assert_eq!(reloaded.marks(), store.marks());
        assert_eq!(reloaded.theme(), Theme::Honey);
    }

    #[test]
    fn empty_annotation_is_not_stored() {
        let (mut store, _) = empty_store();
        let key = day_key(2024, 10).unwrap();

        let result = store.set_annotation(
            key,
            AnnotationPatch {
                color: Some(None),
                emoji: Some(None),
                note: Some(Some(String::new())),
            },
        );
        assert!(result.is_none());
        assert!(store.annotation(&key).is_none());
        assert!(!store.has_marks());
    }

    #[test]
    fn clearing_last_field_removes_the_day() {
        let (mut store, _) = empty_store();
        let key = day_key(2024, 75).unwrap();

        store.set_annotation(key, AnnotationPatch::emoji(Some("🎂".to_string())));
        store.set_annotation(key, AnnotationPatch::note(Some("cake".to_string())));
        assert!(store.has_marks());

        store.set_annotation(key, AnnotationPatch::emoji(None));
        assert_eq!(store.annotation(&key).unwrap().note.as_deref(), Some("cake"));

        store.set_annotation(key, AnnotationPatch::note(None));
        assert!(store.annotation(&key).is_none());
    }

    #[test]
    fn replaces_and_clears_annotation() {
        let (mut store, _) = empty_store();
        let key = day_key(2024, 1).unwrap();

        let annotation = Annotation {
            color: Some("#C5E8F7".to_string()),
            emoji: None,
            note: Some("new year".to_string()),
        };
        store.replace_annotation(key, annotation.clone());
        assert_eq!(store.annotation(&key), Some(&annotation));

        assert!(store.clear_annotation(&key));
        assert!(!store.clear_annotation(&key));
    }

    #[test]
    fn normalizes_custom_emojis() {
        let (mut store, _) = empty_store();
        store.set_custom_emojis(" 🐱 🐶  🐱 ");
        assert_eq!(store.normalize_custom_emojis(), "🐱 🐶");
        assert_eq!(store.emoji_palette(), vec!["🐱", "🐶"]);

        store.set_custom_emojis("   ");
        assert_eq!(store.normalize_custom_emojis(), "");
        assert_eq!(store.emoji_palette().len(), 15);
    }
}
