// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::DayKey;

/// All annotations, ordered by day.
pub type Marks = BTreeMap<DayKey, Annotation>;

/// The optional color, emoji and note attached to a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Color swatch, such as `#FFB7C5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Annotation {
    /// Whether no field is populated. Such an annotation is never stored.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.emoji.is_none() && self.note.is_none()
    }

    pub fn has_note(&self) -> bool {
        self.note.is_some()
    }

    /// Trims every field and turns blank ones into `None`.
    pub fn normalized(self) -> Self {
        Self {
            color: non_blank(self.color),
            emoji: non_blank(self.emoji),
            note: non_blank(self.note),
        }
    }

    /// Merge the patch into this annotation, the result is normalized.
    pub fn apply(mut self, patch: AnnotationPatch) -> Self {
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(emoji) = patch.emoji {
            self.emoji = emoji;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
        self.normalized()
    }
}

/// Partial update of an [`Annotation`].
///
/// `None` leaves a field untouched, `Some(None)` clears it and
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationPatch {
    pub color: Option<Option<String>>,
    pub emoji: Option<Option<String>>,
    pub note: Option<Option<String>>,
}

impl AnnotationPatch {
    pub fn color(color: Option<String>) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn emoji(emoji: Option<String>) -> Self {
        Self {
            emoji: Some(emoji),
            ..Default::default()
        }
    }

    pub fn note(note: Option<String>) -> Self {
        Self {
            note: Some(note),
            ..Default::default()
        }
    }
}

/// Marks as found in untrusted JSON, before the keys are validated.
pub(crate) type RawMarks = BTreeMap<String, Annotation>;

/// Validate the keys of untrusted marks, dropping entries that are not valid
/// days or carry no data.
pub(crate) fn marks_from_raw(raw: RawMarks) -> Marks {
    let marks = raw
        .into_iter()
        .filter_map(|(key, annotation)| match key.parse::<DayKey>() {
            Ok(day) => Some((day, annotation)),
            Err(_) => {
                tracing::warn!(%key, "dropping annotation with invalid day key");
                None
            }
        })
        .collect();
    normalize_marks(marks)
}

/// Drop blank annotations and keep the rest normalized.
pub(crate) fn normalize_marks(marks: Marks) -> Marks {
    marks
        .into_iter()
        .map(|(key, annotation)| (key, annotation.normalized()))
        .filter(|(_, annotation)| !annotation.is_empty())
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_owned())
        }
    })
}
