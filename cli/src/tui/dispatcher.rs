// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use yearmark_core::Theme;

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,

    /// Same day of month in the previous month.
    Up,

    /// Same day of month in the next month.
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MoveCursor(CursorMove),
    JumpToToday,
    OpenEditor,
    CloseEditor,
    ToggleColor(String),
    ToggleEmoji(String),
    UpdateNote(String),
    ClearDay,
    OpenSettings,
    CloseSettings,
    SelectYear(i32),
    SelectTheme(Theme),
    UpdateCustomEmojis(String),
    CommitCustomEmojis,
    UpdateImportPath(String),
    Export,
    RequestImport,
    ConfirmImport(bool),
    Tick,
}
