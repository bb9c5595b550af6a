// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// File name of the persisted document inside the state directory.
pub const STORAGE_FILE_NAME: &str = "yearmark.json";

/// A single named location holding the serialized document.
pub trait StorageSlot: fmt::Debug {
    /// Returns `None` when nothing has been stored yet.
    fn read(&self) -> io::Result<Option<String>>;

    fn write(&self, content: &str) -> io::Result<()>;
}

/// Stores the document as a file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot file inside the given state directory.
    pub fn in_dir(state_dir: &Path) -> Self {
        Self::new(state_dir.join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // replace atomically, readers never observe a partial document
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)
    }
}

/// Keeps the document in memory. Clones share the same content.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    content: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Rc::new(RefCell::new(Some(content.into()))),
        }
    }

    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.content.borrow().clone())
    }

    fn write(&self, content: &str) -> io::Result<()> {
        *self.content.borrow_mut() = Some(content.to_owned());
        Ok(())
    }
}
