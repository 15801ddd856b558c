//! Ordered, duplicate-free set of selected swatches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a selectable swatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(String);

impl ColorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Outcome of [`SelectionRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddResult {
    /// Whether the id was appended (false if it was already selected)
    pub added: bool,
    /// Selection size after the call
    pub new_size: usize,
}

/// Misuse of [`SelectionRegistry::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// restore was already called in this session
    AlreadyRestored,
    /// restore was called after colors were added
    NotEmpty(usize),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRestored => write!(f, "selection was already restored this session"),
            Self::NotEmpty(n) => {
                write!(f, "cannot restore into a selection that holds {n} colors")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// In-memory selection, the source of truth during a session.
#[derive(Debug, Default)]
pub struct SelectionRegistry {
    ids: Vec<ColorId>,
    restored: bool,
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` unless it is already selected.
    pub fn add(&mut self, id: ColorId) -> AddResult {
        let added = !self.contains(&id);
        if added {
            self.ids.push(id);
        }
        AddResult {
            added,
            new_size: self.ids.len(),
        }
    }

    pub fn contains(&self, id: &ColorId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in click order.
    pub fn all(&self) -> &[ColorId] {
        &self.ids
    }

    pub fn get(&self, index: usize) -> Option<&ColorId> {
        self.ids.get(index)
    }

    /// Initialise from persisted data. Startup only: at most once, and only
    /// while nothing has been added yet.
    pub fn restore(
        &mut self,
        ids: impl IntoIterator<Item = ColorId>,
    ) -> Result<(), SelectionError> {
        if self.restored {
            return Err(SelectionError::AlreadyRestored);
        }
        if !self.ids.is_empty() {
            return Err(SelectionError::NotEmpty(self.ids.len()));
        }

        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        self.restored = true;
        Ok(())
    }

    /// Empty the selection. A reset starts a new session, so restore is
    /// allowed again afterwards.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.restored = false;
    }
}
