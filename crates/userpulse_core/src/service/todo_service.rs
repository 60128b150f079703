//! Todo list editing over the preference store.
//!
//! # Responsibility
//! - Keep an in-memory mirror of the persisted `todos` list.
//! - Persist the whole list after every successful mutation.
//!
//! # Invariants
//! - Item identity is positional; there are no stable ids.
//! - Immediately after any successful mutation the persisted list equals the
//!   in-memory list element for element.
//! - At most one item is in edit mode; entering edit of another item commits
//!   the open edit first.

use crate::repo::preference_repo::{keys, PreferenceRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoResult<T> = Result<T, TodoError>;

/// Todo mutation errors.
#[derive(Debug)]
pub enum TodoError {
    /// Input trimmed to empty; list and storage are untouched.
    EmptyText,
    IndexOutOfRange { index: usize, len: usize },
    /// Draft update targeted an item that is not in edit mode.
    NotEditing { index: usize },
    Repo(RepoError),
}

impl Display for TodoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text must not be empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "todo index {index} out of range for list of {len}")
            }
            Self::NotEditing { index } => {
                write!(f, "todo at index {index} is not in edit mode")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TodoError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Single-slot edit mode, tagged so transitions stay explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    NotEditing,
    Editing { index: usize },
}

/// View service for the todo list.
pub struct TodoService<R: PreferenceRepository> {
    repo: R,
    items: Vec<String>,
    edit: EditState,
}

impl<R: PreferenceRepository> TodoService<R> {
    /// Hydrates the in-memory list from the `todos` key.
    pub fn load(repo: R) -> TodoResult<Self> {
        let items = repo.get_list(keys::TODOS)?;
        Ok(Self {
            repo,
            items,
            edit: EditState::NotEditing,
        })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    /// Appends `text` and persists the whole list.
    ///
    /// The text is stored as given; trimming is only used for the emptiness
    /// check.
    pub fn add(&mut self, text: &str) -> TodoResult<()> {
        if text.trim().is_empty() {
            return Err(TodoError::EmptyText);
        }
        self.items.push(text.to_string());
        self.persist()
    }

    /// Removes the item at `index` and persists the resulting list.
    ///
    /// An open edit at the removed index is dropped; an open edit behind it
    /// shifts down to keep pointing at the same item.
    pub fn delete(&mut self, index: usize) -> TodoResult<()> {
        self.check_index(index)?;
        self.items.remove(index);

        if let EditState::Editing { index: editing } = self.edit {
            if editing == index {
                self.edit = EditState::NotEditing;
            } else if editing > index {
                self.edit = EditState::Editing { index: editing - 1 };
            }
        }

        self.persist()
    }

    /// Enters edit mode for `index`.
    ///
    /// When another item is already being edited, its edit is committed
    /// (persisted) first, so no draft is silently lost.
    pub fn begin_edit(&mut self, index: usize) -> TodoResult<()> {
        self.check_index(index)?;
        if let EditState::Editing { index: open } = self.edit {
            if open != index {
                self.commit_edit()?;
            }
        }
        self.edit = EditState::Editing { index };
        Ok(())
    }

    /// Rewrites the in-memory draft of the item under edit.
    ///
    /// Nothing is persisted until `commit_edit`.
    pub fn update_draft(&mut self, index: usize, text: &str) -> TodoResult<()> {
        self.check_index(index)?;
        if self.edit != (EditState::Editing { index }) {
            return Err(TodoError::NotEditing { index });
        }
        self.items[index] = text.to_string();
        Ok(())
    }

    /// Leaves edit mode and persists the full list, changed or not.
    ///
    /// No open edit is a no-op.
    pub fn commit_edit(&mut self) -> TodoResult<()> {
        if self.edit == EditState::NotEditing {
            return Ok(());
        }
        self.edit = EditState::NotEditing;
        self.persist()
    }

    fn check_index(&self, index: usize) -> TodoResult<()> {
        if index >= self.items.len() {
            return Err(TodoError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    fn persist(&self) -> TodoResult<()> {
        self.repo.set_list(keys::TODOS, &self.items)?;
        Ok(())
    }
}
