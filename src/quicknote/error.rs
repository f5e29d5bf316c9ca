use crate::model::NoteId;
use thiserror::Error;

/// A note could not be saved because its fields are invalid.
///
/// Validation failures never mutate state: the collection stays as it was
/// and an open draft stays open so the user can correct it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title is too long ({len} characters, max {max})")]
    TitleTooLong { len: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum NotesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("No note is being edited")]
    NotEditing,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, NotesError>;
