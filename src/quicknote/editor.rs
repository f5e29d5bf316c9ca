//! Draft editing.
//!
//! The [`Editor`] holds at most one [`Draft`]: a detached copy of a note that
//! has no effect on the collection until it is committed through the note
//! store. The session state machine is
//!
//! ```text
//! Idle --open--> Editing(draft) --close--> Idle
//! ```
//!
//! Opening while already editing replaces the previous draft; its unsaved
//! changes are lost.

use crate::model::Note;
use tracing::debug;

/// How the draft came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOrigin {
    /// "New note": the note was created, and persisted, when editing began.
    Created,
    /// Editing a copy of a note that was already stored.
    Existing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub note: Note,
    pub origin: DraftOrigin,
}

/// A single field change on the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Body(String),
}

#[derive(Debug, Clone)]
pub struct Editor {
    draft: Option<Draft>,
    title_max_chars: usize,
}

impl Editor {
    pub fn new(title_max_chars: usize) -> Self {
        Self {
            draft: None,
            title_max_chars,
        }
    }

    /// Start editing a copy of `note`, returning any draft it replaces.
    pub fn open(&mut self, note: Note, origin: DraftOrigin) -> Option<Draft> {
        debug!(id = %note.id, ?origin, "Opening draft");
        self.draft.replace(Draft { note, origin })
    }

    /// Apply `edit` to the draft. Titles are cut to the configured maximum
    /// length. Returns false when there is no draft.
    pub fn update(&mut self, edit: FieldEdit) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        match edit {
            FieldEdit::Title(title) => {
                draft.note.title = title.chars().take(self.title_max_chars).collect();
            }
            FieldEdit::Body(body) => draft.note.body = body,
        }
        true
    }

    /// Leave edit mode, handing back the draft.
    pub fn close(&mut self) -> Option<Draft> {
        self.draft.take()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn note(&self) -> Option<&Note> {
        self.draft.as_ref().map(|d| &d.note)
    }
}
