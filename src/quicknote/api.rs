//! # API Facade
//!
//! [`NotesApp`] is the single entry point for a view layer. It owns the
//! [`NoteStore`], the [`Selection`] and the [`Editor`], and turns each user
//! intent into the right sequence of calls on them.
//!
//! ## Intents
//!
//! `create`, `select`, `begin_edit`, `update_field`, `commit`, `discard`,
//! `delete`, `set_search`.
//!
//! ## Queries
//!
//! `list`, `filtered_view`, `selected_id`, `selected_note`, `current_note`,
//! `draft`, `is_editing`, `query`.
//!
//! ## Auto-select
//!
//! After opening and after every intent the selection is reconciled against
//! the collection: if nothing valid is selected, the most recently updated
//! note is. This is re-checked every time rather than applied once.
//!
//! ## Generic Over Storage
//!
//! `NotesApp<S: Storage>` works with any backend:
//! - Production: `NotesApp<FileStorage>`
//! - Testing: `NotesApp<MemStorage>`

use crate::config::NotesConfig;
use crate::editor::{Draft, DraftOrigin, Editor, FieldEdit};
use crate::error::{NotesError, Result};
use crate::model::{Note, NoteId};
use crate::notes::NoteStore;
use crate::selection::{self, Selection};
use crate::store::Storage;
use tracing::debug;

pub struct NotesApp<S: Storage> {
    store: NoteStore<S>,
    selection: Selection,
    editor: Editor,
}

impl<S: Storage> NotesApp<S> {
    pub fn open(storage: S, config: NotesConfig) -> Self {
        let store = NoteStore::open(storage, config);
        let editor = Editor::new(store.config().title_max_chars);
        let mut app = Self {
            store,
            selection: Selection::new(),
            editor,
        };
        app.reconcile_selection();
        app
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    // --- Intents ---

    /// "New note": create and persist an untitled note, select it and open
    /// it in the editor.
    ///
    /// The note stays in the collection even if the draft is later
    /// discarded.
    pub fn create(&mut self) -> Note {
        let note = self.store.create();
        self.selection.select(note.id.clone());
        self.editor.open(note.clone(), DraftOrigin::Created);
        note
    }

    /// Open a stored note's copy in the editor. The collection is not
    /// touched until `commit`.
    pub fn begin_edit(&mut self, id: &NoteId) -> Result<&Draft> {
        let note = self
            .store
            .find(id)
            .cloned()
            .ok_or_else(|| NotesError::NoteNotFound(id.clone()))?;
        self.editor.open(note, DraftOrigin::Existing);
        self.editor.draft().ok_or(NotesError::NotEditing)
    }

    /// `begin(None)` creates a new note, `begin(Some(id))` edits `id`.
    pub fn begin(&mut self, base: Option<&NoteId>) -> Result<&Draft> {
        match base {
            Some(id) => self.begin_edit(id),
            None => {
                self.create();
                self.editor.draft().ok_or(NotesError::NotEditing)
            }
        }
    }

    pub fn update_field(&mut self, edit: FieldEdit) -> bool {
        self.editor.update(edit)
    }

    /// Save the draft. On success the editor closes and the saved note is
    /// selected; on a validation error everything stays as it was.
    pub fn commit(&mut self) -> Result<Note> {
        let draft = self.editor.note().cloned().ok_or(NotesError::NotEditing)?;
        let saved = self.store.save(draft)?;
        self.editor.close();
        self.selection.select(saved.id.clone());
        self.reconcile_selection();
        debug!(id = %saved.id, "Committed draft");
        Ok(saved)
    }

    /// Close the editor without saving.
    pub fn discard(&mut self) -> Option<Draft> {
        self.editor.close()
    }

    /// Select a note, dropping any draft in progress.
    pub fn select(&mut self, id: NoteId) {
        self.editor.close();
        self.selection.select(id);
        self.reconcile_selection();
    }

    /// Delete a note. Deleting the note under edit also closes the editor;
    /// deleting the selected note moves the selection to the most recent
    /// remaining one.
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let removed = self.store.delete(id);
        if self.editor.note().is_some_and(|n| &n.id == id) {
            self.editor.close();
        }
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        self.reconcile_selection();
        removed
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.selection.set_search(query);
    }

    /// Re-read the collection from storage.
    pub fn reload(&mut self) {
        self.store.reload();
        self.reconcile_selection();
    }

    // --- Queries ---

    pub fn list(&self) -> Vec<Note> {
        self.store.list()
    }

    /// The list as the sidebar shows it: filtered by the current query.
    pub fn filtered_view(&self) -> Vec<Note> {
        selection::filtered_view(&self.store.list(), self.selection.query())
    }

    pub fn query(&self) -> &str {
        self.selection.query()
    }

    pub fn selected_id(&self) -> Option<&NoteId> {
        self.selection.selected()
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selection.selected().and_then(|id| self.store.find(id))
    }

    /// What the main panel shows: the draft while editing, otherwise the
    /// selected note.
    pub fn current_note(&self) -> Option<&Note> {
        self.editor.note().or_else(|| self.selected_note())
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.editor.draft()
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    fn reconcile_selection(&mut self) {
        self.selection.reconcile(&self.store.list());
    }
}
