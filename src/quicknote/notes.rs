//! # Note Store
//!
//! [`NoteStore`] exclusively owns the in-memory note collection. Every
//! mutation writes the full collection back through [`Persistence`]; there is
//! no batching and no partial write.
//!
//! Storage write failures are best-effort: they are logged and the in-memory
//! state stays authoritative. The only error a caller ever sees is a
//! [`ValidationError`] from [`NoteStore::save`], and that leaves the
//! collection untouched.

use crate::config::NotesConfig;
use crate::error::ValidationError;
use crate::model::{now_millis, sort_by_recency, Note, NoteId};
use crate::store::persistence::Persistence;
use crate::store::Storage;
use tracing::{debug, instrument, warn};

pub struct NoteStore<S: Storage> {
    notes: Vec<Note>,
    persistence: Persistence<S>,
    config: NotesConfig,
}

impl<S: Storage> NoteStore<S> {
    /// Open the store, loading whatever collection is persisted. Unusable
    /// config values fall back to their defaults.
    pub fn open(storage: S, config: NotesConfig) -> Self {
        let config = config.validated();
        let persistence = Persistence::new(storage, config.storage_key.clone());
        let notes = persistence.load();
        Self {
            notes,
            persistence,
            config,
        }
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Create an "Untitled Note" at the front of the collection and persist it.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&mut self) -> Note {
        let mut note = Note::new(self.config.default_title.clone(), String::new());
        note.updated = self.next_stamp(&note.id);
        self.notes.insert(0, note.clone());
        self.persist();
        debug!(id = %note.id, "Created note");
        note
    }

    /// Validate and store `draft`, replacing the note with the same id.
    /// The saved note moves to the front of the collection and `updated` is
    /// re-stamped.
    #[instrument(level = "debug", skip(self, draft), fields(id = %draft.id))]
    pub fn save(&mut self, mut draft: Note) -> Result<Note, ValidationError> {
        self.validate(&draft)?;

        draft.updated = self.next_stamp(&draft.id);
        self.notes.retain(|n| n.id != draft.id);
        self.notes.insert(0, draft.clone());
        self.persist();
        debug!("Saved note");
        Ok(draft)
    }

    /// Remove the note with `id`. Absent ids are a no-op, but the
    /// collection is still written. Returns whether a note was removed.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| &n.id != id);
        let removed = self.notes.len() != before;
        self.persist();
        debug!(removed, "Deleted note");
        removed
    }

    /// All notes, most recently updated first.
    pub fn list(&self) -> Vec<Note> {
        let mut notes = self.notes.clone();
        sort_by_recency(&mut notes);
        notes
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Discard in-memory state and re-read the collection from storage.
    pub fn reload(&mut self) {
        self.notes = self.persistence.load();
    }

    pub fn validate(&self, note: &Note) -> Result<(), ValidationError> {
        if note.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let len = note.title.chars().count();
        if len > self.config.title_max_chars {
            return Err(ValidationError::TitleTooLong {
                len,
                max: self.config.title_max_chars,
            });
        }
        Ok(())
    }

    /// Current time, bumped past every other note's timestamp so the note
    /// being written always sorts first. Saturates at `i64::MAX`, where the
    /// front position breaks the tie.
    fn next_stamp(&self, id: &NoteId) -> i64 {
        let latest = self
            .notes
            .iter()
            .filter(|n| &n.id != id)
            .map(|n| n.updated)
            .max();
        match latest {
            Some(latest) if latest >= now_millis() => latest.saturating_add(1),
            _ => now_millis(),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.store(&self.notes) {
            warn!(error = %e, "Failed to persist notes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StorageFixture;
    use crate::store::memory::MemStorage;

    fn empty_store() -> NoteStore<MemStorage> {
        NoteStore::open(MemStorage::new(), NotesConfig::default())
    }

    fn store_with_a_and_b() -> NoteStore<MemStorage> {
        let storage = StorageFixture::new()
            .with_note("a", "A", "first", 100)
            .with_note("b", "B", "second", 200)
            .build();
        NoteStore::open(storage, NotesConfig::default())
    }

    fn reopened(store: NoteStore<MemStorage>) -> Vec<Note> {
        store.persistence().load()
    }

    #[test]
    fn create_adds_untitled_note_and_persists() {
        let mut store = empty_store();
        let before = now_millis();
        let note = store.create();

        assert_eq!(note.title, "Untitled Note");
        assert_eq!(note.body, "");
        assert!(note.updated >= before);
        assert_eq!(store.len(), 1);
        assert_eq!(reopened(store), vec![note]);
    }

    #[test]
    fn create_uses_configured_title() {
        let config = NotesConfig {
            default_title: "New".into(),
            ..NotesConfig::default()
        };
        let mut store = NoteStore::open(MemStorage::new(), config);
        assert_eq!(store.create().title, "New");
    }

    #[test]
    fn created_ids_are_unique() {
        let mut store = empty_store();
        let a = store.create();
        let b = store.create();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn list_orders_by_updated_desc() {
        let store = store_with_a_and_b();
        let titles: Vec<_> = store.list().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn list_is_sorted_after_mixed_operations() {
        let mut store = store_with_a_and_b();
        store.create();
        let a = store.find(&NoteId::from("a")).cloned().unwrap();
        store.save(a).unwrap();
        store.create();

        let listed = store.list();
        assert!(listed.windows(2).all(|w| w[0].updated >= w[1].updated));
    }

    #[test]
    fn save_replaces_existing_and_restamps() {
        let mut store = store_with_a_and_b();
        let mut a = store.find(&NoteId::from("a")).cloned().unwrap();
        a.title = "A edited".into();

        let saved = store.save(a).unwrap();
        assert!(saved.updated > 200);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].title, "A edited");
        assert_eq!(reopened(store).len(), 2);
    }

    #[test]
    fn save_inserts_unknown_note() {
        let mut store = store_with_a_and_b();
        let saved = store.save(Note::new("Fresh", "text")).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.find(&saved.id), Some(&saved));
        assert_eq!(store.list()[0].id, saved.id);
    }

    #[test]
    fn save_stamps_strictly_after_future_timestamps() {
        let far_future = now_millis() + 1_000_000;
        let storage = StorageFixture::new()
            .with_note("a", "A", "", far_future)
            .build();
        let mut store = NoteStore::open(storage, NotesConfig::default());
        let saved = store.save(Note::new("B", "")).unwrap();
        assert_eq!(saved.updated, far_future + 1);
    }

    #[test]
    fn save_at_max_timestamp_saturates_and_sorts_first() {
        let storage = StorageFixture::new()
            .with_note("a", "A", "", i64::MAX)
            .with_note("b", "B", "", 100)
            .build();
        let mut store = NoteStore::open(storage, NotesConfig::default());

        let created = store.create();
        assert_eq!(created.updated, i64::MAX);
        assert_eq!(store.list()[0].id, created.id);

        let b = store.find(&NoteId::from("b")).cloned().unwrap();
        let saved = store.save(b).unwrap();
        assert_eq!(saved.updated, i64::MAX);
        assert_eq!(store.list()[0].id, NoteId::from("b"));
    }

    #[test]
    fn open_validates_config_before_create() {
        let config = NotesConfig {
            default_title: "   ".into(),
            ..NotesConfig::default()
        };
        let mut store = NoteStore::open(MemStorage::new(), config);
        let note = store.create();

        assert_eq!(note.title, "Untitled Note");
        assert_eq!(store.config().default_title, "Untitled Note");
        assert_eq!(reopened(store)[0].title, "Untitled Note");
    }

    #[test]
    fn open_with_zero_title_limit_still_saves() {
        let config = NotesConfig {
            title_max_chars: 0,
            ..NotesConfig::default()
        };
        let mut store = NoteStore::open(MemStorage::new(), config);
        assert!(store.save(Note::new("Valid", "")).is_ok());
    }

    #[test]
    fn save_rejects_blank_titles_without_mutating() {
        let mut store = store_with_a_and_b();
        let writes = store.persistence().storage().write_count();
        let before = store.list();

        for title in ["", "   ", "\t\n"] {
            let mut draft = store.find(&NoteId::from("a")).cloned().unwrap();
            draft.title = title.into();
            assert_eq!(store.save(draft), Err(ValidationError::EmptyTitle));
        }
        assert_eq!(
            store.save(Note::new("", "new")),
            Err(ValidationError::EmptyTitle)
        );

        assert_eq!(store.list(), before);
        assert_eq!(store.persistence().storage().write_count(), writes);
    }

    #[test]
    fn save_rejects_overlong_titles() {
        let mut store = empty_store();
        let title: String = "x".repeat(61);
        assert_eq!(
            store.save(Note::new(title, "")),
            Err(ValidationError::TitleTooLong { len: 61, max: 60 })
        );
        assert!(store.save(Note::new("x".repeat(60), "")).is_ok());
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let mut store = store_with_a_and_b();
        let id = NoteId::from("b");

        assert!(store.delete(&id));
        let after_once = store.list();
        assert!(!store.delete(&id));

        assert_eq!(store.list(), after_once);
        assert_eq!(store.len(), 1);
        assert!(store.find(&id).is_none());
        assert_eq!(reopened(store).len(), 1);
    }

    #[test]
    fn every_mutation_writes_through() {
        let mut store = empty_store();
        let note = store.create();
        store.save(note.clone()).unwrap();
        store.delete(&note.id);
        assert_eq!(store.persistence().storage().write_count(), 3);
    }

    #[test]
    fn write_failures_are_swallowed() {
        let mut store = empty_store();
        store.persistence().storage().set_simulate_write_error(true);

        let note = store.create();
        assert_eq!(store.len(), 1);
        assert!(store.save(note.clone()).is_ok());
        assert!(store.delete(&note.id));
        assert!(store.persistence().load().is_empty());
    }

    #[test]
    fn reload_reads_back_storage() {
        let mut store = store_with_a_and_b();
        store.persistence().storage().set_simulate_write_error(true);
        store.create();
        assert_eq!(store.len(), 3);

        store.reload();
        assert_eq!(store.len(), 2);
    }
}
