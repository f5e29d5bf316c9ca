use super::Storage;
use crate::error::{NotesError, Result};
use crate::model::Note;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Reads and writes the whole note collection as one JSON array stored
/// under a fixed key.
pub struct Persistence<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> Persistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the collection. Never fails: a missing entry, a read error or a
    /// value that does not parse as a note array all yield an empty
    /// collection.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored notes");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored notes, starting empty");
                return Vec::new();
            }
        };

        let notes: Vec<Note> = match serde_json::from_str(&raw) {
            Ok(notes) => notes,
            Err(e) => {
                warn!(error = %e, "Stored notes are unreadable, starting empty");
                return Vec::new();
            }
        };

        let total = notes.len();
        let mut seen = HashSet::with_capacity(total);
        let notes: Vec<Note> = notes
            .into_iter()
            .filter(|n| seen.insert(n.id.clone()))
            .collect();
        if notes.len() != total {
            warn!(
                dropped = total - notes.len(),
                "Dropped notes with duplicate ids"
            );
        }

        debug!(count = notes.len(), "Loaded notes");
        notes
    }

    /// Overwrite the stored entry with the full collection.
    #[instrument(level = "debug", skip(self, notes), fields(key = %self.key, count = notes.len()))]
    pub fn store(&self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes).map_err(NotesError::Serialization)?;
        self.storage.set_item(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteId;
    use crate::store::memory::fixtures::StorageFixture;
    use crate::store::memory::MemStorage;

    const KEY: &str = "notes-v1";

    fn note(id: &str, updated: i64) -> Note {
        Note {
            id: NoteId::from(id),
            title: format!("Title {}", id),
            body: format!("Body {}", id),
            updated,
        }
    }

    #[test]
    fn missing_entry_loads_empty() {
        let persistence = Persistence::new(MemStorage::new(), KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn store_then_load_round_trips() {
        let persistence = Persistence::new(MemStorage::new(), KEY);
        let notes = vec![note("a", 100), note("b", 200), note("c", 50)];
        persistence.store(&notes).unwrap();
        assert_eq!(persistence.load(), notes);
    }

    #[test]
    fn empty_collection_round_trips() {
        let persistence = Persistence::new(MemStorage::new(), KEY);
        persistence.store(&[]).unwrap();
        assert_eq!(
            persistence.storage().get_item(KEY).unwrap(),
            Some("[]".to_string())
        );
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn garbage_loads_empty() {
        let storage = StorageFixture::new().with_raw("{definitely not json").build();
        let persistence = Persistence::new(storage, KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn incompatible_shape_loads_empty() {
        let storage = StorageFixture::new()
            .with_raw(r#"[{"id": "a", "title": "missing body and updated"}]"#)
            .build();
        let persistence = Persistence::new(storage, KEY);
        assert!(persistence.load().is_empty());

        let storage = StorageFixture::new().with_raw(r#"{"id": "a"}"#).build();
        let persistence = Persistence::new(storage, KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let storage = StorageFixture::new()
            .with_note("a", "First", "", 100)
            .with_note("a", "Second", "", 200)
            .with_note("b", "Other", "", 50)
            .build();
        let persistence = Persistence::new(storage, KEY);
        let notes = persistence.load();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "First");
    }

    #[test]
    fn store_propagates_write_error() {
        let persistence = Persistence::new(MemStorage::new(), KEY);
        persistence.storage().set_simulate_write_error(true);
        assert!(persistence.store(&[note("a", 1)]).is_err());
    }

    #[test]
    fn uses_its_own_key() {
        let storage = MemStorage::new();
        let work = Persistence::new(&storage, "work");
        let home = Persistence::new(&storage, "home");
        work.store(&[note("a", 1)]).unwrap();
        assert_eq!(work.load().len(), 1);
        assert!(home.load().is_empty());
    }
}
