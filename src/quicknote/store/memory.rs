use super::Storage;
use crate::error::{NotesError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Uses `RefCell` for interior mutability since quicknote is single-threaded.
#[derive(Default)]
pub struct MemStorage {
    items: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl Storage for MemStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(NotesError::Storage("Simulated write error".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::config::NotesConfig;
    use crate::model::{Note, NoteId};

    /// Builds a `MemStorage` pre-seeded under the default storage key.
    pub struct StorageFixture {
        pub storage: MemStorage,
        notes: Vec<Note>,
    }

    impl Default for StorageFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StorageFixture {
        pub fn new() -> Self {
            Self {
                storage: MemStorage::new(),
                notes: Vec::new(),
            }
        }

        /// Add a note with a fixed id and timestamp.
        pub fn with_note(mut self, id: &str, title: &str, body: &str, updated: i64) -> Self {
            self.notes.push(Note {
                id: NoteId::from(id),
                title: title.to_string(),
                body: body.to_string(),
                updated,
            });
            self.flush();
            self
        }

        /// Store a raw, possibly malformed, value under the default key.
        pub fn with_raw(self, value: &str) -> Self {
            self.storage
                .set_item(&NotesConfig::default().storage_key, value)
                .unwrap();
            self
        }

        pub fn build(self) -> MemStorage {
            self.storage
        }

        fn flush(&self) {
            let json = serde_json::to_string(&self.notes).unwrap();
            self.storage
                .set_item(&NotesConfig::default().storage_key, &json)
                .unwrap();
        }
    }
}
