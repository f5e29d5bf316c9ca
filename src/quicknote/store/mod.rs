//! # Storage Layer
//!
//! quicknote persists the whole note collection as one serialized entry in a
//! key/value store, the same model as a browser's `localStorage`. The
//! [`Storage`] trait is that key/value store; [`persistence::Persistence`]
//! sits on top of it and knows about notes.
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: Production file-based storage
//!   - One file per key: `{key}.json` under a root directory
//!   - Writes are atomic (temp file, then rename)
//!
//! - [`memory::MemStorage`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! ```text
//! <root>/
//! ├── notes-v1.json   # JSON array of {id, title, body, updated}
//! └── config.json     # NotesConfig
//! ```
//!
//! There is no schema version. A value that does not parse is treated as
//! "no data" by the persistence layer.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod persistence;

/// Abstract interface for raw key/value storage.
///
/// All methods take `&self`; in-memory implementations use interior
/// mutability since quicknote is single-threaded.
pub trait Storage {
    /// Read the value stored under `key`, `Ok(None)` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
