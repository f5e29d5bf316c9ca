//! # quicknote Architecture
//!
//! quicknote is the **state and persistence layer** of a small note-taking app.
//! It has no UI: a view layer (web, TUI, GUI) renders from its queries and
//! dispatches user intents to it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View Layer (not part of this crate)                        │
//! │  - Renders list, selection, draft, validation errors        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - NotesApp: one method per user intent and per query       │
//! │  - Keeps the auto-select invariant after every intent       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State (notes.rs, selection.rs, editor.rs)                  │
//! │  - NoteStore owns the collection                            │
//! │  - Selection tracks the open note and the search query      │
//! │  - Editor holds the detached draft                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Persistence: whole collection as one JSON entry          │
//! │  - Storage trait: FileStorage (production), MemStorage      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! Everything is synchronous and single-threaded. Each intent runs to
//! completion, including its storage write, before the next one starts.
//!
//! ## Errors
//!
//! The only error a user should ever see is a [`error::ValidationError`]
//! from committing a draft with a bad title. Storage read failures load as
//! an empty collection and write failures are logged; neither is surfaced.
//!
//! ## Example
//!
//! ```
//! use quicknote::api::NotesApp;
//! use quicknote::config::NotesConfig;
//! use quicknote::editor::FieldEdit;
//! use quicknote::store::memory::MemStorage;
//!
//! let mut app = NotesApp::open(MemStorage::new(), NotesConfig::default());
//! app.create();
//! app.update_field(FieldEdit::Title("Groceries".into()));
//! app.update_field(FieldEdit::Body("milk, eggs".into()));
//! let saved = app.commit().unwrap();
//!
//! assert_eq!(app.selected_id(), Some(&saved.id));
//! assert_eq!(app.list()[0].title, "Groceries");
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all intents and queries
//! - [`notes`]: The note collection and its mutations
//! - [`selection`]: Selection, search query, filtered view
//! - [`editor`]: Draft editing
//! - [`store`]: Storage abstraction, implementations and persistence
//! - [`model`]: Core data types (`Note`, `NoteId`)
//! - [`config`]: Configuration management
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod model;
pub mod notes;
pub mod selection;
pub mod store;
