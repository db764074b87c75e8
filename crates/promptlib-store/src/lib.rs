//! # promptlib-store
//!
//! The user's saved prompts, persisted to a single key-value slot.
//!
//! ## Overview
//!
//! [`SavedPromptStore`] keeps the collection in memory (most recent first)
//! and rewrites the whole slot after every change. Nothing here returns an
//! error for a failed write: the in-memory change stands and the failure is
//! reported in [`Persisted::write`] and logged.
//!
//! ## Key Types
//!
//! - [`SavedPromptStore`] - CRUD, search, import/export
//! - [`KeyValueStorage`] - Backend seam ([`MemoryStorage`], [`FileStorage`])
//! - [`Persisted`] - Operation value plus write outcome
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptlib_store::{FileStorage, NewSavedPrompt, SavedPromptStore};
//!
//! let mut store = SavedPromptStore::open(FileStorage::open_default());
//! let saved = store.add(NewSavedPrompt::new("Cat poster", "a cat")).into_value();
//! assert_eq!(store.search("cat")[0].id, saved.id);
//! ```

mod error;
mod storage;
mod store;
mod types;

pub use error::StoreError;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{Persisted, SavedPromptStore, STORAGE_KEY};
pub use types::{NewSavedPrompt, SavedPrompt, SavedPromptUpdate};
