//! Key-value storage for client state.
//!
//! Mirrors the browser's `localStorage`: string keys, string values, and
//! last-writer-wins semantics for a single slot.

mod file;
mod memory;

pub use file::{default_storage_path, FileStore};
pub use memory::MemoryStore;

use crate::error::Result;

/// Persistent string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
