//! String-keyed local storage.
//!
//! Values are already-serialized strings, so the store never needs to know
//! what a palette or a gallery looks like.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use anyhow::Result;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes through immediately; there is no buffering.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    fn keys(&self) -> Vec<String>;
}
