//! Persistent key/value storage for the theme preference.
//!
//! - [`PreferenceStore`]: The storage seam used by the controller
//! - [`MemoryStore`]: Process-local storage
//! - [`FileStore`]: A JSON file surviving restarts
//! - [`StoreError`]: Errors from fallible backends

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// The default key the preference is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Origin-scoped string key/value storage.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
