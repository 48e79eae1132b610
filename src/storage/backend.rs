//! Key-value storage abstraction.
//!
//! The plugin persists exactly one piece of client-local state: whether the
//! instructions dialog has already been shown. Instead of a process-global, that
//! flag is read and written through the [`KvStore`] trait so the worker can be
//! given a file-backed store and tests an in-memory one.

use crate::domain::error::Result;

/// Key under which the "instructions have been shown" flag is stored.
pub const INSTRUCTIONS_SHOWN_KEY: &str = "instructionsShown";

/// Minimal string key-value store.
///
/// # Implementations
///
/// - [`JsonKvStore`](crate::storage::JsonKvStore): JSON file with atomic writes
/// - [`MemoryKvStore`](crate::storage::MemoryKvStore): process memory only
///
/// # Examples
///
/// ```
/// use actionboard::storage::{KvStore, MemoryKvStore, INSTRUCTIONS_SHOWN_KEY};
///
/// let mut store = MemoryKvStore::default();
/// assert_eq!(store.get(INSTRUCTIONS_SHOWN_KEY)?, None);
/// store.set(INSTRUCTIONS_SHOWN_KEY, "true")?;
/// assert!(store.get_flag(INSTRUCTIONS_SHOWN_KEY)?);
/// # Ok::<(), actionboard::ActionboardError>(())
/// ```
pub trait KvStore: Send {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Reads a boolean flag. Anything other than `"true"` counts as unset.
    ///
    /// # Errors
    ///
    /// Propagates read failures from [`KvStore::get`].
    fn get_flag(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.as_deref() == Some("true"))
    }
}
