//! In-memory key-value store, used when the state file cannot be opened and in tests.

use crate::domain::error::Result;
use crate::storage::backend::KvStore;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    values: HashMap<String, String>,
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
