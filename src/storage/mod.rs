//! Storage layer: the static record store and the client-local key-value store.
//!
//! # Modules
//!
//! - `dataset`: embedded corporate action dataset with load-time validation
//! - `backend`: key-value store trait
//! - `json`: JSON file key-value store with atomic writes
//! - `memory`: in-memory key-value store

pub mod backend;
pub mod dataset;
pub mod json;
pub mod memory;

pub use backend::{KvStore, INSTRUCTIONS_SHOWN_KEY};
pub use dataset::{RecordScope, RecordStore};
pub use json::JsonKvStore;
pub use memory::MemoryKvStore;
