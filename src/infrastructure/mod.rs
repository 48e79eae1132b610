//! Infrastructure layer for filesystem and environment interactions.
//!
//! The plugin runs in the Zellij wasm sandbox where the host filesystem is
//! mounted under `/host`; everything that touches real paths goes through here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, state_file_path, strip_host_prefix, HOST_ROOT};
