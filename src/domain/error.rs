//! Error types for the Actionboard plugin.
//!
//! This module defines the centralized error type [`ActionboardError`] and a type
//! alias [`Result`] used throughout the crate. All variants are implemented with
//! `thiserror`; wrapped library errors convert automatically via `#[from]`.
//!
//! The error taxonomy visible to the operator is deliberately small. "Nothing to
//! export" is a warning toast, not an error, and a failed CSV download is only
//! logged. [`ActionboardError::NotFound`] is the one variant the navigation layer
//! turns into a user-facing screen.
//!
//! # Examples
//!
//! ```
//! use actionboard::domain::ActionboardError;
//!
//! fn lookup(id: &str) -> Result<(), ActionboardError> {
//!     Err(ActionboardError::NotFound(id.to_string()))
//! }
//!
//! assert!(lookup("99").is_err());
//! ```

use thiserror::Error;

/// The main error type for Actionboard operations.
#[derive(Debug, Error)]
pub enum ActionboardError {
    /// Reading or writing the key-value state file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A localization dictionary is malformed or incomplete.
    ///
    /// Raised at load time, for example when an action type has no label.
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// The embedded action dataset violates a record invariant.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// No action record exists for the requested identifier.
    #[error("Action not found: {0}")]
    NotFound(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Actionboard operations.
pub type Result<T> = std::result::Result<T, ActionboardError>;
