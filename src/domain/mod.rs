//! Domain layer for the Actionboard plugin.
//!
//! Core types independent of Zellij APIs, storage and rendering.
//!
//! - [`error`]: Error types and result alias
//! - [`action`]: Corporate action records, types and processing status
//! - [`holding`]: Client holdings listed on the detail screen

pub mod action;
pub mod error;
pub mod holding;

pub use action::{ActionRecord, ActionType, CompletionInfo, ProcessingStatus};
pub use error::{ActionboardError, Result};
pub use holding::ClientHolding;
