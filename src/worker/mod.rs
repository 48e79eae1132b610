//! Background worker for everything that touches data or the filesystem.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation and message dispatch

pub mod handler;
pub mod messages;

pub use handler::{ActionboardWorker, NEW_TAG_COUNT};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
