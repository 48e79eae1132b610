//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) only mutates [`AppState`](crate::app::AppState);
//! anything that talks to Zellij or the worker is returned as an [`Action`] and
//! executed by the plugin shim.

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a request to the background worker.
    PostToWorker(WorkerMessage),

    /// Schedules a `Timer` event after the given number of seconds.
    SetTimeout(u64),
}
