//! Plugin ⇄ worker protocol.
//!
//! Requests travel as JSON inside a Zellij `PluginMessage`. Every request
//! carries an optional [`TraceContext`] so worker spans join the trace of the
//! UI event that caused them.

use crate::domain::{ActionRecord, ClientHolding};
use crate::engine::Query;
use crate::storage::RecordScope;
use serde::{Deserialize, Serialize};

/// Serialized OpenTelemetry parent for cross-thread span linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Hex trace id, 32 characters.
    pub trace_id: String,
    /// Hex span id of the sending span, 16 characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the active span's context, or `None` when it is not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request in the current trace.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    initialize(Initialize {}),
    run_query(RunQuery { generation: u64, scope: RecordScope, query: Query }),
    lookup_action(LookupAction { id: String }),
    export_csv(ExportCsv { dir: String, filename: String, content: String }),
    mark_instructions_shown(MarkInstructionsShown {}),
}

/// Requests from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Loads the dataset and reads the instructions flag.
    Initialize {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Filters and sorts the records in `scope`.
    ///
    /// The reply carries the whole ordered result; the plugin slices pages
    /// itself so paging never needs a round trip.
    RunQuery {
        /// Echoed back so the plugin can drop superseded results.
        generation: u64,
        scope: RecordScope,
        query: Query,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Resolves one action and its client holdings for the detail screen.
    LookupAction {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Writes already encoded CSV text to `dir/filename`.
    ExportCsv {
        dir: String,
        filename: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persists the "instructions shown" flag.
    MarkInstructionsShown {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Initialize { trace_context }
            | Self::RunQuery { trace_context, .. }
            | Self::LookupAction { trace_context, .. }
            | Self::ExportCsv { trace_context, .. }
            | Self::MarkInstructionsShown { trace_context } => trace_context.as_ref(),
        }
    }

    /// Short variant name for span fields. Payloads can be large.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::RunQuery { .. } => "run_query",
            Self::LookupAction { .. } => "lookup_action",
            Self::ExportCsv { .. } => "export_csv",
            Self::MarkInstructionsShown { .. } => "mark_instructions_shown",
        }
    }
}

/// Replies from the worker to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    Initialized {
        /// Ids of the most recently announced actions, newest first.
        newest_ids: Vec<String>,
        instructions_shown: bool,
    },

    QueryCompleted {
        generation: u64,
        records: Vec<ActionRecord>,
    },

    ActionLoaded {
        record: ActionRecord,
        holdings: Vec<ClientHolding>,
    },

    ActionNotFound {
        id: String,
    },

    ExportFinished {
        filename: String,
        path: String,
    },

    ExportFailed {
        filename: String,
        message: String,
    },

    InstructionsMarked,

    Error {
        message: String,
    },
}
