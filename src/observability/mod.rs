//! OpenTelemetry tracing with file export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonFileExporter → rotating JSON file
//! ```
//!
//! Spans land in `~/.local/share/zellij/actionboard/actionboard-otlp.json`,
//! one OTLP JSON document per line. The file rotates at 10 MB and keeps three
//! backups. The level comes from the `trace_level` plugin option and defaults
//! to `info`.
//!
//! The plugin and its worker run in separate WASM instances. Requests carry a
//! [`TraceContext`](crate::worker::TraceContext) so worker spans join the trace
//! of the key press that caused them.
//!
//! - [`init`]: subscriber setup
//! - `exporter`: the span exporter and tracer provider
//! - `otlp`: OTLP JSON encoding
//! - `rotating`: size-rotated file

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE};
