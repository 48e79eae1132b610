//! Worker thread owning the dataset and all filesystem access.
//!
//! Query execution, CSV file writes and the key-value flag all run here so the
//! render loop never blocks on I/O. The dataset and the key-value store are
//! initialized lazily on the first message.

use crate::domain::error::{ActionboardError, Result};
use crate::engine;
use crate::engine::Query;
use crate::export;
use crate::infrastructure::paths;
use crate::storage::{
    JsonKvStore, KvStore, MemoryKvStore, RecordScope, RecordStore, INSTRUCTIONS_SHOWN_KEY,
};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Number of most recent announcements tagged "New".
pub const NEW_TAG_COUNT: usize = 3;

/// Worker state, created by Zellij through `Default`.
#[derive(Serialize, Deserialize, Default)]
pub struct ActionboardWorker {
    #[serde(skip)]
    records: Option<RecordStore>,

    #[serde(skip)]
    kv: Option<Box<dyn KvStore>>,
}

impl ActionboardWorker {
    /// Builds a worker over explicit stores, bypassing lazy initialization.
    #[must_use]
    pub fn with_stores(records: RecordStore, kv: Box<dyn KvStore>) -> Self {
        Self {
            records: Some(records),
            kv: Some(kv),
        }
    }

    /// Loads the embedded dataset and opens the state file if not done yet.
    ///
    /// An unusable state file degrades to an in-memory store; the only cost is
    /// that the instructions dialog shows again next session.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded dataset fails validation.
    fn ensure_initialized(&mut self) -> Result<()> {
        if self.records.is_none() {
            self.records = Some(RecordStore::embedded()?);
        }

        if self.kv.is_none() {
            let kv: Box<dyn KvStore> = match JsonKvStore::new(paths::state_file_path()) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    tracing::warn!(error = %e, "state file unavailable, keeping flags in memory");
                    Box::new(MemoryKvStore::default())
                }
            };
            self.kv = Some(kv);
        }

        Ok(())
    }

    fn records(&self) -> Result<&RecordStore> {
        self.records
            .as_ref()
            .ok_or_else(|| ActionboardError::Worker("record store not initialized".to_string()))
    }

    fn kv(&mut self) -> Result<&mut Box<dyn KvStore>> {
        self.kv
            .as_mut()
            .ok_or_else(|| ActionboardError::Worker("key-value store not initialized".to_string()))
    }

    /// Logs the outcome of a fallible operation and maps failures to
    /// [`WorkerResponse::Error`].
    fn handle_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => Self::failure(operation, &e),
        }
    }

    fn failure(operation: &str, error: &ActionboardError) -> WorkerResponse {
        tracing::error!(operation = operation, error = %error, "worker operation failed");
        WorkerResponse::Error {
            message: format!("{operation}: {error}"),
        }
    }

    fn handle_initialize(&mut self) -> WorkerResponse {
        let newest_ids = self.records().map(|store| store.newest_ids(NEW_TAG_COUNT));
        let shown = newest_ids.and_then(|ids| {
            let shown = self.kv()?.get_flag(INSTRUCTIONS_SHOWN_KEY)?;
            Ok((ids, shown))
        });

        Self::handle_result("initialize", shown, |(newest_ids, instructions_shown)| {
            tracing::debug!(?newest_ids, instructions_shown, "worker ready");
            WorkerResponse::Initialized {
                newest_ids,
                instructions_shown,
            }
        })
    }

    fn handle_run_query(&self, generation: u64, scope: &RecordScope, query: &Query) -> WorkerResponse {
        let result = self.records().map(|store| {
            let candidates = store.scoped(scope);
            engine::filter_and_sort(&candidates, query)
        });

        Self::handle_result("run query", result, |records| {
            tracing::debug!(generation, result_count = records.len(), "query completed");
            WorkerResponse::QueryCompleted {
                generation,
                records,
            }
        })
    }

    fn handle_lookup_action(&self, id: String) -> WorkerResponse {
        let store = match self.records() {
            Ok(store) => store,
            Err(e) => return Self::failure("lookup action", &e),
        };

        match store.find(&id) {
            Ok(record) => WorkerResponse::ActionLoaded {
                record: record.clone(),
                holdings: store.holdings().to_vec(),
            },
            Err(ActionboardError::NotFound(_)) => {
                tracing::warn!(id = %id, "detail requested for unknown action");
                WorkerResponse::ActionNotFound { id }
            }
            Err(e) => Self::failure("lookup action", &e),
        }
    }

    /// Write failures are reported back but only ever logged by the plugin.
    fn handle_export_csv(dir: &str, filename: String, content: &str) -> WorkerResponse {
        match export::download(Path::new(dir), &filename, content) {
            Ok(path) => WorkerResponse::ExportFinished {
                filename,
                path: paths::strip_host_prefix(&path.to_string_lossy()),
            },
            Err(e) => {
                tracing::error!(dir = %dir, filename = %filename, error = %e, "failed to write export");
                WorkerResponse::ExportFailed {
                    filename,
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_mark_instructions_shown(&mut self) -> WorkerResponse {
        Self::handle_result(
            "mark instructions shown",
            self.kv().and_then(|kv| kv.set(INSTRUCTIONS_SHOWN_KEY, "true")),
            |()| WorkerResponse::InstructionsMarked,
        )
    }

    /// Joins the plugin-side trace carried by `message`, if any.
    ///
    /// The returned guard must live for the duration of the handling span.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Dispatches one request and produces its reply.
    ///
    /// Initializes the stores first when they are not set up yet.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _guard = tracing::debug_span!("worker_handle_message", message_type = message.kind()).entered();

        if let Err(e) = self.ensure_initialized() {
            return Self::failure("initialize stores", &e);
        }

        match message {
            WorkerMessage::Initialize { .. } => self.handle_initialize(),
            WorkerMessage::RunQuery {
                generation,
                scope,
                query,
                ..
            } => self.handle_run_query(generation, &scope, &query),
            WorkerMessage::LookupAction { id, .. } => self.handle_lookup_action(id),
            WorkerMessage::ExportCsv {
                dir,
                filename,
                content,
                ..
            } => Self::handle_export_csv(&dir, filename, &content),
            WorkerMessage::MarkInstructionsShown { .. } => self.handle_mark_instructions_shown(),
        }
    }
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

/// Worker threads get no plugin configuration, so tracing uses the defaults.
fn init_worker_tracing() {
    if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config::default());
    }
}

impl ZellijWorker<'_> for ActionboardWorker {
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::error!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionType, ProcessingStatus};
    use crate::engine::{SortDirection, SortKey, SortSpec};

    fn worker() -> ActionboardWorker {
        ActionboardWorker::with_stores(
            RecordStore::embedded().unwrap(),
            Box::new(MemoryKvStore::default()),
        )
    }

    #[test]
    fn initialize_reports_newest_and_unset_flag() {
        let response = worker().handle_message(WorkerMessage::initialize());
        assert_eq!(
            response,
            WorkerResponse::Initialized {
                newest_ids: vec!["12".to_string(), "11".to_string(), "9".to_string()],
                instructions_shown: false,
            }
        );
    }

    #[test]
    fn instructions_flag_is_written_once_and_read_back() {
        let mut worker = worker();
        assert_eq!(
            worker.handle_message(WorkerMessage::mark_instructions_shown()),
            WorkerResponse::InstructionsMarked
        );

        match worker.handle_message(WorkerMessage::initialize()) {
            WorkerResponse::Initialized {
                instructions_shown, ..
            } => assert!(instructions_shown),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn query_echoes_generation_and_honours_scope() {
        let mut query = Query::default();
        query.sort = Some(SortSpec {
            key: SortKey::EffectiveDate,
            direction: SortDirection::Ascending,
        });
        let scope = RecordScope::Completed {
            types: ActionType::HOLDING.to_vec(),
        };

        match worker().handle_message(WorkerMessage::run_query(9, scope, query)) {
            WorkerResponse::QueryCompleted {
                generation,
                records,
            } => {
                assert_eq!(generation, 9);
                assert!(!records.is_empty());
                assert!(records.iter().all(|r| r.status.is_completed()));
                assert!(records
                    .windows(2)
                    .all(|w| w[0].effective_date <= w[1].effective_date));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn pending_scope_excludes_completed_records() {
        let scope = RecordScope::Pending {
            types: ActionType::ALL.to_vec(),
        };
        match worker().handle_message(WorkerMessage::run_query(1, scope, Query::default())) {
            WorkerResponse::QueryCompleted { records, .. } => {
                assert!(records.iter().all(|r| r.status == ProcessingStatus::Pending));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn lookup_resolves_holdings_or_reports_not_found() {
        let mut worker = worker();
        match worker.handle_message(WorkerMessage::lookup_action("5".to_string())) {
            WorkerResponse::ActionLoaded { record, holdings } => {
                assert_eq!(record.ticker, "FB");
                assert_eq!(holdings.len(), 3);
            }
            other => panic!("unexpected response: {other:?}"),
        }

        assert_eq!(
            worker.handle_message(WorkerMessage::lookup_action("404".to_string())),
            WorkerResponse::ActionNotFound {
                id: "404".to_string()
            }
        );
    }

    #[test]
    fn export_writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let message = WorkerMessage::export_csv(
            dir.path().to_string_lossy().into_owned(),
            "stock_actions_2024-07-01.csv".to_string(),
            "ticker\r\n\"AAPL\"".to_string(),
        );

        match worker().handle_message(message) {
            WorkerResponse::ExportFinished { filename, .. } => {
                assert_eq!(filename, "stock_actions_2024-07-01.csv");
                let written = std::fs::read_to_string(dir.path().join(&filename)).unwrap();
                assert_eq!(written, "ticker\r\n\"AAPL\"");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn export_failure_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let message = WorkerMessage::export_csv(
            blocker.to_string_lossy().into_owned(),
            "out.csv".to_string(),
            "a".to_string(),
        );
        assert!(matches!(
            worker().handle_message(message),
            WorkerResponse::ExportFailed { .. }
        ));
    }
}
