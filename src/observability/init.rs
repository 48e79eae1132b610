//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "Actionboard";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE: &str = "actionboard-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` feeding an OpenTelemetry layer that writes to
/// `~/.local/share/zellij/actionboard/actionboard-otlp.json`.
///
/// Tracing is optional. If the data directory cannot be created the plugin
/// runs without it. An unparsable level falls back to `info`. Only the first
/// call in a process installs anything.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level, "tracing initialized");
    }
}
