//! Span exporter that appends OTLP JSON lines to a rotating file.
//!
//! Zellij plugins run in a WASI sandbox without network access, so spans go to
//! disk instead of a collector. Each export call writes one line holding a
//! complete OTLP document.

use super::otlp;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

#[derive(Debug)]
struct JsonFileExporter {
    file: RotatingFile,
    resource: Resource,
    scope: &'static str,
    stopped: bool,
}

impl SpanExporter for JsonFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("trace exporter already shut down"))
        } else {
            let document = otlp::encode_batch(&self.resource, self.scope, &batch);
            self.file
                .append_line(&document.to_string())
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports every finished span to `path` immediately.
pub fn file_tracer_provider(path: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = JsonFileExporter {
        file: RotatingFile::new(path),
        resource: resource.clone(),
        scope,
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
