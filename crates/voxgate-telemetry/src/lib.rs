//! Telemetry for voxgate
//!
//! Structured logging through `tracing`, with OTLP trace export when an
//! exporter is configured

mod metadata;

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use voxgate_config::{ExportProtocol, ExporterConfig, TelemetryConfig};

/// Guard that flushes and shuts down trace export on drop
///
/// Hold it for the lifetime of the process.
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown tracer provider: {e}");
        }
    }
}

/// Initialize logging and optional trace export
///
/// `log_filter` uses `EnvFilter` syntax (e.g. `info,speech=debug`); an
/// unparsable filter falls back to `info`.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built or a global
/// subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let exporting = config.and_then(|telemetry| telemetry.exporter.as_ref().map(|exporter| (telemetry, exporter)));

    let Some((telemetry_config, exporter_config)) = exporting else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

        return Ok(TelemetryGuard { tracer_provider: None });
    };

    let tracer_provider = init_tracer(telemetry_config, exporter_config)?;
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer_provider.tracer("voxgate"));
    opentelemetry::global::set_tracer_provider(tracer_provider.clone());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(TelemetryGuard {
        tracer_provider: Some(tracer_provider),
    })
}

/// Initialize OTLP trace export
fn init_tracer(config: &TelemetryConfig, exporter_config: &ExporterConfig) -> anyhow::Result<SdkTracerProvider> {
    let exporter = build_span_exporter(exporter_config)?;

    let sampler = if config.sampling_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if config.sampling_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(config.sampling_rate)
    };

    let sampler = if config.parent_based {
        Sampler::ParentBased(Box::new(sampler))
    } else {
        sampler
    };

    Ok(SdkTracerProvider::builder()
        .with_resource(metadata::build_resource(config))
        .with_sampler(sampler)
        .with_batch_exporter(exporter)
        .build())
}

/// Build OTLP span exporter based on protocol
fn build_span_exporter(config: &ExporterConfig) -> anyhow::Result<opentelemetry_otlp::SpanExporter> {
    use opentelemetry_otlp::SpanExporter;

    let exporter = match config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build gRPC span exporter: {e}"))?,
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP span exporter: {e}"))?,
    };

    Ok(exporter)
}
