#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
mod loader;
pub mod providers;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use providers::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, TelemetryConfig};

/// Top-level voxgate configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream generation providers
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
