#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod gateway;
mod http_client;
mod provider;
mod registry;
mod request;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    response::Response,
    routing::{any, get},
};
use http::{HeaderMap, Method};

pub use error::{ProviderError, Result};
pub use gateway::{Gateway, GatewayBuilder};
pub use provider::ProviderAdapter;
pub use registry::ProviderRegistry;
pub use request::{BODY_LIMIT_BYTES, PROVIDER_API_KEY_HEADER};
pub use types::{
    AudioStream, DEFAULT_AUDIO_MEDIA_TYPE, GenerationRequest, NormalizedResult, ProviderId, ProviderInfo, ResponseKind,
    SpeechPayload,
};

/// Build the generation gateway from configuration
pub fn build_gateway(config: &voxgate_config::Config) -> anyhow::Result<Arc<Gateway>> {
    let gateway = GatewayBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize generation gateway: {e}"))?;

    Ok(Arc::new(gateway))
}

/// Create the endpoint router for generation and the provider catalog
pub fn endpoint_router() -> Router<Arc<Gateway>> {
    Router::new()
        .route("/api/{provider}", any(generate))
        .route("/providers", get(list_providers))
}

/// Handle generation requests for any method; non-POST is rejected by the gateway
async fn generate(
    State(gateway): State<Arc<Gateway>>,
    Path(provider): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    tracing::debug!(%provider, %method, "generation handler called");

    gateway.handle(&provider, &method, &headers, body).await
}

/// List every provider with its voices and configuration state
async fn list_providers(State(gateway): State<Arc<Gateway>>) -> Json<Vec<ProviderInfo>> {
    Json(gateway.catalog())
}
