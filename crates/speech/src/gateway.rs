use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, Method};
use secrecy::ExposeSecret;

use crate::{
    error::{ProviderError, Result},
    http_client::http_client,
    registry::ProviderRegistry,
    request::{client_key, read_payload},
    types::{GenerationRequest, NormalizedResult, ProviderInfo},
};

/// Single entry point routing generation requests to provider adapters
pub struct Gateway {
    registry: ProviderRegistry,
    allow_client_keys: bool,
}

impl Gateway {
    /// Handle one inbound generation request
    ///
    /// Always produces exactly one response: the normalized result on
    /// success, otherwise the error's status and text.
    pub async fn handle(&self, provider: &str, method: &Method, headers: &HeaderMap, body: Body) -> Response {
        match self.dispatch(provider, method, headers, body).await {
            Ok(result) => {
                tracing::debug!(provider, "generation request succeeded");
                result.into_response()
            }
            Err(err) => {
                let status = err.status_code();

                if status.is_server_error() {
                    tracing::error!(provider, %status, error_type = err.kind(), error = %err, "generation request failed");
                } else {
                    tracing::debug!(provider, %status, error_type = err.kind(), error = %err, "generation request rejected");
                }

                err.into_response()
            }
        }
    }

    async fn dispatch(
        &self,
        provider: &str,
        method: &Method,
        headers: &HeaderMap,
        body: Body,
    ) -> Result<NormalizedResult> {
        if method != Method::POST {
            return Err(ProviderError::MethodNotAllowed);
        }

        let payload = read_payload(body).await?;
        let adapter = self.registry.resolve(provider)?;
        let request = GenerationRequest::from_payload(adapter.id(), payload, adapter.default_voice())?;

        let client_key = self.allow_client_keys.then(|| client_key(headers)).flatten();

        if client_key.is_some() {
            tracing::debug!(provider = %adapter.id(), "using caller-supplied API key");
        }

        adapter
            .synthesize(&request, client_key.as_ref().or_else(|| adapter.credential()))
            .await
    }

    /// Catalog of every registered provider
    pub fn catalog(&self) -> Vec<ProviderInfo> {
        self.registry
            .iter()
            .map(|adapter| ProviderInfo {
                id: adapter.id(),
                name: adapter.id().display_name(),
                kind: adapter.response_kind(),
                voices: adapter.voices(),
                default_voice: adapter.default_voice(),
                configured: adapter.credential().is_some_and(|key| !key.expose_secret().is_empty()),
            })
            .collect()
    }
}

/// Builder for constructing the gateway from configuration
pub struct GatewayBuilder<'a> {
    config: &'a voxgate_config::Config,
}

impl<'a> GatewayBuilder<'a> {
    pub const fn new(config: &'a voxgate_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> anyhow::Result<Gateway> {
        let providers = &self.config.providers;

        let client = http_client(providers.timeout()?)
            .map_err(|e| anyhow::anyhow!("Failed to build upstream HTTP client: {e}"))?;

        let registry = ProviderRegistry::from_config(providers, client);

        let configured = providers.entries().iter().filter(|(_, p)| p.has_api_key()).count();
        tracing::debug!(configured, allow_client_keys = providers.allow_client_keys, "gateway initialized");

        Ok(Gateway {
            registry,
            allow_client_keys: providers.allow_client_keys,
        })
    }
}
