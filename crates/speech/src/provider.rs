pub mod claude;
pub mod did;
pub mod elevenlabs;
pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use futures::TryStreamExt;
use http::HeaderValue;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use voxgate_config::ProviderConfig;

use crate::{
    error::{ProviderError, Result},
    types::{DEFAULT_AUDIO_MEDIA_TYPE, GenerationRequest, NormalizedResult, ProviderId, ResponseKind},
};

/// Adapter translating the normalized contract to one upstream provider
///
/// Implementations only describe the upstream call; gating, error mapping,
/// and response normalization are shared by [`ProviderAdapter::synthesize`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider this adapter serves
    fn id(&self) -> ProviderId;

    /// Shape of a successful upstream response
    fn response_kind(&self) -> ResponseKind {
        ResponseKind::Audio
    }

    /// Suggested voices, the first being the default
    fn voices(&self) -> &'static [&'static str];

    /// Voice used when the caller names none
    fn default_voice(&self) -> &'static str {
        self.voices().first().copied().unwrap_or_default()
    }

    /// Configured API key
    fn credential(&self) -> Option<&SecretString>;

    /// Build the upstream call for `request`, authenticated with `credential`
    fn upstream_request(&self, request: &GenerationRequest, credential: &SecretString) -> RequestBuilder;

    /// Call the upstream once and normalize its answer
    ///
    /// An absent or empty credential fails before any network traffic.
    async fn synthesize(
        &self,
        request: &GenerationRequest,
        credential: Option<&SecretString>,
    ) -> Result<NormalizedResult> {
        let provider = self.id();

        let Some(credential) = credential.filter(|key| !key.expose_secret().is_empty()) else {
            tracing::warn!(%provider, "API key not configured, rejecting request");
            return Err(ProviderError::NotConfigured(provider));
        };

        tracing::debug!(
            %provider,
            voice = request.voice(),
            input_len = request.text().len(),
            "sending upstream request"
        );

        // Request URLs can carry the credential (Gemini), so they are stripped from errors
        let response = self
            .upstream_request(request, credential)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!(%provider, error = %e, "upstream request failed");
                ProviderError::transport(provider, &e)
            })?;

        normalize(provider, self.response_kind(), response).await
    }
}

/// Turn an upstream response into a normalized result or error
async fn normalize(provider: ProviderId, kind: ResponseKind, response: reqwest::Response) -> Result<NormalizedResult> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(provider, &e.without_url()))?;

        tracing::error!(%provider, %status, "upstream provider returned an error");

        return Err(ProviderError::upstream(provider, status.as_u16(), body));
    }

    match kind {
        ResponseKind::Audio => {
            // Relayed byte for byte, even when not visible ASCII
            let media_type = response
                .headers()
                .get(http::header::CONTENT_TYPE)
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_AUDIO_MEDIA_TYPE));

            tracing::debug!(%provider, ?media_type, "relaying upstream audio");

            let stream = response.bytes_stream().map_err(move |e| {
                tracing::error!(%provider, error = %e, "upstream audio stream interrupted");
                std::io::Error::other(e.without_url())
            });

            Ok(NormalizedResult::Audio {
                media_type,
                stream: Box::pin(stream),
            })
        }
        ResponseKind::Job => {
            let payload = response.json::<serde_json::Value>().await.map_err(|e| {
                let e = e.without_url();
                tracing::error!(%provider, error = %e, "failed to parse upstream job descriptor");
                ProviderError::transport(provider, &e)
            })?;

            tracing::debug!(%provider, "relaying upstream job descriptor");

            Ok(NormalizedResult::Job { payload })
        }
    }
}

/// Configured base URL, or `default`, without a trailing slash
fn base_url(config: &ProviderConfig, default: &str) -> String {
    config
        .base_url
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}
