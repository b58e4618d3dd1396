use axum::body::Body;
use http::HeaderMap;
use secrecy::SecretString;

use crate::{
    error::{ProviderError, Result},
    types::SpeechPayload,
};

/// Header carrying a caller-supplied provider key (BYOK)
pub const PROVIDER_API_KEY_HEADER: &str = "X-Provider-API-Key";

/// Body limit for generation requests (1 MiB)
pub const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Read and parse the JSON request body
///
/// The content type is not checked; any body that parses as a payload is
/// accepted.
pub(crate) async fn read_payload(body: Body) -> Result<SpeechPayload> {
    let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
        if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
            ProviderError::PayloadTooLarge(BODY_LIMIT_BYTES)
        } else {
            ProviderError::InvalidRequest(format!("Failed to read request body: {err}"))
        }
    })?;

    serde_json::from_slice(&bytes).map_err(|e| ProviderError::InvalidRequest(format!("Failed to parse request body: {e}")))
}

/// Caller-supplied provider key, if present and non-empty
pub(crate) fn client_key(headers: &HeaderMap) -> Option<SecretString> {
    headers
        .get(PROVIDER_API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| SecretString::from(value.to_string()))
}
