use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::types::ProviderId;

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Every way a generation request can fail
///
/// Each variant maps to one HTTP status and a plain-text body. Upstream
/// failures keep the provider's own status and body.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no API key
    #[error("{} API key not configured", .0.display_name())]
    NotConfigured(ProviderId),

    /// The provider answered with a non-success status
    #[error("{body}")]
    Upstream { provider: ProviderId, status: u16, body: String },

    /// The call never produced a usable response
    #[error("{message}")]
    Transport { provider: ProviderId, message: String },

    /// The gateway only accepts POST
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The caller sent an unusable body
    #[error("{0}")]
    InvalidRequest(String),

    /// The caller sent more than the body limit
    #[error("Request body is too large, limit is {0} bytes")]
    PayloadTooLarge(usize),

    /// The route names no known provider
    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),
}

impl ProviderError {
    /// Upstream failure, substituting a provider default for an empty body
    pub(crate) fn upstream(provider: ProviderId, status: u16, body: String) -> Self {
        let body = if body.is_empty() {
            format!("{} error", provider.display_name())
        } else {
            body
        };

        Self::Upstream { provider, status, body }
    }

    /// Transport failure carrying the error and its sources as text
    pub(crate) fn transport(provider: ProviderId, error: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();

        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if message.trim().is_empty() {
            message = format!("{} proxy error", provider.display_name());
        }

        Self::Transport { provider, message }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream { status, .. } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Self::NotConfigured(_) | Self::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnknownProvider(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Error category used in logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "configuration_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Transport { .. } => "transport_error",
            Self::MethodNotAllowed | Self::InvalidRequest(_) | Self::PayloadTooLarge(_) | Self::UnknownProvider(_) => {
                "request_error"
            }
        }
    }
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
