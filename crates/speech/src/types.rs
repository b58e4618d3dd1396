use std::{fmt, pin::Pin};

use axum::{
    Json,
    body::Body,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures::Stream;
use http::{HeaderValue, header};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// Media type used when an audio upstream does not declare one
pub const DEFAULT_AUDIO_MEDIA_TYPE: &str = "audio/mpeg";

/// Identifier of a supported upstream provider
///
/// Parsing is case-insensitive, so `/api/OpenAI` and `/api/openai` resolve
/// to the same adapter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderId {
    Openai,
    Claude,
    Gemini,
    Elevenlabs,
    Did,
}

impl ProviderId {
    /// Human-readable provider name used in messages
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Openai => "OpenAI",
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::Elevenlabs => "ElevenLabs",
            Self::Did => "D-ID",
        }
    }
}

/// How a provider's successful response is relayed to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Binary media stream
    Audio,
    /// JSON job descriptor for asynchronous work
    Job,
}

/// Inbound request body
#[derive(Debug, Deserialize)]
pub struct SpeechPayload {
    /// Text to synthesize
    pub text: String,
    /// Provider-specific voice identifier; the provider default when absent
    #[serde(default)]
    pub voice: Option<String>,
}

/// Provider-agnostic generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    provider: ProviderId,
    text: String,
    voice: String,
}

impl GenerationRequest {
    /// Create a request, rejecting empty text
    pub fn new(provider: ProviderId, text: impl Into<String>, voice: impl Into<String>) -> Result<Self> {
        let text = text.into();

        if text.is_empty() {
            return Err(ProviderError::InvalidRequest("text must not be empty".to_string()));
        }

        Ok(Self {
            provider,
            text,
            voice: voice.into(),
        })
    }

    /// Build a request from an inbound payload, falling back to `default_voice`
    pub(crate) fn from_payload(provider: ProviderId, payload: SpeechPayload, default_voice: &str) -> Result<Self> {
        let voice = payload
            .voice
            .filter(|voice| !voice.trim().is_empty())
            .unwrap_or_else(|| default_voice.to_string());

        Self::new(provider, payload.text, voice)
    }

    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }
}

/// Byte stream relayed from an audio upstream
pub type AudioStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Uniform success representation of a dispatch
pub enum NormalizedResult {
    /// Raw media bytes, relayed unmodified as they arrive
    Audio { media_type: HeaderValue, stream: AudioStream },
    /// Upstream job descriptor, relayed unmodified
    Job { payload: serde_json::Value },
}

impl fmt::Debug for NormalizedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio { media_type, .. } => f.debug_struct("Audio").field("media_type", media_type).finish_non_exhaustive(),
            Self::Job { payload } => f.debug_struct("Job").field("payload", payload).finish(),
        }
    }
}

impl IntoResponse for NormalizedResult {
    fn into_response(self) -> Response {
        match self {
            Self::Audio { media_type, stream } => {
                ([(header::CONTENT_TYPE, media_type)], Body::from_stream(stream)).into_response()
            }
            Self::Job { payload } => Json(payload).into_response(),
        }
    }
}

/// Catalog entry describing one provider endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub id: ProviderId,
    pub name: &'static str,
    pub kind: ResponseKind,
    pub voices: &'static [&'static str],
    pub default_voice: &'static str,
    /// Whether an API key is configured; the key itself is never exposed
    pub configured: bool,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn provider_ids_parse_case_insensitively() {
        assert_eq!("openai".parse::<ProviderId>().unwrap(), ProviderId::Openai);
        assert_eq!("ElevenLabs".parse::<ProviderId>().unwrap(), ProviderId::Elevenlabs);
        assert_eq!("DID".parse::<ProviderId>().unwrap(), ProviderId::Did);
        assert!("azure".parse::<ProviderId>().is_err());
    }

    #[test]
    fn provider_ids_render_as_route_segments() {
        let segments: Vec<String> = ProviderId::iter().map(|id| id.to_string()).collect();
        assert_eq!(segments, ["openai", "claude", "gemini", "elevenlabs", "did"]);
    }

    #[test]
    fn empty_text_is_rejected() {
        let err = GenerationRequest::new(ProviderId::Claude, "", "female_1").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn whitespace_text_is_forwarded_as_is() {
        let request = GenerationRequest::new(ProviderId::Claude, "  \n", "female_1").unwrap();
        assert_eq!(request.text(), "  \n");
    }

    #[test]
    fn audio_result_keeps_raw_media_type() {
        let media_type = HeaderValue::from_bytes(b"audio/ogg; title=\xe9").unwrap();
        let result = NormalizedResult::Audio {
            media_type: media_type.clone(),
            stream: Box::pin(futures::stream::empty::<std::io::Result<Bytes>>()),
        };

        let response = result.into_response();

        assert_eq!(response.headers()[header::CONTENT_TYPE].as_bytes(), media_type.as_bytes());
    }

    #[test]
    fn missing_voice_uses_default() {
        let payload = SpeechPayload {
            text: "hello".to_string(),
            voice: None,
        };

        let request = GenerationRequest::from_payload(ProviderId::Openai, payload, "alloy").unwrap();

        assert_eq!(request.voice(), "alloy");
        assert_eq!(request.text(), "hello");
        assert_eq!(request.provider(), ProviderId::Openai);
    }

    #[test]
    fn explicit_voice_is_kept() {
        let payload: SpeechPayload = serde_json::from_str(r#"{"text":"hi","voice":"echo"}"#).unwrap();

        let request = GenerationRequest::from_payload(ProviderId::Openai, payload, "alloy").unwrap();

        assert_eq!(request.voice(), "echo");
    }

    #[test]
    fn payload_without_text_fails_to_parse() {
        assert!(serde_json::from_str::<SpeechPayload>(r#"{"voice":"echo"}"#).is_err());
    }
}
