use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use voxgate_config::ProviderConfig;

use super::ProviderAdapter;
use crate::types::{GenerationRequest, ProviderId};

const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1";

const VOICES: &[&str] = &["gemini_voice_1"];

/// Gemini speech adapter
///
/// Authenticates with the `key` query parameter instead of a header.
pub(crate) struct GeminiAdapter {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl GeminiAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: super::base_url(config, DEFAULT_GEMINI_API_URL),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiSpeechRequest<'a> {
    input: GeminiInput<'a>,
    voice: GeminiVoice<'a>,
    audio_config: GeminiAudioConfig,
}

#[derive(Serialize)]
struct GeminiInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiVoice<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiAudioConfig {
    audio_encoding: &'static str,
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn voices(&self) -> &'static [&'static str] {
        VOICES
    }

    fn credential(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn upstream_request(&self, request: &GenerationRequest, credential: &SecretString) -> RequestBuilder {
        let body = GeminiSpeechRequest {
            input: GeminiInput { text: request.text() },
            voice: GeminiVoice { name: request.voice() },
            audio_config: GeminiAudioConfig { audio_encoding: "MP3" },
        };

        self.client
            .post(format!("{}/audio/speech", self.base_url))
            .query(&[("key", credential.expose_secret())])
            .json(&body)
    }
}
