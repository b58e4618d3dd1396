use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use voxgate_config::ProviderConfig;

use super::ProviderAdapter;
use crate::types::{GenerationRequest, ProviderId};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Speech model used for every request
const OPENAI_TTS_MODEL: &str = "gpt-4o-mini-tts";

const VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

/// `OpenAI` speech adapter
pub(crate) struct OpenAiAdapter {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl OpenAiAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: super::base_url(config, DEFAULT_OPENAI_API_URL),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(serde::Serialize)]
struct OpenAiSpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Openai
    }

    fn voices(&self) -> &'static [&'static str] {
        VOICES
    }

    fn credential(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn upstream_request(&self, request: &GenerationRequest, credential: &SecretString) -> RequestBuilder {
        let body = OpenAiSpeechRequest {
            model: OPENAI_TTS_MODEL,
            input: request.text(),
            voice: request.voice(),
        };

        self.client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(credential.expose_secret())
            .json(&body)
    }
}
