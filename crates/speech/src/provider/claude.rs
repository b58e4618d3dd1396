use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use voxgate_config::ProviderConfig;

use super::ProviderAdapter;
use crate::types::{GenerationRequest, ProviderId};

const DEFAULT_CLAUDE_API_URL: &str = "https://api.anthropic.com/v1";

const VOICES: &[&str] = &["female_1", "male_1"];

/// Claude speech adapter
pub(crate) struct ClaudeAdapter {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl ClaudeAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: super::base_url(config, DEFAULT_CLAUDE_API_URL),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(serde::Serialize)]
struct ClaudeSpeechRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

#[async_trait]
impl ProviderAdapter for ClaudeAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    fn voices(&self) -> &'static [&'static str] {
        VOICES
    }

    fn credential(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn upstream_request(&self, request: &GenerationRequest, credential: &SecretString) -> RequestBuilder {
        self.client
            .post(format!("{}/audio/speech", self.base_url))
            .header("x-api-key", credential.expose_secret())
            .json(&ClaudeSpeechRequest {
                text: request.text(),
                voice: request.voice(),
            })
    }
}
