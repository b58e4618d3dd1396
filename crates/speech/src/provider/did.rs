use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use voxgate_config::ProviderConfig;

use super::ProviderAdapter;
use crate::types::{GenerationRequest, ProviderId, ResponseKind};

const DEFAULT_DID_API_URL: &str = "https://api.d-id.com";

/// Presenter image animated by every talk
const DEFAULT_PRESENTER_URL: &str = "https://create-images-results.d-id.com/default-presenter.jpg";

/// Speech engine D-ID uses to voice the script
const DID_VOICE_PROVIDER: &str = "microsoft";

const VOICES: &[&str] = &["en-US-JennyNeural"];

/// D-ID talking-head adapter
///
/// Video is rendered asynchronously, so a successful call yields the
/// upstream job descriptor rather than media.
pub(crate) struct DidAdapter {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl DidAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: super::base_url(config, DEFAULT_DID_API_URL),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Serialize)]
struct TalkRequest<'a> {
    script: Script<'a>,
    source_url: &'a str,
}

#[derive(Serialize)]
struct Script<'a> {
    r#type: &'a str,
    input: &'a str,
    provider: VoiceProvider<'a>,
}

#[derive(Serialize)]
struct VoiceProvider<'a> {
    r#type: &'a str,
    voice_id: &'a str,
}

#[async_trait]
impl ProviderAdapter for DidAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Did
    }

    fn response_kind(&self) -> ResponseKind {
        ResponseKind::Job
    }

    fn voices(&self) -> &'static [&'static str] {
        VOICES
    }

    fn credential(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn upstream_request(&self, request: &GenerationRequest, credential: &SecretString) -> RequestBuilder {
        let body = TalkRequest {
            script: Script {
                r#type: "text",
                input: request.text(),
                provider: VoiceProvider {
                    r#type: DID_VOICE_PROVIDER,
                    voice_id: request.voice(),
                },
            },
            source_url: DEFAULT_PRESENTER_URL,
        };

        self.client
            .post(format!("{}/talks", self.base_url))
            .bearer_auth(credential.expose_secret())
            .json(&body)
    }
}
