use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use voxgate_config::ProviderConfig;

use super::ProviderAdapter;
use crate::types::{GenerationRequest, ProviderId};

const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// Model used for every request
const ELEVENLABS_MODEL_ID: &str = "eleven_monolingual_v1";

/// Premade voices addressable by name; anything else is sent as a raw voice ID
const NAMED_VOICES: [(&str, &str); 6] = [
    ("Rachel", "21m00Tcm4TlvDq8ikWAM"),
    ("Drew", "29vD33N1CtxCmqQRPOHJ"),
    ("Clyde", "2EiwWnXFnvU5JabPnv8n"),
    ("Paul", "5Q0t7uMcjvnagumLfvZi"),
    ("Domi", "AZnzlk1XvdvUeBnXmlld"),
    ("Dave", "CYw3kZ02Hs0563khs1Fj"),
];

const VOICES: &[&str] = &["Rachel", "Drew", "Clyde", "Paul", "Domi", "Dave"];

/// `ElevenLabs` speech adapter
pub(crate) struct ElevenLabsAdapter {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl ElevenLabsAdapter {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: super::base_url(config, DEFAULT_ELEVENLABS_API_URL),
            api_key: config.api_key.clone(),
        }
    }

    /// Voice ID is appended as one percent-encoded path segment
    fn endpoint(&self, voice: &str) -> String {
        // An unparseable base URL is left for reqwest to reject on send
        let Ok(mut url) = Url::parse(&self.base_url) else {
            return self.base_url.clone();
        };

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("text-to-speech").push(voice_id(voice));
        }

        url.into()
    }
}

/// Resolve a premade voice name to its ID
fn voice_id(voice: &str) -> &str {
    NAMED_VOICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(voice))
        .map_or(voice, |(_, id)| id)
}

#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[async_trait]
impl ProviderAdapter for ElevenLabsAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Elevenlabs
    }

    fn voices(&self) -> &'static [&'static str] {
        VOICES
    }

    fn credential(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn upstream_request(&self, request: &GenerationRequest, credential: &SecretString) -> RequestBuilder {
        self.client
            .post(self.endpoint(request.voice()))
            .header("xi-api-key", credential.expose_secret())
            .json(&ElevenLabsRequest {
                text: request.text(),
                model_id: ELEVENLABS_MODEL_ID,
            })
    }
}
