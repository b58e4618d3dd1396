use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Upstream generation provider configuration
///
/// Every provider has a fixed section. A provider without an API key stays
/// routable but rejects calls until a key is configured.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Upstream request timeout (e.g. "90s"). Unset means no timeout.
    #[serde(default)]
    pub timeout: Option<String>,
    /// Honor caller-supplied `X-Provider-API-Key` headers
    #[serde(default)]
    pub allow_client_keys: bool,
    /// `OpenAI` speech
    #[serde(default)]
    pub openai: ProviderConfig,
    /// Claude speech
    #[serde(default)]
    pub claude: ProviderConfig,
    /// Gemini speech
    #[serde(default)]
    pub gemini: ProviderConfig,
    /// `ElevenLabs` speech
    #[serde(default)]
    pub elevenlabs: ProviderConfig,
    /// D-ID talking-head video
    #[serde(default)]
    pub did: ProviderConfig,
}

/// Configuration for a single upstream provider
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Whether a non-empty API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|key| !key.expose_secret().is_empty())
    }
}

impl ProvidersConfig {
    /// Parsed upstream timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout string is not a valid duration
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|raw| duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid providers.timeout '{raw}': {e}")))
            .transpose()
    }

    /// Provider sections keyed by provider name
    pub fn entries(&self) -> [(&'static str, &ProviderConfig); 5] {
        [
            ("openai", &self.openai),
            ("claude", &self.claude),
            ("gemini", &self.gemini),
            ("elevenlabs", &self.elevenlabs),
            ("did", &self.did),
        ]
    }

    /// Provider sections paired with the environment variable holding each key
    pub(crate) fn credential_slots(&mut self) -> [(&'static str, &mut ProviderConfig); 5] {
        [
            ("OPENAI_API_KEY", &mut self.openai),
            ("CLAUDE_API_KEY", &mut self.claude),
            ("GEMINI_API_KEY", &mut self.gemini),
            ("ELEVENLABS_API_KEY", &mut self.elevenlabs),
            ("DID_API_KEY", &mut self.did),
        ]
    }
}
