use reqwest::Client;
use strum::IntoEnumIterator;
use voxgate_config::ProvidersConfig;

use crate::{
    error::{ProviderError, Result},
    provider::{
        ProviderAdapter, claude::ClaudeAdapter, did::DidAdapter, elevenlabs::ElevenLabsAdapter, gemini::GeminiAdapter,
        openai::OpenAiAdapter,
    },
    types::ProviderId,
};

/// Fixed set of provider adapters, one per [`ProviderId`]
pub struct ProviderRegistry {
    adapters: Vec<Box<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Build every adapter, sharing one HTTP client
    ///
    /// Providers without a key are still registered so callers get a
    /// configuration error instead of a missing route.
    pub fn from_config(config: &ProvidersConfig, client: Client) -> Self {
        let adapters = ProviderId::iter()
            .map(|id| -> Box<dyn ProviderAdapter> {
                match id {
                    ProviderId::Openai => Box::new(OpenAiAdapter::new(client.clone(), &config.openai)),
                    ProviderId::Claude => Box::new(ClaudeAdapter::new(client.clone(), &config.claude)),
                    ProviderId::Gemini => Box::new(GeminiAdapter::new(client.clone(), &config.gemini)),
                    ProviderId::Elevenlabs => Box::new(ElevenLabsAdapter::new(client.clone(), &config.elevenlabs)),
                    ProviderId::Did => Box::new(DidAdapter::new(client.clone(), &config.did)),
                }
            })
            .collect::<Vec<_>>();

        for adapter in &adapters {
            tracing::debug!(
                provider = %adapter.id(),
                configured = adapter.credential().is_some(),
                "registered provider adapter"
            );
        }

        Self { adapters }
    }

    /// Resolve a route segment to its adapter
    pub fn resolve(&self, name: &str) -> Result<&dyn ProviderAdapter> {
        let id = name
            .parse::<ProviderId>()
            .map_err(|_| ProviderError::UnknownProvider(name.to_string()))?;

        self.get(id).ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))
    }

    /// Adapter for a known provider
    pub fn get(&self, id: ProviderId) -> Option<&dyn ProviderAdapter> {
        self.adapters.iter().find(|adapter| adapter.id() == id).map(AsRef::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ProviderAdapter> {
        self.adapters.iter().map(AsRef::as_ref)
    }
}
