//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use voxgate_config::{Config, CorsConfig, ProviderConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and no provider keys
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));

        Self { config }
    }

    /// Point `provider` at `base_url` with the given key
    pub fn with_provider(mut self, provider: &str, base_url: &str, api_key: Option<&str>) -> Self {
        let section = ProviderConfig {
            api_key: api_key.map(|key| SecretString::from(key.to_owned())),
            base_url: Some(base_url.to_owned()),
        };

        match provider {
            "openai" => self.config.providers.openai = section,
            "claude" => self.config.providers.claude = section,
            "gemini" => self.config.providers.gemini = section,
            "elevenlabs" => self.config.providers.elevenlabs = section,
            "did" => self.config.providers.did = section,
            other => panic!("unknown provider {other}"),
        }

        self
    }

    /// Honor caller-supplied provider keys
    pub fn with_client_keys(mut self) -> Self {
        self.config.providers.allow_client_keys = true;
        self
    }

    /// Bound upstream calls
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.config.providers.timeout = Some(timeout.to_owned());
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Serve health on a custom path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
