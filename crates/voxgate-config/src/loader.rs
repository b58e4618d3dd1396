use std::path::Path;

use secrecy::SecretString;
use url::Url;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, fills missing
    /// provider keys from the process environment, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.apply_env_credentials();
        config.validate()?;

        Ok(config)
    }

    /// Build a configuration from defaults and environment credentials only
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        config.apply_env_credentials();
        config.validate()?;

        Ok(config)
    }

    /// Fill providers that have no key from their well-known environment variable
    ///
    /// A key set in the file always wins over the environment.
    pub fn apply_env_credentials(&mut self) {
        for (var_name, provider) in self.providers.credential_slots() {
            if provider.has_api_key() {
                continue;
            }

            if let Ok(value) = std::env::var(var_name)
                && !value.is_empty()
            {
                provider.api_key = Some(SecretString::from(value));
            }
        }
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a provider base URL, the upstream timeout, the
    /// health path, or the telemetry sampling rate is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_providers()?;
        self.validate_server()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_providers(&self) -> anyhow::Result<()> {
        for (name, provider) in self.providers.entries() {
            let Some(ref base_url) = provider.base_url else {
                continue;
            };

            let url = Url::parse(base_url)
                .map_err(|e| anyhow::anyhow!("invalid base_url for provider '{name}': {e}"))?;

            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("base_url for provider '{name}' must use http or https");
            }
        }

        if let Some(timeout) = self.providers.timeout()?
            && timeout.is_zero()
        {
            anyhow::bail!("providers.timeout must be greater than zero");
        }

        let configured = self
            .providers
            .entries()
            .iter()
            .filter(|(_, provider)| provider.has_api_key())
            .count();

        if configured == 0 {
            tracing::warn!("no provider API keys configured, every generation request will fail");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(ref telemetry) = self.telemetry else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&telemetry.sampling_rate) {
            anyhow::bail!("telemetry.sampling_rate must be between 0.0 and 1.0");
        }

        Ok(())
    }
}
