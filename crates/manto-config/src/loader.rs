use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
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

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is out of its accepted range
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.security.api_key_min_length < 1 {
            anyhow::bail!(
                "invalid API key minimum length: {} (must be at least 1)",
                self.security.api_key_min_length
            );
        }

        if self.validation.max_message_length < 1 {
            anyhow::bail!(
                "invalid max message length: {} (must be at least 1)",
                self.validation.max_message_length
            );
        }

        if self.anthropic.max_tokens < 1 {
            anyhow::bail!("invalid max tokens: {} (must be at least 1)", self.anthropic.max_tokens);
        }

        if !(0.0..=2.0).contains(&self.anthropic.temperature) {
            anyhow::bail!(
                "invalid temperature: {} (must be between 0 and 2)",
                self.anthropic.temperature
            );
        }

        Ok(())
    }
}
