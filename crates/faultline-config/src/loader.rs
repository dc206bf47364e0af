use std::{collections::HashSet, path::Path};

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

        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), overrides = config.codes.len(), "loaded configuration");

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the log filter is empty or a code override is
    /// malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_log_config()?;
        self.validate_code_overrides()?;
        Ok(())
    }

    fn validate_log_config(&self) -> anyhow::Result<()> {
        if self.log.filter.trim().is_empty() {
            anyhow::bail!("log.filter must not be empty");
        }

        Ok(())
    }

    /// Overrides are applied with overwrite semantics, so each code may
    /// appear at most once to keep the outcome independent of file order
    fn validate_code_overrides(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();

        for entry in &self.codes {
            if entry.code == 0 {
                anyhow::bail!("error code 0 is reserved and cannot be overridden");
            }

            if !(100..=599).contains(&entry.status) {
                anyhow::bail!("error code {} has invalid HTTP status {}", entry.code, entry.status);
            }

            if entry.message.trim().is_empty() {
                anyhow::bail!("error code {} must have a non-empty message", entry.code);
            }

            if !seen.insert(entry.code) {
                anyhow::bail!("error code {} is overridden more than once", entry.code);
            }
        }

        Ok(())
    }
}
