//! Configuration for the crawl core

mod crawl;
mod logging;

pub use crawl::{DedupConfig, ScopeConfig, TrapConfig};
pub use logging::{LogFormat, LogLevel, LoggingConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the crawl core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Crawl scope configuration
    #[serde(default)]
    pub scope: ScopeConfig,
    /// Trap heuristic configuration
    #[serde(default)]
    pub traps: TrapConfig,
    /// Near-duplicate detection configuration
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope: ScopeConfig::default(),
            traps: TrapConfig::default(),
            dedup: DedupConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together so the user
    /// can fix everything in one pass rather than playing whack-a-mole.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Scope validation
        if self.scope.allowed_domains.is_empty() {
            errors.push("allowed_domains must not be empty".to_string());
        }
        for domain in &self.scope.allowed_domains {
            if domain.trim_end_matches('.').is_empty() {
                errors.push(format!("allowed domain '{domain}' is empty"));
            }
        }

        // Trap validation
        if self.traps.pagination_digit_threshold == 0 {
            errors.push("pagination_digit_threshold must be positive".to_string());
        }
        if self.traps.pagination_params.is_empty() {
            errors.push("pagination_params must not be empty".to_string());
        }

        // Dedup validation
        if self.dedup.shingle_size == 0 {
            errors.push("shingle_size must be positive".to_string());
        }
        if self.dedup.num_bands == 0 {
            errors.push("num_bands must be positive".to_string());
        }
        if self.dedup.similarity_threshold <= 0.0 || self.dedup.similarity_threshold > 1.0 {
            errors.push("similarity_threshold must be in (0.0, 1.0]".to_string());
        }
        if self.dedup.max_signatures == 0 {
            errors.push("max_signatures must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Configuration validation failed:\n  - {}", errors.join("\n  - "))
        }
    }
}
