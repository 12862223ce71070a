use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

const ENV_SIMILARITY_FLOOR: &str = "MIRU_MAPPING_SIMILARITY_FLOOR";
const ENV_LOOSE_THRESHOLD: &str = "MIRU_MAPPING_LOOSE_THRESHOLD";
const ENV_PARTIAL_THRESHOLD: &str = "MIRU_MAPPING_PARTIAL_THRESHOLD";
const ENV_SEARCH_TIMEOUT: &str = "MIRU_MAPPING_SEARCH_TIMEOUT_SECS";
const ENV_INFO_TIMEOUT: &str = "MIRU_MAPPING_INFO_TIMEOUT_SECS";
const ENV_MAX_TITLE_LENGTH: &str = "MIRU_MAPPING_MAX_TITLE_LENGTH";

/// Configuration for identity resolution and fusion
///
/// Externalizes the confidence thresholds and time limits used across the
/// mapping pipeline. The defaults are compatibility constants: changing them
/// changes which provider records are considered the same title.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingConfig {
    /// Matches below this similarity are discarded by the mapping pipeline
    pub similarity_floor: f64,

    /// Minimum similarity accepted by the fuzzy loose tier
    pub loose_threshold: f64,

    /// Minimum similarity accepted by the partial (last resort) tier
    pub partial_threshold: f64,

    /// Upper bound for a single provider search attempt
    pub search_timeout: Duration,

    /// Upper bound for a single provider info fetch
    pub info_timeout: Duration,

    /// Sanitized titles are truncated to this many characters
    pub max_title_length: usize,
}

impl MappingConfig {
    /// Creates a configuration with the production defaults
    pub fn new() -> Self {
        Self {
            similarity_floor: 0.7,
            loose_threshold: 0.8,
            partial_threshold: 0.6,
            search_timeout: Duration::from_secs(15),
            info_timeout: Duration::from_secs(15),
            max_title_length: 100,
        }
    }

    /// Loads overrides from the environment (and `.env` when present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(value) = lookup(ENV_SIMILARITY_FLOOR) {
            config.similarity_floor = value.trim().parse()?;
        }
        if let Some(value) = lookup(ENV_LOOSE_THRESHOLD) {
            config.loose_threshold = value.trim().parse()?;
        }
        if let Some(value) = lookup(ENV_PARTIAL_THRESHOLD) {
            config.partial_threshold = value.trim().parse()?;
        }
        if let Some(value) = lookup(ENV_SEARCH_TIMEOUT) {
            config.search_timeout = Duration::from_secs(value.trim().parse()?);
        }
        if let Some(value) = lookup(ENV_INFO_TIMEOUT) {
            config.info_timeout = Duration::from_secs(value.trim().parse()?);
        }
        if let Some(value) = lookup(ENV_MAX_TITLE_LENGTH) {
            config.max_title_length = value.trim().parse()?;
        }

        config.validate()?;
        log::debug!("Mapping configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("similarity_floor", self.similarity_floor),
            ("loose_threshold", self.loose_threshold),
            ("partial_threshold", self.partial_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::ConfigError(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        if self.partial_threshold > self.loose_threshold {
            return Err(AppError::ConfigError(format!(
                "partial_threshold ({}) cannot exceed loose_threshold ({})",
                self.partial_threshold, self.loose_threshold
            )));
        }

        if self.search_timeout.is_zero() {
            return Err(AppError::ConfigError(
                "search_timeout must be > 0".to_string(),
            ));
        }

        if self.info_timeout.is_zero() {
            return Err(AppError::ConfigError("info_timeout must be > 0".to_string()));
        }

        if self.max_title_length == 0 {
            return Err(AppError::ConfigError(
                "max_title_length must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for MappingConfig to make test setup easier
#[derive(Default)]
pub struct MappingConfigBuilder {
    config: MappingConfig,
}

impl MappingConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MappingConfig::new(),
        }
    }

    pub fn similarity_floor(mut self, floor: f64) -> Self {
        self.config.similarity_floor = floor;
        self
    }

    pub fn loose_threshold(mut self, threshold: f64) -> Self {
        self.config.loose_threshold = threshold;
        self
    }

    pub fn partial_threshold(mut self, threshold: f64) -> Self {
        self.config.partial_threshold = threshold;
        self
    }

    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.config.search_timeout = timeout;
        self
    }

    pub fn info_timeout(mut self, timeout: Duration) -> Self {
        self.config.info_timeout = timeout;
        self
    }

    pub fn max_title_length(mut self, length: usize) -> Self {
        self.config.max_title_length = length;
        self
    }

    pub fn build(self) -> AppResult<MappingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
