//! Configuration for newsletter assembly

use crate::error::{AssemblerError, Result};
use crate::money::Currency;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the research API key
pub const RESEARCH_API_KEY_VAR: &str = "RESEARCH_API_KEY";

const DEFAULT_RESEARCH_API_BASE: &str = "https://api.perplexity.ai";
const DEFAULT_RESEARCH_MODEL: &str = "sonar";
const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Research API settings
#[derive(Clone)]
pub struct ResearchConfig {
    /// Bearer key; `None` makes every research lookup fail with
    /// [`AssemblerError::MissingCredential`]
    pub api_key: Option<String>,

    /// Base URL of the chat-completion endpoint
    pub api_base: String,

    /// Research model name
    pub model: String,

    /// Output budget for the JSON profile
    pub max_tokens: usize,

    /// Per-call timeout
    pub timeout: Duration,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_RESEARCH_API_BASE.to_string(),
            model: DEFAULT_RESEARCH_MODEL.to_string(),
            max_tokens: 1200,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for ResearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResearchConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Text-generation settings for the headline and story calls
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Generation model name
    pub model: String,

    /// Output budget for the headline
    pub headline_max_tokens: usize,

    /// Sampling temperature for the headline
    pub headline_temperature: f32,

    /// Output budget for the full story
    pub story_max_tokens: usize,

    /// Sampling temperature for the full story
    pub story_temperature: f32,

    /// Per-call timeout
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GENERATION_MODEL.to_string(),
            headline_max_tokens: 60,
            headline_temperature: 0.8,
            story_max_tokens: 1500,
            story_temperature: 0.5,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Configuration for the whole pipeline
#[derive(Debug, Clone, Default)]
pub struct AssemblerConfig {
    /// Research API settings
    pub research: ResearchConfig,

    /// Text-generation settings
    pub generation: GenerationConfig,

    /// Currency used to display monetary metrics in prompts
    pub currency: Currency,
}

impl AssemblerConfig {
    /// Create a new configuration builder
    pub fn builder() -> AssemblerConfigBuilder {
        AssemblerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// | variable | default |
    /// |---|---|
    /// | `RESEARCH_API_KEY` | unset |
    /// | `RESEARCH_API_BASE` | `https://api.perplexity.ai` |
    /// | `RESEARCH_MODEL` | `sonar` |
    /// | `GENERATION_MODEL` | `gpt-4o-mini` |
    /// | `NEWSLETTER_CURRENCY` | `inr` |
    /// | `REQUEST_TIMEOUT_SECS` | `60` |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(key) = lookup(RESEARCH_API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            builder = builder.research_api_key(key);
        }
        if let Some(base) = lookup("RESEARCH_API_BASE") {
            builder = builder.research_api_base(base);
        }
        if let Some(model) = lookup("RESEARCH_MODEL") {
            builder = builder.research_model(model);
        }
        if let Some(model) = lookup("GENERATION_MODEL") {
            builder = builder.generation_model(model);
        }
        if let Some(tag) = lookup("NEWSLETTER_CURRENCY") {
            let currency = tag.parse::<Currency>().map_err(AssemblerError::Config)?;
            builder = builder.currency(currency);
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                AssemblerError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {e}"))
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;

        for (name, temperature) in [
            ("headline_temperature", generation.headline_temperature),
            ("story_temperature", generation.story_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(AssemblerError::Config(format!(
                    "{name} must be between 0.0 and 2.0, got {temperature}"
                )));
            }
        }

        if generation.headline_max_tokens == 0
            || generation.story_max_tokens == 0
            || self.research.max_tokens == 0
        {
            return Err(AssemblerError::Config(
                "token limits must be greater than 0".to_string(),
            ));
        }

        if generation.timeout.is_zero() || self.research.timeout.is_zero() {
            return Err(AssemblerError::Config(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        if generation.model.trim().is_empty() || self.research.model.trim().is_empty() {
            return Err(AssemblerError::Config(
                "model names must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for AssemblerConfig
#[derive(Debug, Default)]
pub struct AssemblerConfigBuilder {
    research_api_key: Option<String>,
    research_api_base: Option<String>,
    research_model: Option<String>,
    generation_model: Option<String>,
    headline_temperature: Option<f32>,
    story_temperature: Option<f32>,
    currency: Option<Currency>,
    request_timeout: Option<Duration>,
}

impl AssemblerConfigBuilder {
    /// Set the research API key
    pub fn research_api_key(mut self, key: impl Into<String>) -> Self {
        self.research_api_key = Some(key.into());
        self
    }

    /// Set the research API base URL
    pub fn research_api_base(mut self, base: impl Into<String>) -> Self {
        self.research_api_base = Some(base.into());
        self
    }

    /// Set the research model
    pub fn research_model(mut self, model: impl Into<String>) -> Self {
        self.research_model = Some(model.into());
        self
    }

    /// Set the generation model
    pub fn generation_model(mut self, model: impl Into<String>) -> Self {
        self.generation_model = Some(model.into());
        self
    }

    /// Set the headline sampling temperature
    pub fn headline_temperature(mut self, temperature: f32) -> Self {
        self.headline_temperature = Some(temperature);
        self
    }

    /// Set the story sampling temperature
    pub fn story_temperature(mut self, temperature: f32) -> Self {
        self.story_temperature = Some(temperature);
        self
    }

    /// Set the display currency
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Set the per-call timeout for both external APIs
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AssemblerConfig> {
        let defaults = AssemblerConfig::default();
        let timeout = self.request_timeout.unwrap_or(defaults.research.timeout);

        let config = AssemblerConfig {
            research: ResearchConfig {
                api_key: self.research_api_key,
                api_base: self.research_api_base.unwrap_or(defaults.research.api_base),
                model: self.research_model.unwrap_or(defaults.research.model),
                max_tokens: defaults.research.max_tokens,
                timeout,
            },
            generation: GenerationConfig {
                model: self.generation_model.unwrap_or(defaults.generation.model),
                headline_temperature: self
                    .headline_temperature
                    .unwrap_or(defaults.generation.headline_temperature),
                story_temperature: self
                    .story_temperature
                    .unwrap_or(defaults.generation.story_temperature),
                timeout,
                ..defaults.generation
            },
            currency: self.currency.unwrap_or(defaults.currency),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AssemblerConfig::default();
        assert!(config.research.api_key.is_none());
        assert_eq!(config.research.api_base, "https://api.perplexity.ai");
        assert_eq!(config.generation.headline_max_tokens, 60);
        assert_eq!(config.generation.story_max_tokens, 1500);
        assert_eq!(config.currency, Currency::Inr);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AssemblerConfig::builder()
            .research_api_key("pplx-test")
            .generation_model("gpt-4o")
            .currency(Currency::Usd)
            .request_timeout(Duration::from_secs(15))
            .build()
            .unwrap();

        assert_eq!(config.research.api_key.as_deref(), Some("pplx-test"));
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.research.timeout, Duration::from_secs(15));
        assert_eq!(config.generation.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_validation_rejects_bad_temperature() {
        let result = AssemblerConfig::builder().headline_temperature(3.5).build();
        assert!(matches!(result, Err(AssemblerError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let result = AssemblerConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = AssemblerConfig::from_lookup(lookup_from(&[
            ("RESEARCH_API_KEY", "pplx-env"),
            ("RESEARCH_MODEL", "sonar-pro"),
            ("NEWSLETTER_CURRENCY", "USD"),
            ("REQUEST_TIMEOUT_SECS", "90"),
        ]))
        .unwrap();

        assert_eq!(config.research.api_key.as_deref(), Some("pplx-env"));
        assert_eq!(config.research.model, "sonar-pro");
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.generation.timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_from_lookup_blank_key_is_missing() {
        let config =
            AssemblerConfig::from_lookup(lookup_from(&[("RESEARCH_API_KEY", "  ")])).unwrap();
        assert!(config.research.api_key.is_none());
    }

    #[test]
    fn test_from_lookup_rejects_unknown_currency() {
        let result = AssemblerConfig::from_lookup(lookup_from(&[("NEWSLETTER_CURRENCY", "gbp")]));
        assert!(matches!(result, Err(AssemblerError::Config(_))));
    }

    #[test]
    fn test_research_config_debug_redacts_key() {
        let config = ResearchConfig {
            api_key: Some("pplx-secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("pplx-secret"));
    }
}
