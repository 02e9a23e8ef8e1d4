//! Company data acquisition
//!
//! A caller-supplied profile is used as is. Otherwise the research API is
//! asked for a JSON profile, which is unwrapped from any code fence and
//! parsed leniently.

use crate::config::ResearchConfig;
use crate::error::{AssemblerError, Result};
use crate::models::CompanyProfile;
use crate::money::Currency;
use crate::prompts;
use async_trait::async_trait;
use newsletter_llm::providers::{OpenAIConfig, OpenAIProvider};
use newsletter_llm::{CompletionRequest, LLMProvider, Message};
use newsletter_prompt::JinjaTemplate;
use newsletter_utils::unwrap_fenced_json;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Characters of the raw response quoted in parse diagnostics
const EXCERPT_CHARS: usize = 120;

/// Source of raw research text about a company
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResearchClient: Send + Sync {
    /// Ask for a JSON company profile and return the assistant text verbatim
    async fn research(&self, company_name: &str) -> Result<String>;
}

/// [`ResearchClient`] over a chat-completion endpoint
pub struct ChatResearchClient {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: usize,
    currency: Currency,
    template: JinjaTemplate,
}

impl ChatResearchClient {
    /// Create a client that sends research prompts through `provider`
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        model: impl Into<String>,
        max_tokens: usize,
        currency: Currency,
    ) -> Result<Self> {
        let template =
            prompts::research_prompt().map_err(|e| AssemblerError::Config(e.to_string()))?;

        Ok(Self {
            provider,
            model: model.into(),
            max_tokens,
            currency,
            template,
        })
    }
}

#[async_trait]
impl ResearchClient for ChatResearchClient {
    async fn research(&self, company_name: &str) -> Result<String> {
        let prompt = self
            .template
            .render(&json!({
                "company": company_name,
                "currency": self.currency.as_tag(),
            }))
            .map_err(|e| AssemblerError::AcquisitionTransport(e.to_string()))?;

        let request = CompletionRequest::builder(&self.model)
            .system(prompts::RESEARCH_SYSTEM_PROMPT)
            .add_message(Message::user(prompt))
            .max_tokens(self.max_tokens)
            .temperature(0.2)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| AssemblerError::AcquisitionTransport(e.to_string()))?;

        debug!(
            provider = self.provider.name(),
            output_tokens = response.usage.output_tokens,
            "Research complete"
        );
        Ok(response.text().to_string())
    }
}

/// Produces the company profile for a request
pub struct DataAcquirer {
    client: Option<Arc<dyn ResearchClient>>,
}

impl DataAcquirer {
    /// Create an acquirer that researches through `client`
    pub fn new(client: Arc<dyn ResearchClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Create an acquirer with no research credential
    ///
    /// Supplied profiles still work; every lookup fails with
    /// [`AssemblerError::MissingCredential`].
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    /// Build the production acquirer from configuration
    pub fn from_config(config: &ResearchConfig, currency: Currency) -> Result<Self> {
        let Some(api_key) = config.api_key.as_deref() else {
            warn!("RESEARCH_API_KEY is not set, company research is disabled");
            return Ok(Self::unconfigured());
        };

        let provider_config = OpenAIConfig::new(api_key)
            .with_api_base(&config.api_base)
            .with_name("research")
            .with_timeout(config.timeout);
        let provider = OpenAIProvider::with_config(provider_config)
            .map_err(|e| AssemblerError::Config(e.to_string()))?;

        let client = ChatResearchClient::new(
            Arc::new(provider),
            &config.model,
            config.max_tokens,
            currency,
        )?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Resolve the profile for `company_name`
    ///
    /// Returns `Ok(None)` when the research API answers with JSON `null`.
    pub async fn acquire(
        &self,
        company_name: &str,
        supplied: Option<CompanyProfile>,
    ) -> Result<Option<CompanyProfile>> {
        if let Some(profile) = supplied {
            info!(company = company_name, "Using supplied company data");
            return Ok(Some(profile));
        }

        let client = self
            .client
            .as_ref()
            .ok_or(AssemblerError::MissingCredential)?;

        info!(company = company_name, "Researching company");
        let raw = client.research(company_name).await?;
        debug!(bytes = raw.len(), "Received research response");

        parse_profile(&raw).inspect_err(|e| warn!(error = %e, "Research response rejected"))
    }
}

/// Parse research text into a profile, tolerating a surrounding code fence
pub fn parse_profile(raw: &str) -> Result<Option<CompanyProfile>> {
    let cleaned = unwrap_fenced_json(raw);

    serde_json::from_str::<Option<CompanyProfile>>(cleaned).map_err(|e| {
        let excerpt: String = cleaned.chars().take(EXCERPT_CHARS).collect();
        AssemblerError::AcquisitionParse(format!("{e} (response began: {excerpt:?})"))
    })
}
