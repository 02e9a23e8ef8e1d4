//! Narrative generation: headline first, then the full story

use crate::config::GenerationConfig;
use crate::error::{AssemblerError, Result};
use crate::models::{CompanyProfile, Story};
use crate::money::Currency;
use crate::prompts;
use async_trait::async_trait;
use newsletter_llm::providers::{OpenAIConfig, OpenAIProvider};
use newsletter_llm::{CompletionRequest, LLMProvider, Message};
use newsletter_prompt::JinjaTemplate;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// One text-generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

/// Text-generation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// [`TextGenerator`] backed by a chat-completion provider
pub struct LlmTextGenerator {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl LlmTextGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Build the production generator
    ///
    /// Credentials come from `OPENAI_API_KEY` / `OPENAI_API_BASE`; model and
    /// timeout from `config`.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let provider_config = OpenAIConfig::from_env()
            .map_err(|e| AssemblerError::Config(e.to_string()))?
            .with_timeout(config.timeout);
        let provider = OpenAIProvider::with_config(provider_config)
            .map_err(|e| AssemblerError::Config(e.to_string()))?;

        Ok(Self::new(Arc::new(provider), &config.model))
    }
}

#[async_trait]
impl TextGenerator for LlmTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let completion = CompletionRequest::builder(&self.model)
            .add_message(Message::user(request.prompt))
            .max_tokens(request.max_tokens)
            .temperature(request.temperature)
            .build();

        let response = self
            .provider
            .complete(completion)
            .await
            .map_err(|e| AssemblerError::Generation(e.to_string()))?;

        debug!(
            provider = self.provider.name(),
            model = %self.model,
            total_tokens = response.usage.total(),
            "Generation complete"
        );
        Ok(response.text().to_string())
    }
}

/// Writes the headline and story for a company profile
pub struct NarrativeGenerator {
    generator: Arc<dyn TextGenerator>,
    config: GenerationConfig,
    currency: Currency,
    headline_template: JinjaTemplate,
}

impl NarrativeGenerator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        config: GenerationConfig,
        currency: Currency,
    ) -> Result<Self> {
        let headline_template =
            prompts::headline_prompt().map_err(|e| AssemblerError::Config(e.to_string()))?;

        Ok(Self {
            generator,
            config,
            currency,
            headline_template,
        })
    }

    /// Generate a headline, failing when the model returns nothing usable
    pub async fn headline(&self, company_name: &str, profile: &CompanyProfile) -> Result<String> {
        let prompt = self
            .headline_template
            .render(&json!({
                "company": company_name,
                "core_offering": profile.business_model.core_offering,
                "point": profile.analysis_points.first(),
            }))
            .map_err(|e| AssemblerError::Generation(e.to_string()))?;

        let raw = self
            .generator
            .generate(GenerationRequest {
                prompt,
                max_tokens: self.config.headline_max_tokens,
                temperature: self.config.headline_temperature,
            })
            .await?;

        let headline = clean_headline(&raw);
        if headline.is_empty() {
            return Err(AssemblerError::Generation(
                "headline came back empty".to_string(),
            ));
        }
        Ok(headline.to_string())
    }

    /// Generate the story body under an accepted headline
    pub async fn full_story(
        &self,
        company_name: &str,
        headline: &str,
        profile: &CompanyProfile,
    ) -> Result<String> {
        let prompt = prompts::story_prompt(company_name, headline, profile, self.currency);

        let body = self
            .generator
            .generate(GenerationRequest {
                prompt,
                max_tokens: self.config.story_max_tokens,
                temperature: self.config.story_temperature,
            })
            .await?;

        Ok(body.trim().to_string())
    }

    /// Headline, then story
    pub async fn generate(&self, company_name: &str, profile: CompanyProfile) -> Result<Story> {
        let headline = self.headline(company_name, &profile).await?;
        info!(headline = %headline, "Headline generated");

        let body = self.full_story(company_name, &headline, &profile).await?;
        info!(chars = body.len(), "Story generated");

        Story::new(profile, headline, body)
    }
}

/// Trim whitespace and one pair of wrapping quotes
fn clean_headline(raw: &str) -> &str {
    let trimmed = raw.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”')] {
        if let Some(inner) = trimmed
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metrics;
    use mockall::Sequence;
    use newsletter_llm::{CompletionResponse, LLMError, StopReason, TokenUsage};
    use std::sync::Mutex;

    fn narrator(generator: MockTextGenerator) -> NarrativeGenerator {
        NarrativeGenerator::new(
            Arc::new(generator),
            GenerationConfig::default(),
            Currency::Inr,
        )
        .unwrap()
    }

    fn profile_with_revenue() -> CompanyProfile {
        CompanyProfile {
            metrics: Metrics {
                revenue: Some(5_000_000_000.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_headline() {
        assert_eq!(clean_headline("  Zerodha Rules \n"), "Zerodha Rules");
        assert_eq!(clean_headline("\"Zerodha Rules\""), "Zerodha Rules");
        assert_eq!(clean_headline("“Zerodha Rules”"), "Zerodha Rules");
        assert_eq!(clean_headline("\"\""), "");
        assert_eq!(clean_headline("Say \"hi\" now"), "Say \"hi\" now");
    }

    #[tokio::test]
    async fn test_generate_headline_then_story() {
        let mut generator = MockTextGenerator::new();
        let mut seq = Sequence::new();

        generator
            .expect_generate()
            .withf(|r| r.max_tokens == 60 && (r.temperature - 0.8).abs() < f32::EPSILON)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("  \"The Quiet Giant of Indian Broking\"  ".to_string()));
        generator
            .expect_generate()
            .withf(|r| {
                r.max_tokens == 1500
                    && (r.temperature - 0.5).abs() < f32::EPSILON
                    && r.prompt.contains("Headline: The Quiet Giant of Indian Broking")
                    && r.prompt.contains("₹500 crores")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("\n## Origins\nBuilt by **two brothers**.\n".to_string()));

        let story = narrator(generator)
            .generate("Zerodha", profile_with_revenue())
            .await
            .unwrap();

        assert_eq!(story.headline, "The Quiet Giant of Indian Broking");
        assert_eq!(story.body, "## Origins\nBuilt by **two brothers**.");
        assert_eq!(story.profile, profile_with_revenue());
    }

    #[tokio::test]
    async fn test_empty_headline_stops_before_story() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|r| r.max_tokens == 60)
            .times(1)
            .returning(|_| Ok("   \n".to_string()));
        generator
            .expect_generate()
            .withf(|r| r.max_tokens == 1500)
            .times(0);

        let err = narrator(generator)
            .generate("Zerodha", CompanyProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AssemblerError::Generation(_)));
    }

    #[tokio::test]
    async fn test_generator_error_propagates() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Err(AssemblerError::Generation("rate limited".to_string())));

        let err = narrator(generator)
            .generate("Zerodha", CompanyProfile::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: rate limited");
    }

    struct RecordingProvider {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl LLMProvider for RecordingProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> newsletter_llm::Result<CompletionResponse> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(CompletionResponse {
                    message: Message::assistant(text.clone()),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage {
                        input_tokens: 10,
                        output_tokens: 5,
                    },
                }),
                Err(message) => Err(LLMError::RateLimitExceeded(message.clone())),
            }
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_llm_text_generator_forwards_parameters() {
        let provider = Arc::new(RecordingProvider {
            reply: Ok("A headline".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let generator = LlmTextGenerator::new(provider.clone(), "gpt-4o-mini");

        let text = generator
            .generate(GenerationRequest {
                prompt: "Write a headline".to_string(),
                max_tokens: 60,
                temperature: 0.8,
            })
            .await
            .unwrap();
        assert_eq!(text, "A headline");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, "gpt-4o-mini");
        assert_eq!(seen[0].max_tokens, 60);
        assert_eq!(seen[0].temperature, Some(0.8));
        assert_eq!(seen[0].messages[0].text(), "Write a headline");
    }

    #[tokio::test]
    async fn test_llm_text_generator_maps_errors() {
        let provider = Arc::new(RecordingProvider {
            reply: Err("slow down".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let generator = LlmTextGenerator::new(provider, "gpt-4o-mini");

        let err = generator
            .generate(GenerationRequest {
                prompt: "x".to_string(),
                max_tokens: 60,
                temperature: 0.8,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AssemblerError::Generation(ref m) if m.contains("slow down")));
    }
}
