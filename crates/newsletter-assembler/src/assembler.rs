//! Request orchestration: acquisition, generation, rendering

use crate::acquisition::DataAcquirer;
use crate::config::AssemblerConfig;
use crate::error::{AssemblerError, Result};
use crate::generation::{LlmTextGenerator, NarrativeGenerator};
use crate::models::{NewsletterRequest, RenderedOutput};
use crate::render::render_story;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Runs the newsletter pipeline for one request at a time
///
/// Holds no per-request state, so one instance can be shared across
/// concurrent requests behind an `Arc`.
pub struct NewsletterAssembler {
    acquirer: DataAcquirer,
    narrator: NarrativeGenerator,
}

impl NewsletterAssembler {
    pub fn new(acquirer: DataAcquirer, narrator: NarrativeGenerator) -> Self {
        Self { acquirer, narrator }
    }

    /// Build the production pipeline
    pub fn from_config(config: &AssemblerConfig) -> Result<Self> {
        config.validate()?;

        let acquirer = DataAcquirer::from_config(&config.research, config.currency)?;
        let generator = LlmTextGenerator::from_config(&config.generation)?;
        let narrator = NarrativeGenerator::new(
            Arc::new(generator),
            config.generation.clone(),
            config.currency,
        )?;

        Ok(Self::new(acquirer, narrator))
    }

    /// Assemble a newsletter
    ///
    /// An acquisition failure is not an error: the output carries an empty
    /// story and the failure text in `raw_api_response`. Generation and
    /// rendering failures are returned as errors.
    #[instrument(skip(self, request), fields(company = %request.company_name))]
    pub async fn assemble(&self, request: NewsletterRequest) -> Result<RenderedOutput> {
        let company_name = request.company_name.trim();
        if company_name.is_empty() {
            return Err(AssemblerError::InvalidRequest(
                "company_name must not be empty".to_string(),
            ));
        }

        let profile = match self
            .acquirer
            .acquire(company_name, request.company_data)
            .await
        {
            Ok(Some(profile)) => profile,
            Ok(None) => return Err(AssemblerError::NoCompanyData(company_name.to_string())),
            Err(e) if e.is_acquisition() => {
                warn!(error = %e, "Company data acquisition failed, returning empty newsletter");
                return Ok(RenderedOutput::acquisition_failed(e.to_string()));
            }
            Err(e) => return Err(e),
        };

        if profile.is_empty() {
            warn!("Company profile is empty, the story rests on the company name alone");
        }

        let story = self.narrator.generate(company_name, profile).await?;
        let rendered = render_story(&story.body)?;

        info!(
            is_markdown = rendered.is_markdown,
            html_chars = rendered.html.len(),
            "Newsletter assembled"
        );

        Ok(RenderedOutput {
            story: story.body,
            html_content: rendered.html,
            is_markdown: rendered.is_markdown,
            raw_api_response: None,
        })
    }
}
