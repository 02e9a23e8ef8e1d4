//! Error types for newsletter assembly

use thiserror::Error;

/// Newsletter pipeline errors
#[derive(Debug, Error)]
pub enum AssemblerError {
    /// Research API key is not configured
    #[error("Research API key is not configured (set RESEARCH_API_KEY)")]
    MissingCredential,

    /// Research response was not a valid company profile
    #[error("Failed to parse research response: {0}")]
    AcquisitionParse(String),

    /// Network, authentication or HTTP failure talking to the research API
    #[error("Research API request failed: {0}")]
    AcquisitionTransport(String),

    /// Acquisition finished without data and without an error
    #[error("No company data available for {0}")]
    NoCompanyData(String),

    /// Headline or story generation failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Markdown to HTML conversion failed
    #[error("Markdown rendering failed: {0}")]
    Render(String),

    /// Request payload rejected before any work was done
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AssemblerError {
    /// Whether this failure came from the acquisition stage and may be
    /// downgraded to diagnostic text in the response.
    pub fn is_acquisition(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::AcquisitionParse(_) | Self::AcquisitionTransport(_)
        )
    }
}

/// Result type alias for newsletter operations
pub type Result<T> = std::result::Result<T, AssemblerError>;
