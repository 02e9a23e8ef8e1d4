//! Company newsletter assembly
//!
//! This crate turns a company name (and optionally pre-researched company
//! data) into a newsletter article in three sequential stages:
//!
//! 1. **Acquisition** ([`acquisition`]): use the caller's profile, or ask a
//!    research API for one as JSON.
//! 2. **Generation** ([`generation`]): a headline, then the full story, from
//!    a text-generation API.
//! 3. **Rendering** ([`render`]): markdown detection and HTML conversion.
//!
//! [`NewsletterAssembler`] runs the stages and applies the fallback policy:
//! an acquisition failure still yields a (empty) response carrying the
//! failure text, while a generation or rendering failure fails the request.
//!
//! # Example
//!
//! ```rust,ignore
//! use newsletter_assembler::{AssemblerConfig, NewsletterAssembler, NewsletterRequest};
//!
//! let config = AssemblerConfig::from_env()?;
//! let assembler = NewsletterAssembler::from_config(&config)?;
//!
//! let output = assembler
//!     .assemble(NewsletterRequest::new("Zerodha"))
//!     .await?;
//! println!("{}", output.story);
//! ```

pub mod acquisition;
pub mod assembler;
pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod money;
pub mod prompts;
pub mod render;

// Re-export main types for convenience
pub use acquisition::{ChatResearchClient, DataAcquirer, ResearchClient};
pub use assembler::NewsletterAssembler;
pub use config::{AssemblerConfig, GenerationConfig, ResearchConfig};
pub use error::{AssemblerError, Result};
pub use generation::{GenerationRequest, LlmTextGenerator, NarrativeGenerator, TextGenerator};
pub use models::{
    BusinessModel, CompanyProfile, MarketContext, Metrics, NewsletterRequest, RenderedOutput,
    Story,
};
pub use money::{Currency, format_currency};
