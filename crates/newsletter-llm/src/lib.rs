//! Chat-completion abstraction for the newsletter assembler
//!
//! Both outbound services the assembler talks to (the company research API
//! and the text-generation API) speak the same chat-completion dialect, so
//! this crate models a single request/response shape and one provider trait:
//!
//! - Message types for the conversation
//! - Completion request/response types
//! - The [`LLMProvider`] trait
//! - An OpenAI-compatible provider (behind the `openai` feature)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
