//! Prompt templating for the newsletter assembler
//!
//! Two ways to produce prompt text:
//!
//! - [`JinjaTemplate`]: a named MiniJinja template rendered against JSON variables
//! - [`PromptBuilder`]: a fluent builder for prompts made of labelled sections
//!
//! ```
//! use newsletter_prompt::{JinjaTemplate, PromptBuilder};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::new("greeting", "Write about {{ company }}.").unwrap();
//! let text = template.render(&json!({ "company": "Zerodha" })).unwrap();
//! assert_eq!(text, "Write about Zerodha.");
//!
//! let prompt = PromptBuilder::new()
//!     .text("Facts:")
//!     .section("Key Metrics")
//!     .field("Revenue", "₹500 crores")
//!     .build();
//! assert!(prompt.contains("## Key Metrics"));
//! assert!(prompt.contains("- Revenue: ₹500 crores"));
//! ```

mod builder;
mod error;
mod jinja;

pub use builder::PromptBuilder;
pub use error::{PromptError, Result};
pub use jinja::JinjaTemplate;
