//! Prompt templates for the newsletter pipeline
//!
//! - `research`: the system/user pair sent to the research API
//! - `narrative`: the headline and full-story prompts sent to the generation API

mod narrative;
mod research;

pub use narrative::*;
pub use research::*;
