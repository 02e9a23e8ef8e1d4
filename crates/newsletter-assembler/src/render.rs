//! Markdown detection and HTML rendering

use crate::error::{AssemblerError, Result};
use markdown::Options;

/// Story text converted for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedStory {
    /// Empty unless the story contains markdown
    pub html: String,
    pub is_markdown: bool,
}

/// Whether `text` uses markdown headings (`##`) or emphasis (`*`)
pub fn contains_markdown(text: &str) -> bool {
    text.contains("##") || text.contains('*')
}

/// Render a story to HTML when it contains markdown
pub fn render_story(text: &str) -> Result<RenderedStory> {
    if !contains_markdown(text) {
        return Ok(RenderedStory::default());
    }

    let html = markdown::to_html_with_options(text, &Options::gfm())
        .map_err(|e| AssemblerError::Render(e.to_string()))?;

    Ok(RenderedStory {
        html,
        is_markdown: true,
    })
}
