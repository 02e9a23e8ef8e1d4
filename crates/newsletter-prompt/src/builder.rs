//! Fluent prompt builder
//!
//! [`PromptBuilder`] assembles prompts piece by piece, which suits prompts
//! whose sections depend on which facts are known.

/// A fluent builder for constructing prompts
///
/// # Examples
///
/// ```
/// use newsletter_prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new()
///     .text("You are a business journalist.")
///     .section("Analysis Points")
///     .bullet("Growing fast")
///     .bullet("Burning cash")
///     .when(false, "never shown")
///     .build();
///
/// assert!(prompt.contains("## Analysis Points"));
/// assert!(prompt.contains("- Burning cash"));
/// assert!(!prompt.contains("never shown"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    parts: Vec<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add static text
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.parts.push(content.into());
        self
    }

    /// Add a newline
    pub fn newline(self) -> Self {
        self.text("\n")
    }

    /// Add a blank line (two newlines)
    pub fn blank_line(self) -> Self {
        self.text("\n\n")
    }

    /// Add a section header (markdown h2)
    pub fn section(self, title: impl Into<String>) -> Self {
        self.text(format!("\n## {}\n", title.into()))
    }

    /// Add content conditionally
    pub fn when(self, condition: bool, content: impl Into<String>) -> Self {
        if condition { self.text(content) } else { self }
    }

    /// Add a bullet point
    pub fn bullet(self, content: impl Into<String>) -> Self {
        self.text(format!("- {}\n", content.into()))
    }

    /// Add multiple bullet points
    pub fn bullets<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self = self.bullet(item);
        }
        self
    }

    /// Add a labelled bullet (`- Label: value`)
    pub fn field(self, label: &str, value: impl std::fmt::Display) -> Self {
        self.bullet(format!("{label}: {value}"))
    }

    /// Add a labelled bullet only when a value is present
    pub fn optional_field<T: std::fmt::Display>(self, label: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.field(label, value),
            None => self,
        }
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        self.parts.concat()
    }
}
