//! Research API prompts

use newsletter_prompt::{JinjaTemplate, Result};

/// System prompt for the research API
pub const RESEARCH_SYSTEM_PROMPT: &str = "You are a meticulous business research analyst. \
You answer with a single valid JSON object and nothing else: no commentary, no markdown.";

const RESEARCH_USER_TEMPLATE: &str = r#"Research the company "{{ company }}" and return strictly formatted JSON with exactly these keys:

{
  "business_model": {
    "core_offering": "string",
    "unit_economics": "string",
    "channels": ["string"],
    "partnerships": ["string"]
  },
  "metrics": {
    "revenue": number,
    "funding": number,
    "market_share": number,
    "growth_rate": number
  },
  "context": {
    "market_size": "string",
    "key_players": ["string"],
    "recent_developments": ["string"]
  },
  "analysis_points": ["string"]
}

Rules:
- revenue and funding are raw amounts in {{ currency | upper }} (for example 5000000000), not abbreviated
- market_share and growth_rate are percentages as plain numbers (for example 12.5)
- use null for any figure you cannot find
- do not wrap the JSON in code fences"#;

/// Create the research user message template (`company`, `currency`)
pub fn research_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new("newsletter.research", RESEARCH_USER_TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_research_prompt_names_required_keys() {
        let prompt = research_prompt()
            .unwrap()
            .render(&json!({ "company": "Zerodha", "currency": "inr" }))
            .unwrap();

        assert!(prompt.contains("\"Zerodha\""));
        assert!(prompt.contains("raw amounts in INR"));
        for key in ["business_model", "metrics", "context", "analysis_points"] {
            assert!(prompt.contains(key), "missing {key}");
        }
    }
}
