//! Domain types for the newsletter pipeline

use crate::error::{AssemblerError, Result};
use serde::{Deserialize, Serialize};

/// Market context around a company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Total addressable market, free text ("$20B by 2030")
    #[serde(default, deserialize_with = "lenient::text")]
    pub market_size: Option<String>,

    /// Major competitors
    #[serde(default, deserialize_with = "lenient::list")]
    pub key_players: Vec<String>,

    /// Recent news
    #[serde(default, deserialize_with = "lenient::list")]
    pub recent_developments: Vec<String>,
}

/// Financial metrics, raw amounts in the reporting currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, deserialize_with = "lenient::number")]
    pub revenue: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub funding: Option<f64>,

    /// Percentage points
    #[serde(default, deserialize_with = "lenient::number")]
    pub market_share: Option<f64>,

    /// Percentage points
    #[serde(default, deserialize_with = "lenient::number")]
    pub growth_rate: Option<f64>,
}

/// How the company makes money
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessModel {
    #[serde(default, deserialize_with = "lenient::text")]
    pub core_offering: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub unit_economics: Option<String>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub channels: Vec<String>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub partnerships: Vec<String>,
}

/// Structured description of a company
///
/// Every field is optional; a missing or `null` field takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub context: MarketContext,

    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub metrics: Metrics,

    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub business_model: BusinessModel,

    #[serde(default, deserialize_with = "lenient::list")]
    pub analysis_points: Vec<String>,
}

impl CompanyProfile {
    /// Whether nothing at all is known about the company
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A generated article about one company
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub profile: CompanyProfile,
    pub headline: String,
    pub body: String,
}

impl Story {
    /// Create a story, rejecting an empty headline
    pub fn new(
        profile: CompanyProfile,
        headline: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let headline = headline.into();
        if headline.trim().is_empty() {
            return Err(AssemblerError::Generation(
                "headline must not be empty".to_string(),
            ));
        }
        Ok(Self {
            profile,
            headline,
            body: body.into(),
        })
    }
}

/// Response payload of the newsletter endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedOutput {
    /// Story text as generated
    pub story: String,

    /// HTML rendering, empty when the story has no markdown
    pub html_content: String,

    pub is_markdown: bool,

    /// Acquisition failure text; `null` on success
    pub raw_api_response: Option<String>,
}

impl RenderedOutput {
    /// Empty newsletter carrying the acquisition failure text
    pub fn acquisition_failed(diagnostic: impl Into<String>) -> Self {
        Self {
            raw_api_response: Some(diagnostic.into()),
            ..Self::default()
        }
    }
}

/// Newsletter request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterRequest {
    pub company_name: String,

    /// Pre-researched profile; skips the research lookup when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_data: Option<CompanyProfile>,
}

impl NewsletterRequest {
    /// Request for a company that still needs researching
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            company_data: None,
        }
    }

    /// Attach a pre-researched profile
    #[must_use]
    pub fn with_company_data(mut self, profile: CompanyProfile) -> Self {
        self.company_data = Some(profile);
        self
    }
}

/// Deserializers tolerant of how research providers format JSON
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number, numeric string (`"1,200,000"`) or anything else as absent
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            _ => None,
        })
    }

    /// String, or a scalar rendered as one; blank means absent
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
    }

    /// Array of scalars, or a single scalar as a one-element list
    pub fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => items.into_iter().filter_map(scalar_text).collect(),
            Some(value) => scalar_text(value).into_iter().collect(),
            None => Vec::new(),
        })
    }

    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_defaults_for_missing_fields() {
        let profile: CompanyProfile =
            serde_json::from_value(json!({ "metrics": { "revenue": 5_000_000_000_u64 } })).unwrap();

        assert_eq!(profile.metrics.revenue, Some(5_000_000_000.0));
        assert_eq!(profile.metrics.funding, None);
        assert!(profile.context.key_players.is_empty());
        assert!(profile.business_model.core_offering.is_none());
        assert!(profile.analysis_points.is_empty());
        assert!(!profile.is_empty());
    }

    #[test]
    fn test_profile_from_empty_object_is_empty() {
        let profile: CompanyProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_profile_nulls_are_absent() {
        let profile: CompanyProfile = serde_json::from_value(json!({
            "context": null,
            "metrics": { "revenue": null, "growth_rate": null },
            "business_model": { "channels": null },
            "analysis_points": null
        }))
        .unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_lenient_numbers() {
        let metrics: Metrics = serde_json::from_value(json!({
            "revenue": "5,000,000",
            "funding": "not disclosed",
            "market_share": 12.5,
            "growth_rate": " 40 "
        }))
        .unwrap();

        assert_eq!(metrics.revenue, Some(5_000_000.0));
        assert_eq!(metrics.funding, None);
        assert_eq!(metrics.market_share, Some(12.5));
        assert_eq!(metrics.growth_rate, Some(40.0));
    }

    #[test]
    fn test_lenient_lists_and_text() {
        let model: BusinessModel = serde_json::from_value(json!({
            "core_offering": "  Discount brokerage ",
            "unit_economics": "",
            "channels": "Mobile app",
            "partnerships": ["NSE", 42, null, " "]
        }))
        .unwrap();

        assert_eq!(model.core_offering.as_deref(), Some("Discount brokerage"));
        assert_eq!(model.unit_economics, None);
        assert_eq!(model.channels, vec!["Mobile app"]);
        assert_eq!(model.partnerships, vec!["NSE", "42"]);
    }

    #[test]
    fn test_wrong_shape_for_nested_object_is_an_error() {
        let result = serde_json::from_value::<CompanyProfile>(json!({ "metrics": "lots" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_story_requires_headline() {
        let err = Story::new(CompanyProfile::default(), "   ", "body").unwrap_err();
        assert!(matches!(err, AssemblerError::Generation(_)));

        let story = Story::new(CompanyProfile::default(), "Big news", "body").unwrap();
        assert_eq!(story.headline, "Big news");
    }

    #[test]
    fn test_rendered_output_wire_shape() {
        let output = RenderedOutput {
            story: "## Hi".to_string(),
            html_content: "<h2>Hi</h2>".to_string(),
            is_markdown: true,
            raw_api_response: None,
        };

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "story": "## Hi",
                "htmlContent": "<h2>Hi</h2>",
                "isMarkdown": true,
                "rawApiResponse": null
            })
        );
    }

    #[test]
    fn test_acquisition_failed_output() {
        let output = RenderedOutput::acquisition_failed("Failed to parse research response: eof");
        assert_eq!(output.story, "");
        assert_eq!(output.html_content, "");
        assert!(!output.is_markdown);
        assert_eq!(
            output.raw_api_response.as_deref(),
            Some("Failed to parse research response: eof")
        );
    }

    #[test]
    fn test_request_deserialization() {
        let request: NewsletterRequest =
            serde_json::from_value(json!({ "company_name": "Zerodha" })).unwrap();
        assert_eq!(request, NewsletterRequest::new("Zerodha"));

        let request: NewsletterRequest = serde_json::from_value(json!({
            "company_name": "Zerodha",
            "company_data": { "analysis_points": ["Profitable since 2012"] }
        }))
        .unwrap();
        let data = request.company_data.unwrap();
        assert_eq!(data.analysis_points, vec!["Profitable since 2012"]);
    }
}
