//! Headline and full-story prompts

use crate::models::CompanyProfile;
use crate::money::Currency;
use newsletter_prompt::{JinjaTemplate, PromptBuilder, Result};

const HEADLINE_TEMPLATE: &str = "Write one catchy, punchy newsletter headline about {{ company }}\
{% if core_offering %} ({{ core_offering }}){% endif %}. \
{% if point %}Angle it on this insight: {{ point }}. {% endif %}\
Return only the headline text in under 15 words, without quotes or markdown.";

const NOT_AVAILABLE: &str = "No data available";

/// Create the headline template (`company`, optional `core_offering` and `point`)
pub fn headline_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new("newsletter.headline", HEADLINE_TEMPLATE)
}

/// Build the full-story prompt around an accepted headline
pub fn story_prompt(
    company: &str,
    headline: &str,
    profile: &CompanyProfile,
    currency: Currency,
) -> String {
    let context = &profile.context;
    let metrics = &profile.metrics;
    let model = &profile.business_model;

    let has_metrics = metrics.revenue.is_some()
        || metrics.funding.is_some()
        || metrics.market_share.is_some()
        || metrics.growth_rate.is_some();
    let has_model = model.core_offering.is_some()
        || model.unit_economics.is_some()
        || !model.channels.is_empty()
        || !model.partnerships.is_empty();
    let has_context = context.market_size.is_some()
        || !context.key_players.is_empty()
        || !context.recent_developments.is_empty();

    PromptBuilder::new()
        .text(format!(
            "You are a business journalist writing a newsletter feature about {company}."
        ))
        .blank_line()
        .text(format!("Headline: {headline}"))
        .newline()
        .section("Market Context")
        .optional_field("Market size", context.market_size.as_deref())
        .when(
            !context.key_players.is_empty(),
            format!("- Key players: {}\n", context.key_players.join(", ")),
        )
        .when(
            !context.recent_developments.is_empty(),
            format!(
                "- Recent developments: {}\n",
                context.recent_developments.join("; ")
            ),
        )
        .when(!has_context, format!("- {NOT_AVAILABLE}\n"))
        .section("Key Metrics")
        .optional_field("Revenue", metrics.revenue.map(|v| currency.format(v)))
        .optional_field("Funding", metrics.funding.map(|v| currency.format(v)))
        .optional_field("Market share", metrics.market_share.map(percent))
        .optional_field("Growth rate", metrics.growth_rate.map(percent))
        .when(!has_metrics, format!("- {NOT_AVAILABLE}\n"))
        .section("Business Model")
        .optional_field("Core offering", model.core_offering.as_deref())
        .optional_field("Unit economics", model.unit_economics.as_deref())
        .when(
            !model.channels.is_empty(),
            format!("- Channels: {}\n", model.channels.join(", ")),
        )
        .when(
            !model.partnerships.is_empty(),
            format!("- Partnerships: {}\n", model.partnerships.join(", ")),
        )
        .when(!has_model, format!("- {NOT_AVAILABLE}\n"))
        .section("Analysis Points")
        .bullets(profile.analysis_points.iter().map(String::as_str))
        .when(
            profile.analysis_points.is_empty(),
            format!("- {NOT_AVAILABLE}\n"),
        )
        .blank_line()
        .text(
            "Write a 400-600 word newsletter story under this headline. Use markdown: \
             ## subheadings for each part of the story and **bold** for key figures. \
             Quote figures exactly as given above and do not invent numbers. \
             Do not repeat the headline at the top.",
        )
        .build()
}

fn percent(value: f64) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessModel, Metrics};
    use serde_json::json;

    fn sample_profile() -> CompanyProfile {
        CompanyProfile {
            metrics: Metrics {
                revenue: Some(5_000_000_000.0),
                growth_rate: Some(38.5),
                ..Default::default()
            },
            business_model: BusinessModel {
                core_offering: Some("Discount brokerage".to_string()),
                channels: vec!["Mobile app".to_string(), "Web".to_string()],
                ..Default::default()
            },
            analysis_points: vec!["Bootstrapped and profitable".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_headline_prompt_optional_parts() {
        let template = headline_prompt().unwrap();

        let bare = template.render(&json!({ "company": "Zerodha" })).unwrap();
        assert!(bare.starts_with("Write one catchy, punchy newsletter headline about Zerodha."));
        assert!(!bare.contains("Angle it"));

        let full = template
            .render(&json!({
                "company": "Zerodha",
                "core_offering": "Discount brokerage",
                "point": "Bootstrapped"
            }))
            .unwrap();
        assert!(full.contains("Zerodha (Discount brokerage)."));
        assert!(full.contains("Angle it on this insight: Bootstrapped."));
    }

    #[test]
    fn test_story_prompt_sections_and_currency() {
        let prompt = story_prompt("Zerodha", "The Quiet Giant", &sample_profile(), Currency::Inr);

        assert!(prompt.contains("Headline: The Quiet Giant"));
        for section in ["Market Context", "Key Metrics", "Business Model", "Analysis Points"] {
            assert!(prompt.contains(&format!("## {section}")), "missing {section}");
        }
        assert!(prompt.contains("- Revenue: ₹500 crores"));
        assert!(prompt.contains("- Growth rate: 38.5%"));
        assert!(prompt.contains("- Channels: Mobile app, Web"));
        assert!(prompt.contains("- Bootstrapped and profitable"));
        assert!(!prompt.contains("- Funding:"));
    }

    #[test]
    fn test_story_prompt_usd() {
        let prompt = story_prompt("Acme", "Acme Soars", &sample_profile(), Currency::Usd);
        assert!(prompt.contains("- Revenue: $5000M"));
    }

    #[test]
    fn test_story_prompt_marks_empty_sections() {
        let prompt = story_prompt("Acme", "Acme Soars", &CompanyProfile::default(), Currency::Inr);
        assert_eq!(prompt.matches("- No data available").count(), 4);
    }
}
