//! Command-line interface for the newsletter assembler
//!
//! Runs the pipeline once and prints the result.
//!
//! ```bash
//! export RESEARCH_API_KEY="pplx-..."
//! export OPENAI_API_KEY="sk-..."
//!
//! newsletter Zerodha
//! newsletter Zerodha --data zerodha.json --format html > zerodha.html
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use newsletter_assembler::{
    AssemblerConfig, CompanyProfile, Currency, NewsletterAssembler, NewsletterRequest,
    RenderedOutput,
};
use newsletter_utils::{LogFormat, init_tracing};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full response payload as JSON
    Json,
    /// Rendered HTML, falling back to the story text
    Html,
    /// Story text only
    Story,
}

#[derive(Parser, Debug)]
#[command(name = "newsletter", version)]
#[command(about = "Write a newsletter article about a company", long_about = None)]
struct Args {
    /// Company to write about
    company: String,

    /// JSON file with pre-researched company data (skips the research API)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Currency for monetary figures, overriding NEWSLETTER_CURRENCY
    #[arg(long)]
    currency: Option<Currency>,

    /// Log output format (pretty or json)
    #[arg(long, env = "NEWSLETTER_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let mut config = AssemblerConfig::from_env().context("invalid newsletter configuration")?;
    if let Some(currency) = args.currency {
        config.currency = currency;
    }

    let company_data = args
        .data
        .as_deref()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<CompanyProfile>(&text)
                .with_context(|| format!("{} is not valid company data", path.display()))
        })
        .transpose()?;

    let assembler =
        NewsletterAssembler::from_config(&config).context("failed to build newsletter pipeline")?;

    info!(company = %args.company, "Assembling newsletter");
    let request = match company_data {
        Some(profile) => NewsletterRequest::new(args.company).with_company_data(profile),
        None => NewsletterRequest::new(args.company),
    };
    let output = assembler
        .assemble(request)
        .await
        .context("Failed to generate newsletter")?;

    if let Some(diagnostic) = &output.raw_api_response {
        warn!(diagnostic = %diagnostic, "Company research failed, newsletter is empty");
    }

    println!("{}", format_output(&output, args.format)?);
    Ok(())
}

fn format_output(output: &RenderedOutput, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(output)?,
        OutputFormat::Html if output.is_markdown => output.html_content.clone(),
        OutputFormat::Html | OutputFormat::Story => output.story.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn markdown_output() -> RenderedOutput {
        RenderedOutput {
            story: "## Origins".to_string(),
            html_content: "<h2>Origins</h2>".to_string(),
            is_markdown: true,
            raw_api_response: None,
        }
    }

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "newsletter",
            "Zerodha",
            "--format",
            "html",
            "--currency",
            "usd",
        ])
        .unwrap();

        assert_eq!(args.company, "Zerodha");
        assert_eq!(args.format, OutputFormat::Html);
        assert_eq!(args.currency, Some(Currency::Usd));
        assert!(args.data.is_none());
    }

    #[test]
    fn test_format_output() {
        let output = markdown_output();
        assert_eq!(
            format_output(&output, OutputFormat::Html).unwrap(),
            "<h2>Origins</h2>"
        );
        assert_eq!(
            format_output(&output, OutputFormat::Story).unwrap(),
            "## Origins"
        );

        let json = format_output(&output, OutputFormat::Json).unwrap();
        assert!(json.contains("\"htmlContent\": \"<h2>Origins</h2>\""));
    }

    #[test]
    fn test_html_falls_back_to_story() {
        let output = RenderedOutput {
            story: "Plain text".to_string(),
            ..Default::default()
        };
        assert_eq!(
            format_output(&output, OutputFormat::Html).unwrap(),
            "Plain text"
        );
    }
}
