//! Newsletter HTTP server
//!
//! Usage:
//!   RESEARCH_API_KEY=... OPENAI_API_KEY=... newsletter-server --port 3000

use anyhow::Context;
use clap::Parser;
use newsletter_assembler::{AssemblerConfig, NewsletterAssembler};
use newsletter_server::{AppState, ServerConfig, create_app};
use newsletter_utils::{LogFormat, init_tracing};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "newsletter-server", version)]
#[command(about = "Serve the company newsletter API", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "NEWSLETTER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "NEWSLETTER_PORT", default_value_t = 3000)]
    port: u16,

    /// Log output format (pretty or json)
    #[arg(long, env = "NEWSLETTER_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let config = AssemblerConfig::from_env().context("invalid newsletter configuration")?;
    let assembler =
        NewsletterAssembler::from_config(&config).context("failed to build newsletter pipeline")?;

    let server = ServerConfig {
        host: args.host,
        port: args.port,
    };
    let listener = tokio::net::TcpListener::bind(server.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr()))?;

    info!(
        addr = %server.bind_addr(),
        research_model = %config.research.model,
        generation_model = %config.generation.model,
        currency = %config.currency,
        "Newsletter server listening"
    );

    axum::serve(listener, create_app(AppState::new(assembler)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Newsletter server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
