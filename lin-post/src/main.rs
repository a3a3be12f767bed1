//! lin-post - Publish a text post to LinkedIn

use std::sync::Arc;

use clap::Parser;
use liblincast::config::Config;
use liblincast::error::{ApiError, LincastError, Result};
use liblincast::logging::{LogFormat, LoggingConfig};
use liblincast::service::{ComposeService, EventBus};
use liblincast::IdentityCache;

#[derive(Parser, Debug)]
#[command(name = "lin-post")]
#[command(about = "Publish a text post to the authenticated member's LinkedIn feed", long_about = None)]
struct Cli {
    /// Content to post (reads from stdin if not provided)
    content: Option<String>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // --verbose forces diagnostics on; otherwise env vars decide
    if cli.verbose {
        LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        liblincast::logging::init_default();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", notice(&e));
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let content = read_content(cli.content)?;

    let config = Config::load()?;
    let cache = IdentityCache::default_location()?;
    let service = ComposeService::new(Arc::new(config), cache, EventBus::new(16));

    let receipt = service.publish(&content).await?;

    match cli.format.as_str() {
        "json" => println!(
            "{}",
            serde_json::json!({
                "status": receipt.status,
                "posted_at": receipt.posted_at,
            })
        ),
        _ => println!("Post published to LinkedIn"),
    }

    Ok(())
}

/// Single-line user notice for a failed publish
fn notice(error: &LincastError) -> String {
    match error {
        LincastError::Api(ApiError::CredentialMissing) => {
            "no LinkedIn access token configured. Set one with 'lin-token set'.".to_string()
        }
        LincastError::Api(ApiError::ValidationFailed(_)) => {
            "LinkedIn token is invalid or expired. Update it with 'lin-token set'.".to_string()
        }
        other => other.to_string(),
    }
}

fn read_content(arg: Option<String>) -> Result<String> {
    if let Some(content) = arg {
        return Ok(content);
    }

    if atty::is(atty::Stream::Stdin) {
        return Err(LincastError::InvalidInput(
            "no content provided. Pass it as an argument or pipe it on stdin".to_string(),
        ));
    }

    let mut content = String::new();
    std::io::Read::read_to_string(&mut std::io::stdin(), &mut content)
        .map_err(|e| LincastError::InvalidInput(format!("failed to read stdin: {}", e)))?;
    Ok(content)
}
