//! lin-token - Manage the LinkedIn access token and cached identity
//!
//! The access token lives in its own file referenced from the config;
//! the resolved person URN is cached next to it in the data directory.
//! Storing a new token clears the cached identity, since the cache is
//! only valid for the token that produced it.

use clap::{Parser, Subcommand};
use liblincast::config::{resolve_config_path, Config};
use liblincast::error::{ApiError, ConfigError, LincastError, Result};
use liblincast::logging::{LogFormat, LoggingConfig};
use liblincast::service::{ComposeService, EventBus};
use liblincast::IdentityCache;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "lin-token")]
#[command(about = "Manage the LinkedIn access token and cached identity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a new access token
    Set {
        /// Read the token from stdin (for automation/agents)
        #[arg(long)]
        stdin: bool,
    },

    /// Validate the stored token and cache the resolved identity
    Validate,

    /// Show token and identity status (never prints the token itself)
    Show,

    /// Remove the cached identity
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        liblincast::logging::init_default();
    }

    if let Err(e) = run_command(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Set { stdin } => set_token(stdin).await,
        Commands::Validate => validate_token().await,
        Commands::Show => show_status(),
        Commands::Clear => clear_identity(),
    }
}

/// Load the config, creating a default one on first use
fn load_or_init_config() -> Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(LincastError::Config(ConfigError::ReadError(_))) => {
            let path = resolve_config_path()?;
            let config = Config::default_config();
            config.save_to_path(&path)?;
            println!("Created default config at {}", path.display());
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

async fn set_token(use_stdin: bool) -> Result<()> {
    let token = if use_stdin || !atty::is(atty::Stream::Stdin) {
        let mut input = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut input)
            .map_err(|e| LincastError::InvalidInput(format!("failed to read stdin: {}", e)))?;
        input.trim().to_string()
    } else {
        rpassword::prompt_password("LinkedIn access token: ")
            .map_err(|e| LincastError::InvalidInput(format!("failed to read token: {}", e)))?
            .trim()
            .to_string()
    };

    if token.is_empty() {
        return Err(LincastError::InvalidInput(
            "refusing to store an empty token".to_string(),
        ));
    }

    let config = load_or_init_config()?;
    let token_path = config.token_path()?;

    if let Some(parent) = token_path.parent() {
        std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
    }
    std::fs::write(&token_path, &token).map_err(ConfigError::WriteError)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&token_path, std::fs::Permissions::from_mode(0o600))
            .map_err(ConfigError::WriteError)?;
    }

    // The cached identity belongs to the previous token
    IdentityCache::default_location()?.clear()?;

    println!("Token stored at {}", token_path.display());
    println!("Run 'lin-token validate' to verify it and cache your identity.");
    Ok(())
}

async fn validate_token() -> Result<()> {
    let config = Config::load()?;
    let cache = IdentityCache::default_location()?;
    let service = ComposeService::new(Arc::new(config), cache, EventBus::new(16));

    match service.validate_credential().await {
        Ok(identity) => {
            println!("LinkedIn token is valid");
            println!("Authenticated as {}", identity.urn());
            Ok(())
        }
        Err(LincastError::Api(ApiError::ValidationFailed(reason))) => {
            tracing::debug!("validation failed: {}", reason);
            Err(LincastError::Api(ApiError::ValidationFailed(
                "token is invalid or expired".to_string(),
            )))
        }
        Err(e) => Err(e),
    }
}

fn show_status() -> Result<()> {
    let config = Config::load()?;
    let cache = IdentityCache::default_location()?;

    println!("Token file: {}", config.token_path()?.display());

    match config.read_access_token() {
        Ok(credential) => {
            println!("Token: configured");
            match cache.load(&credential) {
                Some(identity) => println!("Cached identity: {}", identity.urn()),
                None => println!("Cached identity: none (run 'lin-token validate')"),
            }
        }
        Err(_) => {
            println!("Token: not configured");
            println!("Cached identity: none");
        }
    }

    Ok(())
}

fn clear_identity() -> Result<()> {
    let cache = IdentityCache::default_location()?;
    cache.clear()?;
    println!("Cached identity removed");
    Ok(())
}
