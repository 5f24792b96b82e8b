//! docchat - chat with a local model about your documents
//!
#![doc = "docchat - chat with a local model about your documents"]
#![doc = "Main entry point for the docchat application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docchat::cli::{Cli, Commands};
use docchat::commands;
use docchat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { file } => {
            if let Some(path) = &file {
                tracing::debug!("Uploading {} before the first prompt", path.display());
            }
            commands::chat::run_chat(config, file).await?;
            Ok(())
        }
        Commands::Summarize { path, output } => {
            commands::summarize::run_summarize(config, &path, &output).await?;
            Ok(())
        }
        Commands::Extract { path } => {
            tracing::debug!("Extracting text from {}", path.display());
            commands::extract::run_extract(&config, &path)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "docchat=debug" } else { "docchat=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
