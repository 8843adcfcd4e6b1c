//! propsearch - hybrid structured and semantic property search
//!
//! Main entry point for the propsearch CLI and server.

mod cli;
mod cmd_import;
mod cmd_query;
mod register;
mod server;

use std::path::Path;

use clap::Parser;

use propsearch_config::{Config, ConfigError, ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

const DEFAULT_CONFIG_PATH: &str = "config/propsearch.toml";

/// The default path may be absent; an explicitly chosen one must exist.
fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path == Path::new(DEFAULT_CONFIG_PATH) {
        ConfigLoader::load_or_default(path)
    } else {
        ConfigLoader::load(path)
    }
}

/// Validate, print every finding, and fail on errors.
fn check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for error in &result.errors {
        eprintln!("error: {}: {}", error.path, error.message);
    }
    for warning in &result.warnings {
        eprintln!("warning: {}: {}", warning.path, warning.message);
    }
    result.ensure_valid()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;

    if let Some(Commands::CheckConfig) = cli.command {
        check_config(&config)?;
        println!("{}: OK", cli.config.display());
        return Ok(());
    }

    server::init_tracing(&config.logging)?;
    for warning in ConfigValidator::validate(&config)?.ensure_valid()? {
        tracing::warn!("{}: {}", warning.path, warning.message);
    }

    match cli.command {
        None => server::run_server(config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::run_server(config).await
        }
        Some(Commands::Query { text }) => cmd_query::run_query(config, &text).await,
        Some(Commands::Import { file }) => cmd_import::run_import(config, &file).await,
        Some(Commands::CheckConfig) => Ok(()),
    }
}
