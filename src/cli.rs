//! CLI definitions for propsearch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// propsearch CLI.
#[derive(Parser)]
#[command(name = "propsearch")]
#[command(about = "Hybrid structured and semantic property search")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "config/propsearch.toml",
        global = true,
        env = "PROPSEARCH_CONFIG"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one search and print the JSON response
    Query {
        /// Free-text query, e.g. "3 BHK in Hinjewadi under 80 lakhs"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Load a JSON array of property records into the configured store
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Validate the configuration file and report problems
    CheckConfig,
}
