//! Cloud Cost Optimizer CLI
//!
//! A command-line tool for querying suggestions, inspecting the simulated
//! fleet and managing the suggestion store.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{resources, suggestions};

/// Cloud Cost Optimizer CLI
#[derive(Parser)]
#[command(name = "cco")]
#[command(author, version, about = "CLI for the Cloud Cost Optimizer", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via CCO_API_URL env var)
    #[arg(long, env = "CCO_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List current cost-optimization suggestions
    Suggestions {
        /// Filter by severity (critical, warning, info)
        #[arg(long, short)]
        severity: Option<String>,

        /// Filter by resource id
        #[arg(long, short)]
        resource: Option<String>,
    },

    /// List simulated resources, or show one by id
    Resources {
        /// Resource id to show
        id: Option<String>,
    },

    /// Show the snapshot history recorded for a resource
    History {
        /// Resource id
        id: String,
    },

    /// Clear all stored suggestions
    Clear,

    /// Show which suggestion sink is active
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Suggestions { severity, resource } => {
            suggestions::list_suggestions(&client, severity, resource, cli.format).await?;
        }
        Commands::Resources { id } => match id {
            Some(id) => resources::show_resource(&client, &id, cli.format).await?,
            None => resources::list_resources(&client, cli.format).await?,
        },
        Commands::History { id } => {
            resources::show_history(&client, &id, cli.format).await?;
        }
        Commands::Clear => {
            suggestions::clear_suggestions(&client).await?;
        }
        Commands::Status => {
            suggestions::show_status(&client, cli.format).await?;
        }
    }

    Ok(())
}
