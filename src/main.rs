//! agentup CLI
//!
//! Command-line interface for installing AI workflow tools and deploying
//! their configuration files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "agentup")]
#[command(
    author,
    version,
    about = "Install AI workflow tools and deploy their configuration files"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check, install and update the managed tools, then deploy configs
    Setup {
        /// Accept every action without prompting
        #[arg(long)]
        yes: bool,
    },

    /// Initialize the current project (requires a git repository)
    Init,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agentup=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Setup { yes } => commands::setup::run(yes),
        Commands::Init => commands::init::run(),
    }
}
