//! Delights CLI - terminal front-end for the ordering flow.
//!
//! # Usage
//!
//! ```bash
//! # Scripted end-to-end order (add items, checkout, pay, wait for the
//! # countdown to bring you home)
//! delights walkthrough
//!
//! # Same, with the simulated delays shrunk
//! delights walkthrough --fast
//!
//! # Interactive ordering session
//! delights order
//! ```
//!
//! The CLI owns the catalog fixtures and all terminal output; every state
//! change goes through a `delights-flow` session.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;
mod fixtures;
mod render;

#[derive(Parser)]
#[command(name = "delights")]
#[command(author, version, about = "Shoppe Delights ordering flow")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted order from browse to completion
    Walkthrough {
        /// Shrink the simulated gateway delay and countdown tick
        #[arg(long)]
        fast: bool,
    },
    /// Place an order interactively
    Order,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "delights=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Walkthrough { fast } => commands::walkthrough::run(fast).await?,
        Commands::Order => commands::order::run().await?,
    }
    Ok(())
}
