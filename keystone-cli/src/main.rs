//! Keystone CLI - RBAC administration in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{dashboard, demo, roles, users};

/// Keystone - RBAC administration in your terminal
#[derive(Parser)]
#[command(name = "ks", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    Users {
        #[command(subcommand)]
        command: users::UserCommands,
    },

    /// Manage roles
    Roles {
        #[command(subcommand)]
        command: roles::RoleCommands,
    },

    /// Show summary counts
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Users { command } => users::run(command).await,
        Commands::Roles { command } => roles::run(command).await,
        Commands::Dashboard { json } => dashboard::run(json).await,
        Commands::Demo { command } => demo::run(command),
    }
}
