//! CLI module for the briefing gateway
//!
//! Subcommands:
//! - `serve`: run the HTTP API (default)
//! - `providers`: print the provider chain discovered from the environment

pub mod providers;
pub mod serve;

use clap::{Parser, Subcommand};

/// Briefing Gateway - multi-provider AI completion relay
#[derive(Parser)]
#[command(name = "briefing-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default mode)
    Serve(serve::ServeArgs),

    /// Show which completion providers are configured, in fallback order
    Providers(providers::ProvidersArgs),
}

impl Cli {
    /// The requested command, defaulting to `serve`
    pub fn command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Serve(serve::ServeArgs::default()))
    }
}
