//! Command line interface.

use clap::{Parser, Subcommand};

use crate::config::loader::ConfigOverrides;
use crate::config::schema::RunMode;

#[derive(Debug, Parser)]
#[command(name = "oxidp")]
#[command(about = "OpenID Connect identity provider", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the server in production mode
    Start(ConfigOverrides),

    /// Start the server in development mode (relaxed hostname checks)
    StartDev(ConfigOverrides),
}

impl Command {
    pub fn run_mode(&self) -> RunMode {
        match self {
            Command::Start(_) => RunMode::Production,
            Command::StartDev(_) => RunMode::Development,
        }
    }

    pub fn overrides(&self) -> &ConfigOverrides {
        match self {
            Command::Start(overrides) | Command::StartDev(overrides) => overrides,
        }
    }
}
