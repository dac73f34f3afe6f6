//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::Config;

/// Serve command arguments.
#[derive(Debug, Default, Args)]
pub struct ServeCommand {
    /// Address to bind to (overrides `server.host`)
    #[arg(long, value_name = "IP")]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// JSON file to seed the store from (overrides `store.seed_path`)
    #[arg(short, long, value_name = "FILE")]
    pub seed: Option<PathBuf>,
}

impl ServeCommand {
    /// Apply command-line overrides on top of the loaded configuration.
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(seed) = &self.seed {
            config.store.seed_path = Some(seed.clone());
        }
        config
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        file: Option<PathBuf>,
    },
}
