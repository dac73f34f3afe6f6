//! `flashdeck` - CLI for the flashdeck API server
//!
//! This binary loads configuration, builds the record store and serves the
//! deck and card API over HTTP.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use flashdeck::cli::{Cli, Command, ConfigCommand, ServeCommand};
use flashdeck::server::{self, AppState};
use flashdeck::{init_logging, Config, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    // Initialize logging based on verbosity and the configured level
    init_logging(cli.verbosity(), config.logging.level.as_deref());

    // Execute the command
    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, &serve_cmd).await,
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn handle_serve(config: Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    let config = cmd.apply(config);
    config.validate().context("invalid command-line overrides")?;

    let store = match &config.store.seed_path {
        Some(path) => Store::seeded(path)
            .with_context(|| format!("failed to seed store from {}", path.display()))?,
        None => Store::new(),
    };
    let state = AppState::new(Arc::new(store));

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    server::serve(listener, state, server::shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!();
                println!("[Store]");
                match &config.store.seed_path {
                    Some(path) => println!("  Seed file:          {}", path.display()),
                    None => println!("  Seed file:          (none)"),
                }
                println!();
                println!("[Logging]");
                println!(
                    "  Level:              {}",
                    config.logging.level.as_deref().unwrap_or("(from verbosity)")
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
