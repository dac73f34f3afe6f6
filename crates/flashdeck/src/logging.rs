//! Logging configuration for flashdeck.
//!
//! This module provides initialization and configuration for the tracing-based
//! logging system used throughout flashdeck.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Pick the default filter directive.
///
/// A configured directive wins over the verbosity flags.
#[must_use]
pub fn default_directive(verbosity: Verbosity, configured: Option<&str>) -> String {
    match configured {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ => format!("flashdeck={}", verbosity.to_level_filter()),
    }
}

/// Initialize the logging system.
///
/// This should be called once at application startup. The filter is chosen
/// from, highest precedence first:
/// 1. The `RUST_LOG` environment variable
/// 2. The `configured` directive (from `logging.level`)
/// 3. The `verbosity` parameter
///
/// # Examples
///
/// ```no_run
/// use flashdeck::{init_logging, logging::Verbosity};
///
/// // Normal verbosity
/// init_logging(Verbosity::Normal, None);
///
/// // Configured directive
/// init_logging(Verbosity::Normal, Some("flashdeck=debug"));
/// ```
pub fn init_logging(verbosity: Verbosity, configured: Option<&str>) {
    let default_filter = default_directive(verbosity, configured);

    // Allow RUST_LOG to override
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_filter))
        .unwrap_or_else(|_| EnvFilter::new(format!("flashdeck={}", verbosity.to_level_filter())));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    // Install the subscriber (ignore error if already set)
    let _ = subscriber.try_init();
}

/// Initialize logging for tests.
///
/// Only warnings and errors are shown to keep test output clean.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
