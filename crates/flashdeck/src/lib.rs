//! `flashdeck` - A flashcard deck and card HTTP API
//!
//! This library provides an in-memory record store for decks and cards, the
//! services that enforce their validation and referential-integrity rules,
//! and the axum router that exposes them over HTTP.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod id;
pub mod logging;
pub mod model;
pub mod server;
pub mod service;
pub mod store;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Card, Deck, Envelope};
pub use server::AppState;
pub use service::{CardService, DeckService};
pub use store::{Store, StoreStats};
