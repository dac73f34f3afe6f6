//! Error types for flashdeck.
//!
//! Every failure a service can report is a variant of [`Error`]. The HTTP
//! layer never inspects messages; it classifies errors through
//! [`Error::status_code`] and renders them through the [`IntoResponse`]
//! implementation at the bottom of this module.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::model::RecordKind;

/// Message returned to clients for every server-side failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// The main error type for flashdeck operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Request Errors ===
    /// The request body has no `data` key.
    #[error("Body must have 'data' key")]
    MissingData,

    /// A required field is missing or empty.
    #[error("'{field}' is required")]
    FieldRequired {
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// A card references a deck that does not exist.
    #[error("Deck with id {deck_id} does not exist.")]
    DeckReferenceNotFound {
        /// The unresolved deck id.
        deck_id: String,
    },

    /// The request body could not be decoded.
    #[error("{message}")]
    InvalidBody {
        /// Description of the decoding failure.
        message: String,
    },

    /// The request body could not be read, for example because it is too
    /// large.
    #[error("{message}")]
    BodyRejected {
        /// Status reported by the body extractor.
        status: StatusCode,
        /// Description of the rejection.
        message: String,
    },

    // === Lookup Errors ===
    /// No record of the given kind has the given id.
    #[error("{kind} with id {id} not found.")]
    NotFound {
        /// Which collection was searched.
        kind: RecordKind,
        /// The id that was looked up.
        id: String,
    },

    /// No route matches the request path.
    #[error("Route not found: {path}")]
    RouteNotFound {
        /// The original request path.
        path: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Seed Errors ===
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        /// Path to the seed file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The seed data violates a store invariant.
    #[error("invalid seed data: {message}")]
    SeedInvalid {
        /// Description of the violation.
        message: String,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for flashdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for a record of the given kind.
    #[must_use]
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a seed validation error.
    #[must_use]
    pub fn seed_invalid(message: impl Into<String>) -> Self {
        Self::SeedInvalid {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// - Envelope, field, reference and body errors: 400 Bad Request
    /// - Unreadable bodies: the extractor's own status, such as 413
    /// - Missing records and unknown routes: 404 Not Found
    /// - Everything else: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingData
            | Self::FieldRequired { .. }
            | Self::DeckReferenceNotFound { .. }
            | Self::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            Self::BodyRejected { status, .. } => *status,
            Self::NotFound { .. } | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ConfigLoad(_)
            | Self::ConfigValidation { .. }
            | Self::SeedRead { .. }
            | Self::SeedInvalid { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error was caused by the client.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// The message sent to the client.
    ///
    /// Server-side failures never leak their details.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            INTERNAL_SERVER_ERROR.to_string()
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{self}");
        } else {
            warn!(status = status.as_u16(), "{self}");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
