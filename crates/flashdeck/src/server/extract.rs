//! Request body extraction.
//!
//! Bodies are decoded into an [`Envelope`] regardless of `Content-Type`. An
//! empty body decodes to an envelope without `data`, so clients that forget
//! the body get the same "missing data" error as clients that send `{}`.
//!
//! `data` follows JavaScript truthiness: `null`, `false`, `0` and `""` count
//! as absent. Any other non-object value is treated as an object with no
//! fields, so the first required field is reported as missing.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::Envelope;

/// Decode raw body bytes into an envelope.
///
/// # Errors
///
/// Returns [`Error::InvalidBody`] if the bytes are not JSON, or if `data`
/// is an object whose fields have the wrong types.
pub fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<Envelope<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Envelope { data: None });
    }

    let body: Value = serde_json::from_slice(bytes).map_err(invalid_body)?;
    let data = match body {
        Value::Object(mut map) => map.remove("data"),
        _ => None,
    };

    match data {
        Some(value) if !is_falsy(&value) => {
            let object = match value {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            serde_json::from_value(Value::Object(object))
                .map(Envelope::new)
                .map_err(invalid_body)
        }
        _ => Ok(Envelope { data: None }),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn invalid_body(err: serde_json::Error) -> Error {
    Error::InvalidBody {
        message: format!("Invalid JSON body: {err}"),
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Envelope<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::BodyRejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        decode_envelope(&bytes)
    }
}
