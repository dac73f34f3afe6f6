//! Request validation.
//!
//! All checks are pure functions over already-decoded input. They run in a
//! fixed order (envelope, required fields, references) and the first failure
//! short-circuits the rest.

use crate::error::{Error, Result};
use crate::model::{Deck, Envelope, Payload};
use crate::store::Collection;

/// Unwrap the `data` key of a request body.
///
/// # Errors
///
/// Returns [`Error::MissingData`] if the key is absent or `null`.
pub fn require_data<T>(envelope: Envelope<T>) -> Result<T> {
    envelope.data.ok_or(Error::MissingData)
}

/// Check that every required field of `payload` is present and non-empty.
///
/// Fields are checked in [`Payload::REQUIRED`] order and only the first
/// missing one is reported.
///
/// # Errors
///
/// Returns [`Error::FieldRequired`] naming the first missing field.
pub fn require_fields<P: Payload>(payload: &P) -> Result<()> {
    match P::REQUIRED
        .iter()
        .find(|name| payload.field(name).map_or(true, str::is_empty))
    {
        Some(&field) => Err(Error::FieldRequired { field }),
        None => Ok(()),
    }
}

/// Check that `deck_id` names an existing deck.
///
/// # Errors
///
/// Returns [`Error::DeckReferenceNotFound`] if no deck has that id.
pub fn require_deck_exists(deck_id: &str, decks: &Collection<Deck>) -> Result<()> {
    if decks.contains(deck_id) {
        Ok(())
    } else {
        Err(Error::DeckReferenceNotFound {
            deck_id: deck_id.to_string(),
        })
    }
}
