use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::id::unique_id;
use crate::model::{Card, CardPayload, Envelope, RecordKind};
use crate::store::Store;
use crate::validate::{require_data, require_deck_exists, require_fields};

/// List, create, read and delete cards.
#[derive(Debug, Clone)]
pub struct CardService {
    store: Arc<Store>,
}

impl CardService {
    /// Create a card service over a shared store.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Every card, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn list(&self) -> Result<Vec<Card>> {
        self.store.read(|tables| tables.cards.to_vec())
    }

    /// Validate a request body and store a new card.
    ///
    /// The deck check and the append happen under the same lock, so a card
    /// can never be stored against a deck deleted in between.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] or [`Error::FieldRequired`] when the
    /// body is incomplete, and [`Error::DeckReferenceNotFound`] when
    /// `deckId` does not name an existing deck.
    pub fn create(&self, body: Envelope<CardPayload>) -> Result<Card> {
        let payload = require_data(body)?;
        require_fields(&payload)?;
        let front = payload.front.unwrap_or_default();
        let back = payload.back.unwrap_or_default();
        let deck_id = payload.deck_id.unwrap_or_default();

        let card = self.store.write(|tables| {
            require_deck_exists(&deck_id, &tables.decks)?;
            let card = Card {
                id: unique_id(|id| tables.cards.contains(id)),
                front,
                back,
                deck_id,
            };
            tables.cards.append(card.clone());
            Ok(card)
        })?;

        info!("Card with id {} created in deck {}", card.id, card.deck_id);
        Ok(card)
    }

    /// Look up one card.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no card has this id.
    pub fn read(&self, card_id: &str) -> Result<Card> {
        debug!("Looking up card {}", card_id);
        self.store
            .read(|tables| tables.cards.find_by_id(card_id).cloned())?
            .ok_or_else(|| Error::not_found(RecordKind::Card, card_id))
    }

    /// Delete one card.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no card has this id.
    pub fn destroy(&self, card_id: &str) -> Result<()> {
        self.store.write(|tables| {
            if tables.cards.remove_by_id(card_id) {
                Ok(())
            } else {
                Err(Error::not_found(RecordKind::Card, card_id))
            }
        })?;

        info!("Card with id {} deleted.", card_id);
        Ok(())
    }
}
