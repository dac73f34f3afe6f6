//! Core record types for flashdeck.
//!
//! This module defines the two stored record types, [`Deck`] and [`Card`],
//! and the request payloads used to create them.

use serde::{Deserialize, Serialize};

/// Which collection a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A deck of cards.
    Deck,
    /// A single flashcard.
    Card,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deck => write!(f, "Deck"),
            Self::Card => write!(f, "Card"),
        }
    }
}

/// A record that can be stored in a [`Collection`](crate::store::Collection).
pub trait Record: Clone {
    /// The collection this record type belongs to.
    const KIND: RecordKind;

    /// The record's unique identifier.
    fn id(&self) -> &str;
}

/// A named collection grouping related flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Unique identifier, assigned at creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the deck is about.
    pub description: String,
}

impl Record for Deck {
    const KIND: RecordKind = RecordKind::Deck;

    fn id(&self) -> &str {
        &self.id
    }
}

/// A single flashcard belonging to one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier, assigned at creation.
    pub id: String,
    /// The prompt side.
    pub front: String,
    /// The answer side.
    pub back: String,
    /// Id of the owning deck.
    #[serde(rename = "deckId")]
    pub deck_id: String,
}

impl Record for Card {
    const KIND: RecordKind = RecordKind::Card;

    fn id(&self) -> &str {
        &self.id
    }
}

/// The `{ "data": ... }` wrapper every mutating request body uses.
///
/// `data` is optional so a missing key can be reported as its own error
/// instead of a generic decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope<T> {
    /// The wrapped payload, absent when the key is missing or `null`.
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Wrap a payload.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self { data: Some(data) }
    }
}

/// A payload whose required fields can be looked up by wire name.
pub trait Payload {
    /// Wire names of the required fields, in checking order.
    const REQUIRED: &'static [&'static str];

    /// The value of a field, if present.
    fn field(&self, name: &str) -> Option<&str>;
}

/// Request payload for creating a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeckPayload {
    /// Deck name.
    pub name: Option<String>,
    /// Deck description.
    pub description: Option<String>,
}

impl Payload for DeckPayload {
    const REQUIRED: &'static [&'static str] = &["name", "description"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

/// Request payload for creating a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardPayload {
    /// Prompt side.
    pub front: Option<String>,
    /// Answer side.
    pub back: Option<String>,
    /// Owning deck.
    #[serde(rename = "deckId")]
    pub deck_id: Option<String>,
}

impl Payload for CardPayload {
    const REQUIRED: &'static [&'static str] = &["front", "back", "deckId"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "front" => self.front.as_deref(),
            "back" => self.back.as_deref(),
            "deckId" => self.deck_id.as_deref(),
            _ => None,
        }
    }
}
