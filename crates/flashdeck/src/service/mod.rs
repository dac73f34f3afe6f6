//! Deck and card services.
//!
//! Services own the business rules: validation order, id assignment,
//! referential integrity and the deck-to-card delete cascade. They share one
//! [`Store`](crate::store::Store) and never hold records outside it.

mod cards;
mod decks;

pub use cards::CardService;
pub use decks::DeckService;
