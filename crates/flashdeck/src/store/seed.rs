//! Seed data loading.
//!
//! A seed file is a JSON document of the form
//! `{"decks": [Deck...], "cards": [Card...]}`. Both keys are optional.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Tables;
use crate::error::{Error, Result};
use crate::model::{Card, Deck};

/// Records to pre-populate the store with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Decks, in insertion order.
    pub decks: Vec<Deck>,
    /// Cards, in insertion order.
    pub cards: Vec<Card>,
}

impl Seed {
    /// Read a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid seed JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading seed data from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| Error::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Check the seed against the store invariants and build the tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedInvalid`] on duplicate ids, empty fields, or a
    /// card whose deck is not part of the seed.
    pub fn into_tables(self) -> Result<Tables> {
        let mut deck_ids = HashSet::new();
        for deck in &self.decks {
            if deck.id.is_empty() || deck.name.is_empty() || deck.description.is_empty() {
                return Err(Error::seed_invalid(format!(
                    "deck '{}' has an empty field",
                    deck.id
                )));
            }
            if !deck_ids.insert(deck.id.as_str()) {
                return Err(Error::seed_invalid(format!(
                    "duplicate deck id '{}'",
                    deck.id
                )));
            }
        }

        let mut card_ids = HashSet::new();
        for card in &self.cards {
            if card.id.is_empty() || card.front.is_empty() || card.back.is_empty() {
                return Err(Error::seed_invalid(format!(
                    "card '{}' has an empty field",
                    card.id
                )));
            }
            if !card_ids.insert(card.id.as_str()) {
                return Err(Error::seed_invalid(format!(
                    "duplicate card id '{}'",
                    card.id
                )));
            }
            if !deck_ids.contains(card.deck_id.as_str()) {
                return Err(Error::seed_invalid(format!(
                    "card '{}' references unknown deck '{}'",
                    card.id, card.deck_id
                )));
            }
        }

        let mut tables = Tables::default();
        for deck in self.decks {
            tables.decks.append(deck);
        }
        for card in self.cards {
            tables.cards.append(card);
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn deck(id: &str) -> Deck {
        Deck {
            id: id.to_string(),
            name: "Rust".to_string(),
            description: "Ownership".to_string(),
        }
    }

    fn card(id: &str, deck_id: &str) -> Card {
        Card {
            id: id.to_string(),
            front: "What moves?".to_string(),
            back: "Values".to_string(),
            deck_id: deck_id.to_string(),
        }
    }

    #[test]
    fn test_empty_seed() {
        let tables = Seed::default().into_tables().unwrap();
        assert!(tables.decks.is_empty());
        assert!(tables.cards.is_empty());
    }

    #[test]
    fn test_valid_seed() {
        let seed = Seed {
            decks: vec![deck("d1"), deck("d2")],
            cards: vec![card("c1", "d1"), card("c2", "d2")],
        };
        let tables = seed.into_tables().unwrap();
        assert_eq!(tables.decks.len(), 2);
        assert_eq!(tables.cards.len(), 2);
        assert_eq!(tables.cards.find_by_id("c2").unwrap().deck_id, "d2");
    }

    #[test]
    fn test_dangling_card_rejected() {
        let seed = Seed {
            decks: vec![deck("d1")],
            cards: vec![card("c1", "missing")],
        };
        let err = seed.into_tables().unwrap_err();
        assert!(matches!(err, Error::SeedInvalid { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_duplicate_deck_rejected() {
        let seed = Seed {
            decks: vec![deck("d1"), deck("d1")],
            cards: vec![],
        };
        let err = seed.into_tables().unwrap_err();
        assert!(err.to_string().contains("duplicate deck id"));
    }

    #[test]
    fn test_duplicate_card_rejected() {
        let seed = Seed {
            decks: vec![deck("d1")],
            cards: vec![card("c1", "d1"), card("c1", "d1")],
        };
        let err = seed.into_tables().unwrap_err();
        assert!(err.to_string().contains("duplicate card id"));
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut bad = deck("d1");
        bad.name = String::new();
        let seed = Seed {
            decks: vec![bad],
            cards: vec![],
        };
        assert!(seed.into_tables().is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"decks": [{{"id": "d1", "name": "A", "description": "B"}}],
                "cards": [{{"id": "c1", "front": "f", "back": "b", "deckId": "d1"}}]}}"#
        )
        .unwrap();

        let seed = Seed::from_path(file.path()).unwrap();
        assert_eq!(seed.decks.len(), 1);
        assert_eq!(seed.cards[0].deck_id, "d1");
    }

    #[test]
    fn test_from_path_missing_keys_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let seed = Seed::from_path(file.path()).unwrap();
        assert_eq!(seed, Seed::default());
    }

    #[test]
    fn test_from_path_nonexistent() {
        let err = Seed::from_path("/nonexistent/seed.json").unwrap_err();
        assert!(matches!(err, Error::SeedRead { .. }));
    }

    #[test]
    fn test_from_path_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Seed::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
