use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::id::unique_id;
use crate::model::{Deck, DeckPayload, Envelope, RecordKind};
use crate::store::Store;
use crate::validate::{require_data, require_fields};

/// List, create, read and delete decks.
#[derive(Debug, Clone)]
pub struct DeckService {
    store: Arc<Store>,
}

impl DeckService {
    /// Create a deck service over a shared store.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Every deck, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn list(&self) -> Result<Vec<Deck>> {
        self.store.read(|tables| tables.decks.to_vec())
    }

    /// Validate a request body and store a new deck.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] or [`Error::FieldRequired`] when the
    /// body is incomplete.
    pub fn create(&self, body: Envelope<DeckPayload>) -> Result<Deck> {
        let payload = require_data(body)?;
        require_fields(&payload)?;
        let name = payload.name.unwrap_or_default();
        let description = payload.description.unwrap_or_default();

        let deck = self.store.write(|tables| {
            let deck = Deck {
                id: unique_id(|id| tables.decks.contains(id)),
                name,
                description,
            };
            tables.decks.append(deck.clone());
            Ok(deck)
        })?;

        info!("Deck with id {} created", deck.id);
        Ok(deck)
    }

    /// Look up one deck.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no deck has this id.
    pub fn read(&self, deck_id: &str) -> Result<Deck> {
        debug!("Looking up deck {}", deck_id);
        self.store
            .read(|tables| tables.decks.find_by_id(deck_id).cloned())?
            .ok_or_else(|| Error::not_found(RecordKind::Deck, deck_id))
    }

    /// Delete a deck and every card that belongs to it.
    ///
    /// Returns the number of cards removed with the deck.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no deck has this id.
    pub fn destroy(&self, deck_id: &str) -> Result<usize> {
        let removed_cards = self.store.write(|tables| {
            if !tables.decks.remove_by_id(deck_id) {
                return Err(Error::not_found(RecordKind::Deck, deck_id));
            }
            Ok(tables.cards.remove_where(|card| card.deck_id == deck_id))
        })?;

        info!(cards = removed_cards, "Deck with id {} deleted.", deck_id);
        Ok(removed_cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Card;
    use crate::store::StoreStats;
    use std::collections::HashSet;

    fn service() -> (Arc<Store>, DeckService) {
        let store = Arc::new(Store::new());
        (Arc::clone(&store), DeckService::new(store))
    }

    fn body(name: Option<&str>, description: Option<&str>) -> Envelope<DeckPayload> {
        Envelope::new(DeckPayload {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        })
    }

    fn add_card(store: &Store, id: &str, deck_id: &str) {
        store
            .write(|tables| {
                tables.cards.append(Card {
                    id: id.to_string(),
                    front: "f".to_string(),
                    back: "b".to_string(),
                    deck_id: deck_id.to_string(),
                });
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_create_then_read() {
        let (_, decks) = service();
        let created = decks.create(body(Some("A"), Some("B"))).unwrap();

        assert_eq!(created.name, "A");
        assert_eq!(created.description, "B");
        assert_eq!(decks.read(&created.id).unwrap(), created);
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let (_, decks) = service();
        let ids: HashSet<_> = (0..50)
            .map(|i| {
                decks
                    .create(body(Some(&format!("deck {i}")), Some("x")))
                    .unwrap()
                    .id
            })
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_list_in_insertion_order() {
        let (_, decks) = service();
        decks.create(body(Some("first"), Some("x"))).unwrap();
        decks.create(body(Some("second"), Some("x"))).unwrap();

        let names: Vec<_> = decks.list().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_create_missing_data() {
        let (store, decks) = service();
        let err = decks.create(Envelope { data: None }).unwrap_err();

        assert!(matches!(err, Error::MissingData));
        assert_eq!(store.stats().unwrap().decks, 0);
    }

    #[test]
    fn test_create_missing_name_reported_first() {
        let (_, decks) = service();
        let err = decks.create(body(None, Some("x"))).unwrap_err();
        assert_eq!(err.to_string(), "'name' is required");
    }

    #[test]
    fn test_create_empty_description() {
        let (_, decks) = service();
        let err = decks.create(body(Some("A"), Some(""))).unwrap_err();
        assert_eq!(err.to_string(), "'description' is required");
    }

    #[test]
    fn test_read_missing() {
        let (_, decks) = service();
        let err = decks.read("nope").unwrap_err();
        assert_eq!(err.to_string(), "Deck with id nope not found.");
    }

    #[test]
    fn test_destroy_cascades_only_to_own_cards() {
        let (store, decks) = service();
        let doomed = decks.create(body(Some("A"), Some("x"))).unwrap();
        let kept = decks.create(body(Some("B"), Some("y"))).unwrap();

        add_card(&store, "c1", &doomed.id);
        add_card(&store, "c2", &kept.id);
        add_card(&store, "c3", &doomed.id);

        assert_eq!(decks.destroy(&doomed.id).unwrap(), 2);

        let remaining = store
            .read(|tables| {
                tables
                    .cards
                    .iter()
                    .map(|c| c.id.clone())
                    .collect::<Vec<_>>()
            })
            .unwrap();
        assert_eq!(remaining, vec!["c2"]);
        assert!(decks.read(&doomed.id).is_err());
        assert!(decks.read(&kept.id).is_ok());
    }

    #[test]
    fn test_concurrent_create_and_cascade_keep_references_valid() {
        use crate::model::CardPayload;
        use crate::service::CardService;

        let (store, decks) = service();
        let cards = CardService::new(Arc::clone(&store));
        let deck_ids: Vec<_> = (0..8)
            .map(|i| decks.create(body(Some(&format!("d{i}")), Some("x"))).unwrap().id)
            .collect();

        std::thread::scope(|scope| {
            for deck_id in &deck_ids {
                let cards = cards.clone();
                scope.spawn(move || {
                    for n in 0..50 {
                        // Creation may lose the race against the deck delete.
                        let _ = cards.create(Envelope::new(CardPayload {
                            front: Some(format!("q{n}")),
                            back: Some("a".to_string()),
                            deck_id: Some(deck_id.clone()),
                        }));
                    }
                });
            }
            for deck_id in deck_ids.iter().step_by(2) {
                let decks = decks.clone();
                scope.spawn(move || decks.destroy(deck_id).unwrap());
            }
        });

        store
            .read(|tables| {
                assert_eq!(tables.decks.len(), 4);
                for card in &tables.cards {
                    assert!(tables.decks.contains(&card.deck_id));
                }
            })
            .unwrap();
    }

    #[test]
    fn test_destroy_twice_is_not_found() {
        let (store, decks) = service();
        let deck = decks.create(body(Some("A"), Some("x"))).unwrap();
        decks.create(body(Some("B"), Some("y"))).unwrap();

        decks.destroy(&deck.id).unwrap();
        let before = store.stats().unwrap();

        let err = decks.destroy(&deck.id).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: RecordKind::Deck, .. }));
        assert_eq!(store.stats().unwrap(), before);
        assert_eq!(before, StoreStats { decks: 1, cards: 0 });
    }
}
