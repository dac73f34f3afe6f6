//! Record store for flashdeck.
//!
//! The store owns both record collections and is the only writer. Both
//! collections sit behind a single lock, so every operation the services
//! perform, including a deck delete and its card cascade, is observed by
//! other requests either entirely or not at all.

mod collection;
pub mod seed;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Card, Deck};

pub use collection::Collection;
pub use seed::Seed;

/// Both record collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    /// Every deck, in insertion order.
    pub decks: Collection<Deck>,
    /// Every card, in insertion order.
    pub cards: Collection<Card>,
}

/// Process-wide record store.
///
/// Constructed once at start-up and shared by the services through an
/// `Arc`.
#[derive(Debug, Default)]
pub struct Store {
    tables: Mutex<Tables>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or violates the store
    /// invariants.
    pub fn seeded(path: impl AsRef<Path>) -> Result<Self> {
        let tables = Seed::from_path(path.as_ref())?.into_tables()?;
        info!(
            decks = tables.decks.len(),
            cards = tables.cards.len(),
            "Seeded store from {}",
            path.as_ref().display()
        );
        Ok(Self::from_tables(tables))
    }

    /// Create a store around existing tables.
    #[must_use]
    pub fn from_tables(tables: Tables) -> Self {
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Run `f` with shared access to the tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R> {
        let tables = self.lock()?;
        Ok(f(&tables))
    }

    /// Run `f` with exclusive access to the tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned, or whatever `f` returns.
    pub fn write<R>(&self, f: impl FnOnce(&mut Tables) -> Result<R>) -> Result<R> {
        let mut tables = self.lock()?;
        f(&mut tables)
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn stats(&self) -> Result<StoreStats> {
        self.read(|tables| StoreStats {
            decks: tables.decks.len(),
            cards: tables.cards.len(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::internal("record store lock poisoned"))
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    /// Number of decks stored.
    pub decks: usize,
    /// Number of cards stored.
    pub cards: usize,
}
