//! In-memory shelf store.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::{Result, ShelfStore, StoreError};
use crate::config::SeedShelf;
use crate::proto::bookstore::{Book, Shelf};

#[derive(Debug)]
struct ShelfEntry {
    shelf: Shelf,
    books: BTreeMap<i64, Book>,
    last_book_id: i64,
}

#[derive(Debug, Default)]
struct Inner {
    shelves: BTreeMap<i64, ShelfEntry>,
    last_shelf_id: i64,
}

impl Inner {
    fn entry(&self, shelf: i64) -> Result<&ShelfEntry> {
        self.shelves.get(&shelf).ok_or(StoreError::ShelfNotFound(shelf))
    }

    fn entry_mut(&mut self, shelf: i64) -> Result<&mut ShelfEntry> {
        self.shelves
            .get_mut(&shelf)
            .ok_or(StoreError::ShelfNotFound(shelf))
    }

    fn insert_shelf(&mut self, theme: String) -> Shelf {
        self.last_shelf_id += 1;
        let shelf = Shelf {
            id: self.last_shelf_id,
            theme,
        };
        self.shelves.insert(
            shelf.id,
            ShelfEntry {
                shelf: shelf.clone(),
                books: BTreeMap::new(),
                last_book_id: 0,
            },
        );
        shelf
    }

    fn insert_book(&mut self, shelf: i64, author: String, title: String) -> Result<Book> {
        let entry = self.entry_mut(shelf)?;
        entry.last_book_id += 1;
        let book = Book {
            id: entry.last_book_id,
            author,
            title,
        };
        entry.books.insert(book.id, book.clone());
        Ok(book)
    }
}

/// Shelf store kept in process memory
///
/// All state sits behind one async mutex; every operation takes the lock
/// once, so listings are consistent snapshots. Cloning shares the state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given shelves and books.
    pub fn with_seed(seed: &[SeedShelf]) -> Self {
        let mut inner = Inner::default();
        for seed_shelf in seed {
            let shelf = inner.insert_shelf(seed_shelf.theme.clone());
            for seed_book in &seed_shelf.books {
                // The shelf was inserted just above.
                let _ = inner.insert_book(shelf.id, seed_book.author.clone(), seed_book.title.clone());
            }
        }
        debug!(shelves = inner.shelves.len(), "Seeded in-memory store");

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }
}

#[async_trait::async_trait]
impl ShelfStore for MemoryStore {
    async fn list_shelves(&self) -> Vec<Shelf> {
        let inner = self.inner.lock().await;
        inner.shelves.values().map(|entry| entry.shelf.clone()).collect()
    }

    async fn create_shelf(&self, theme: String) -> Shelf {
        self.inner.lock().await.insert_shelf(theme)
    }

    async fn get_shelf(&self, shelf: i64) -> Result<Shelf> {
        let inner = self.inner.lock().await;
        Ok(inner.entry(shelf)?.shelf.clone())
    }

    async fn delete_shelf(&self, shelf: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let removed = inner
            .shelves
            .remove(&shelf)
            .ok_or(StoreError::ShelfNotFound(shelf))?;
        debug!(shelf, books = removed.books.len(), "Deleted shelf with its books");
        Ok(())
    }

    async fn list_books(&self, shelf: i64) -> Result<Vec<Book>> {
        let inner = self.inner.lock().await;
        Ok(inner.entry(shelf)?.books.values().cloned().collect())
    }

    async fn create_book(&self, shelf: i64, author: String, title: String) -> Result<Book> {
        self.inner.lock().await.insert_book(shelf, author, title)
    }

    async fn get_book(&self, shelf: i64, book: i64) -> Result<Book> {
        let inner = self.inner.lock().await;
        inner
            .entry(shelf)?
            .books
            .get(&book)
            .cloned()
            .ok_or(StoreError::BookNotFound { shelf, book })
    }

    async fn delete_book(&self, shelf: i64, book: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .entry_mut(shelf)?
            .books
            .remove(&book)
            .map(|_| ())
            .ok_or(StoreError::BookNotFound { shelf, book })
    }
}
