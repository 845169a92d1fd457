//! Shelf and book storage.
//!
//! The gRPC layer talks to storage through [`ShelfStore`] so handlers can be
//! tested against a mock. [`memory::MemoryStore`] is the process-local
//! implementation used by the server binary.

pub mod memory;

use thiserror::Error;

use crate::proto::bookstore::{Book, Shelf};

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Unable to find shelf {0}")]
    ShelfNotFound(i64),

    #[error("Unable to find book {book} on shelf {shelf}")]
    BookNotFound { shelf: i64, book: i64 },
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Operations over shelves and the books they hold.
///
/// Ids are assigned by the store and never reused. Listings are ordered by
/// ascending id. Deleting a shelf deletes every book on it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ShelfStore: std::fmt::Debug + Send + Sync + 'static {
    async fn list_shelves(&self) -> Vec<Shelf>;

    async fn create_shelf(&self, theme: String) -> Shelf;

    async fn get_shelf(&self, shelf: i64) -> Result<Shelf>;

    async fn delete_shelf(&self, shelf: i64) -> Result<()>;

    async fn list_books(&self, shelf: i64) -> Result<Vec<Book>>;

    async fn create_book(&self, shelf: i64, author: String, title: String) -> Result<Book>;

    async fn get_book(&self, shelf: i64, book: i64) -> Result<Book>;

    async fn delete_book(&self, shelf: i64, book: i64) -> Result<()>;
}
