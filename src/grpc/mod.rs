use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

use crate::db::{ShelfStore, StoreError};
use crate::proto::bookstore::{
    bookstore_server::Bookstore,
    Book,
    CreateBookRequest,
    CreateShelfRequest,
    DeleteBookRequest,
    DeleteShelfRequest,
    GetBookRequest,
    GetShelfRequest,
    ListBooksRequest,
    ListBooksResponse,
    ListShelvesResponse,
    Shelf,
};

pub mod client;
pub mod handlers;

pub use crate::proto::bookstore::bookstore_server::BookstoreServer;

/// Maps storage errors to gRPC status codes
impl From<StoreError> for Status {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::ShelfNotFound(_) | StoreError::BookNotFound { .. } => {
                Status::not_found(error.to_string())
            }
        }
    }
}

/// Implementation of the Bookstore gRPC service backed by a [`ShelfStore`]
#[derive(Debug)]
pub struct BookstoreService<S> {
    store: Arc<S>,
}

impl<S: ShelfStore> BookstoreService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wraps the service in the generated tonic server.
    pub fn into_server(self) -> BookstoreServer<Self> {
        BookstoreServer::new(self)
    }
}

#[tonic::async_trait]
impl<S: ShelfStore> Bookstore for BookstoreService<S> {
    async fn list_shelves(
        &self,
        _request: Request<()>,
    ) -> Result<Response<ListShelvesResponse>, Status> {
        let shelves = self.store.list_shelves().await;
        debug!(count = shelves.len(), "Listing shelves");
        Ok(Response::new(ListShelvesResponse { shelves }))
    }

    async fn create_shelf(
        &self,
        request: Request<CreateShelfRequest>,
    ) -> Result<Response<Shelf>, Status> {
        let req = request.into_inner();
        let shelf = req
            .shelf
            .ok_or_else(|| Status::invalid_argument("Missing shelf in CreateShelf request"))?;

        let created = self.store.create_shelf(shelf.theme).await;
        info!(shelf = created.id, theme = %created.theme, "Created shelf");
        Ok(Response::new(created))
    }

    async fn get_shelf(
        &self,
        request: Request<GetShelfRequest>,
    ) -> Result<Response<Shelf>, Status> {
        let req = request.into_inner();
        debug!(shelf = req.shelf, "Getting shelf");

        let shelf = self.store.get_shelf(req.shelf).await.map_err(|e| {
            debug!("GetShelf failed: {}", e);
            Status::from(e)
        })?;
        Ok(Response::new(shelf))
    }

    async fn delete_shelf(
        &self,
        request: Request<DeleteShelfRequest>,
    ) -> Result<Response<()>, Status> {
        let req = request.into_inner();

        self.store.delete_shelf(req.shelf).await.map_err(|e| {
            warn!("DeleteShelf failed: {}", e);
            Status::from(e)
        })?;
        info!(shelf = req.shelf, "Deleted shelf");
        Ok(Response::new(()))
    }

    async fn list_books(
        &self,
        request: Request<ListBooksRequest>,
    ) -> Result<Response<ListBooksResponse>, Status> {
        let req = request.into_inner();

        let books = self.store.list_books(req.shelf).await?;
        debug!(shelf = req.shelf, count = books.len(), "Listing books");
        Ok(Response::new(ListBooksResponse { books }))
    }

    async fn create_book(
        &self,
        request: Request<CreateBookRequest>,
    ) -> Result<Response<Book>, Status> {
        let req = request.into_inner();
        let book = req
            .book
            .ok_or_else(|| Status::invalid_argument("Missing book in CreateBook request"))?;

        let created = self
            .store
            .create_book(req.shelf, book.author, book.title)
            .await
            .map_err(|e| {
                warn!("CreateBook failed: {}", e);
                Status::from(e)
            })?;
        info!(shelf = req.shelf, book = created.id, "Created book");
        Ok(Response::new(created))
    }

    async fn get_book(
        &self,
        request: Request<GetBookRequest>,
    ) -> Result<Response<Book>, Status> {
        let req = request.into_inner();
        debug!(shelf = req.shelf, book = req.book, "Getting book");

        let book = self.store.get_book(req.shelf, req.book).await?;
        Ok(Response::new(book))
    }

    async fn delete_book(
        &self,
        request: Request<DeleteBookRequest>,
    ) -> Result<Response<()>, Status> {
        let req = request.into_inner();

        self.store.delete_book(req.shelf, req.book).await.map_err(|e| {
            warn!("DeleteBook failed: {}", e);
            Status::from(e)
        })?;
        info!(shelf = req.shelf, book = req.book, "Deleted book");
        Ok(Response::new(()))
    }
}
