//! Composable Bookstore handlers.
//!
//! [`BookstoreHandlers`] implements the generated `Bookstore` trait by
//! dispatching each method to an optional async closure. Methods without a
//! closure answer `UNIMPLEMENTED` with `method <Name> not implemented`, so a
//! handler set with nothing attached is the scaffold every server starts
//! from (see [`UnimplementedBookstoreServer`]).
//!
//! ```no_run
//! use bookstore_grpc::grpc::handlers::BookstoreHandlers;
//! use bookstore_grpc::proto::bookstore::Shelf;
//! use tonic::{Response, Status};
//!
//! let handlers = BookstoreHandlers::new().on_get_shelf(|request| async move {
//!     Ok::<_, Status>(Response::new(Shelf { id: request.into_inner().shelf, theme: "fiction".into() }))
//! });
//! let _server = handlers.into_server();
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::debug;

use super::client::{method_path, METHODS};

use crate::proto::bookstore::{
    bookstore_server::{Bookstore, BookstoreServer},
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

/// Boxed response future returned by a handler
pub type HandlerFuture<T> = Pin<Box<dyn Future<Output = Result<Response<T>, Status>> + Send>>;

/// A single unary method handler
pub type Handler<Req, Resp> = Arc<dyn Fn(Request<Req>) -> HandlerFuture<Resp> + Send + Sync>;

fn boxed<Req, Resp, F, Fut>(f: F) -> Handler<Req, Resp>
where
    Req: 'static,
    Resp: 'static,
    F: Fn(Request<Req>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response<Resp>, Status>> + Send + 'static,
{
    Arc::new(move |request| -> HandlerFuture<Resp> { Box::pin(f(request)) })
}

/// Bookstore server assembled from per-method handlers
#[derive(Clone, Default)]
pub struct BookstoreHandlers {
    list_shelves: Option<Handler<(), ListShelvesResponse>>,
    create_shelf: Option<Handler<CreateShelfRequest, Shelf>>,
    get_shelf: Option<Handler<GetShelfRequest, Shelf>>,
    delete_shelf: Option<Handler<DeleteShelfRequest, ()>>,
    list_books: Option<Handler<ListBooksRequest, ListBooksResponse>>,
    create_book: Option<Handler<CreateBookRequest, Book>>,
    get_book: Option<Handler<GetBookRequest, Book>>,
    delete_book: Option<Handler<DeleteBookRequest, ()>>,
}

/// Handler set where every method answers `UNIMPLEMENTED`.
pub type UnimplementedBookstoreServer = BookstoreHandlers;

impl BookstoreHandlers {
    /// Creates a handler set with no methods attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the handler set in the generated tonic server.
    pub fn into_server(self) -> BookstoreServer<Self> {
        BookstoreServer::new(self)
    }

    pub fn on_list_shelves<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<()>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<ListShelvesResponse>, Status>> + Send + 'static,
    {
        self.list_shelves = Some(boxed(f));
        self
    }

    pub fn on_create_shelf<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<CreateShelfRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<Shelf>, Status>> + Send + 'static,
    {
        self.create_shelf = Some(boxed(f));
        self
    }

    pub fn on_get_shelf<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<GetShelfRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<Shelf>, Status>> + Send + 'static,
    {
        self.get_shelf = Some(boxed(f));
        self
    }

    pub fn on_delete_shelf<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<DeleteShelfRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<()>, Status>> + Send + 'static,
    {
        self.delete_shelf = Some(boxed(f));
        self
    }

    pub fn on_list_books<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<ListBooksRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<ListBooksResponse>, Status>> + Send + 'static,
    {
        self.list_books = Some(boxed(f));
        self
    }

    pub fn on_create_book<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<CreateBookRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<Book>, Status>> + Send + 'static,
    {
        self.create_book = Some(boxed(f));
        self
    }

    pub fn on_get_book<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<GetBookRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<Book>, Status>> + Send + 'static,
    {
        self.get_book = Some(boxed(f));
        self
    }

    pub fn on_delete_book<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request<DeleteBookRequest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<()>, Status>> + Send + 'static,
    {
        self.delete_book = Some(boxed(f));
        self
    }
}

impl fmt::Debug for BookstoreHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attached = [
            self.list_shelves.is_some(),
            self.create_shelf.is_some(),
            self.get_shelf.is_some(),
            self.delete_shelf.is_some(),
            self.list_books.is_some(),
            self.create_book.is_some(),
            self.get_book.is_some(),
            self.delete_book.is_some(),
        ];
        f.debug_map().entries(METHODS.iter().zip(attached)).finish()
    }
}

async fn dispatch<Req, Resp>(
    handler: &Option<Handler<Req, Resp>>,
    method: &'static str,
    request: Request<Req>,
) -> Result<Response<Resp>, Status> {
    match handler {
        Some(handler) => handler(request).await,
        None => {
            debug!(path = %method_path(method), "No handler attached");
            Err(Status::unimplemented(format!("method {} not implemented", method)))
        }
    }
}

#[tonic::async_trait]
impl Bookstore for BookstoreHandlers {
    async fn list_shelves(
        &self,
        request: Request<()>,
    ) -> Result<Response<ListShelvesResponse>, Status> {
        dispatch(&self.list_shelves, "ListShelves", request).await
    }

    async fn create_shelf(
        &self,
        request: Request<CreateShelfRequest>,
    ) -> Result<Response<Shelf>, Status> {
        dispatch(&self.create_shelf, "CreateShelf", request).await
    }

    async fn get_shelf(
        &self,
        request: Request<GetShelfRequest>,
    ) -> Result<Response<Shelf>, Status> {
        dispatch(&self.get_shelf, "GetShelf", request).await
    }

    async fn delete_shelf(
        &self,
        request: Request<DeleteShelfRequest>,
    ) -> Result<Response<()>, Status> {
        dispatch(&self.delete_shelf, "DeleteShelf", request).await
    }

    async fn list_books(
        &self,
        request: Request<ListBooksRequest>,
    ) -> Result<Response<ListBooksResponse>, Status> {
        dispatch(&self.list_books, "ListBooks", request).await
    }

    async fn create_book(
        &self,
        request: Request<CreateBookRequest>,
    ) -> Result<Response<Book>, Status> {
        dispatch(&self.create_book, "CreateBook", request).await
    }

    async fn get_book(
        &self,
        request: Request<GetBookRequest>,
    ) -> Result<Response<Book>, Status> {
        dispatch(&self.get_book, "GetBook", request).await
    }

    async fn delete_book(
        &self,
        request: Request<DeleteBookRequest>,
    ) -> Result<Response<()>, Status> {
        dispatch(&self.delete_book, "DeleteBook", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;
    use tracing_test::traced_test;

    fn assert_unimplemented<T: fmt::Debug>(result: Result<Response<T>, Status>, method: &str) {
        let status = result.unwrap_err();
        assert_eq!(status.code(), Code::Unimplemented);
        assert_eq!(status.message(), format!("method {} not implemented", method));
    }

    #[tokio::test]
    async fn test_every_method_defaults_to_unimplemented() {
        let server = UnimplementedBookstoreServer::default();

        assert_unimplemented(server.list_shelves(Request::new(())).await, "ListShelves");
        assert_unimplemented(
            server.create_shelf(Request::new(CreateShelfRequest::default())).await,
            "CreateShelf",
        );
        assert_unimplemented(
            server.get_shelf(Request::new(GetShelfRequest::default())).await,
            "GetShelf",
        );
        assert_unimplemented(
            server.delete_shelf(Request::new(DeleteShelfRequest::default())).await,
            "DeleteShelf",
        );
        assert_unimplemented(
            server.list_books(Request::new(ListBooksRequest::default())).await,
            "ListBooks",
        );
        assert_unimplemented(
            server.create_book(Request::new(CreateBookRequest::default())).await,
            "CreateBook",
        );
        assert_unimplemented(
            server.get_book(Request::new(GetBookRequest::default())).await,
            "GetBook",
        );
        assert_unimplemented(
            server.delete_book(Request::new(DeleteBookRequest::default())).await,
            "DeleteBook",
        );
    }

    #[tokio::test]
    async fn test_attached_handler_overrides_only_its_method() {
        let server = BookstoreHandlers::new().on_get_shelf(|request| async move {
            let id = request.into_inner().shelf;
            Ok::<_, Status>(Response::new(Shelf {
                id,
                theme: "poetry".to_string(),
            }))
        });

        let shelf = server
            .get_shelf(Request::new(GetShelfRequest { shelf: 7 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(shelf.id, 7);
        assert_eq!(shelf.theme, "poetry");

        assert_unimplemented(
            server.delete_shelf(Request::new(DeleteShelfRequest { shelf: 7 })).await,
            "DeleteShelf",
        );
    }

    #[tokio::test]
    async fn test_handler_errors_pass_through() {
        let server = BookstoreHandlers::new()
            .on_delete_book(|_| async { Err::<Response<()>, _>(Status::not_found("no such book")) });

        let status = server
            .delete_book(Request::new(DeleteBookRequest { shelf: 1, book: 2 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "no such book");
    }

    #[test]
    fn test_debug_lists_attached_handlers() {
        let server = BookstoreHandlers::new()
            .on_list_shelves(|_| async { Ok::<_, Status>(Response::new(ListShelvesResponse::default())) });
        let printed = format!("{:?}", server);
        assert!(printed.contains("\"ListShelves\": true"));
        assert!(printed.contains("\"GetBook\": false"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_missing_handler_logs_method_path() {
        let server = UnimplementedBookstoreServer::new();
        assert_unimplemented(
            server.get_book(Request::new(GetBookRequest::default())).await,
            "GetBook",
        );
        assert!(logs_contain("/endpoints.examples.bookstore.Bookstore/GetBook"));
    }
}
