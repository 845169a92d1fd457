//! Authenticated Bookstore client.
//!
//! Connects the generated `BookstoreClient` over a tonic channel and attaches
//! a service account token to every call through [`BearerInterceptor`].

use thiserror::Error;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, Endpoint};
use tracing::info;

use crate::auth::interceptor::BearerInterceptor;
use crate::auth::AuthError;
use crate::proto::bookstore::bookstore_client::BookstoreClient;
use crate::SERVICE_NAME;

/// Method names exposed by the bookstore service, in declaration order.
pub const METHODS: [&str; 8] = [
    "ListShelves",
    "CreateShelf",
    "GetShelf",
    "DeleteShelf",
    "ListBooks",
    "CreateBook",
    "GetBook",
    "DeleteBook",
];

/// Client type returned by [`connect`]
pub type AuthenticatedClient = BookstoreClient<InterceptedService<Channel, BearerInterceptor>>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to connect to bookstore: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// HTTP/2 path of a bookstore method, e.g. `/endpoints.examples.bookstore.Bookstore/GetShelf`.
pub fn method_path(method: &str) -> String {
    format!("/{}/{}", SERVICE_NAME, method)
}

/// Connects to `endpoint` (e.g. `http://127.0.0.1:8000`) and returns a client
/// that sends `token` as a bearer credential.
pub async fn connect(
    endpoint: impl Into<String>,
    token: &str,
) -> Result<AuthenticatedClient, ClientError> {
    let interceptor = BearerInterceptor::new(token)?;
    let endpoint = endpoint.into();

    info!("Connecting to bookstore at {}", endpoint);
    let channel = Endpoint::from_shared(endpoint)?.connect().await?;

    Ok(BookstoreClient::with_interceptor(channel, interceptor))
}
