/// Bookstore Service Library
///
/// This library provides the bookstore gRPC service together with the
/// service-account credential tooling used to call it.
///
/// # Features
/// - RS256 JWT assembly from a service account key file
/// - Bearer token propagation on outgoing gRPC calls
/// - In-memory shelf and book storage
/// - gRPC service interface, including an "unimplemented" default handler set
///
/// # Modules
/// - `auth`: Service account parsing, token assembly and the client interceptor
/// - `db`: Shelf and book storage
/// - `grpc`: gRPC service implementation, handler composition and client helpers
/// - `config`: Configuration management
/// - `logging`: Tracing subscriber setup shared by both binaries
///
/// # Example
/// ```no_run
/// use bookstore_grpc::auth::jwt::{assemble_token, DEFAULT_VALIDITY_SECS};
///
/// let token = assemble_token(
///     "service-account.json",
///     "sa@project.iam.gserviceaccount.com",
///     "my-service",
///     DEFAULT_VALIDITY_SECS,
/// ).expect("Failed to assemble token");
/// println!("Auth token: {}", token);
/// ```

pub mod auth;
pub mod db;
pub mod grpc;
pub mod config;
pub mod logging;

/// Generated protocol buffer code
pub mod proto {
    pub mod bookstore {
        tonic::include_proto!("endpoints.examples.bookstore");
    }
}

/// Fully-qualified name of the bookstore service on the wire.
pub const SERVICE_NAME: &str = "endpoints.examples.bookstore.Bookstore";
