//! Authentication module.
//!
//! This module turns a service account key file into a signed RS256 JWT and
//! provides the client interceptor that attaches that token to outgoing
//! bookstore requests. Validation of the token is left to the serving
//! infrastructure in front of the bookstore.

pub mod interceptor;
pub mod jwt;
pub mod service_account;

use std::path::PathBuf;

/// Error types for credential assembly
///
/// Every variant is terminal: all of them describe a defect in local input
/// or configuration, so callers should report and abort rather than retry.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Service account file could not be read
    #[error("Could not read service account file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Service account document is malformed
    #[error("Could not parse service account JSON: {0}")]
    Parse(String),

    /// PEM block is absent or corrupt
    #[error("Could not decode private key PEM block: {0}")]
    KeyDecode(String),

    /// Decoded bytes are not a usable PKCS#8 private key
    #[error("Private key parse error: {0}")]
    KeyFormat(String),

    /// Key is well-formed but not an RSA key
    #[error("Private key is not an RSA key (algorithm {0})")]
    TypeMismatch(String),

    /// Signing the claim set failed
    #[error("Failed to sign JWT: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Token cannot be carried in request metadata
    #[error("Token is not a valid authorization header value: {0}")]
    InvalidToken(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Parse(err.to_string())
    }
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;
