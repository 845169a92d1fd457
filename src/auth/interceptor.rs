//! Client-side bearer token interceptor.

use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

use super::{AuthError, Result};

/// Metadata key carrying the credential.
pub const AUTHORIZATION: &str = "authorization";

/// Injects `authorization: Bearer <token>` into every outgoing request.
///
/// The header value is parsed once at construction; cloning the interceptor
/// shares nothing mutable.
#[derive(Clone)]
pub struct BearerInterceptor {
    auth_header: AsciiMetadataValue,
}

impl BearerInterceptor {
    /// Creates an interceptor for a compact token (without the `Bearer ` prefix).
    ///
    /// # Errors
    /// Returns `AuthError::InvalidToken` if the token cannot be carried as
    /// ASCII metadata.
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let auth_header = AsciiMetadataValue::try_from(format!("Bearer {}", token.as_ref()))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(Self { auth_header })
    }
}

impl std::fmt::Debug for BearerInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerInterceptor")
            .field("auth_header", &"Bearer <redacted>")
            .finish()
    }
}

impl Interceptor for BearerInterceptor {
    fn call(&mut self, mut request: Request<()>) -> std::result::Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION, self.auth_header.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injects_bearer_header() {
        let mut interceptor = BearerInterceptor::new("header.payload.signature").unwrap();
        let request = interceptor.call(Request::new(())).unwrap();

        let value = request.metadata().get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer header.payload.signature");
    }

    #[test]
    fn test_replaces_existing_header() {
        let mut interceptor = BearerInterceptor::new("fresh").unwrap();
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(AUTHORIZATION, "Bearer stale".parse().unwrap());

        let request = interceptor.call(request).unwrap();
        assert_eq!(request.metadata().get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(
            request.metadata().get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer fresh"
        );
    }

    #[test]
    fn test_rejects_non_ascii_token() {
        let err = BearerInterceptor::new("tök\n").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let interceptor = BearerInterceptor::new("secret-token").unwrap();
        assert!(!format!("{:?}", interceptor).contains("secret-token"));
    }
}
