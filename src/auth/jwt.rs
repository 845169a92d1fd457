//! Service account JWT assembly.
//!
//! Builds a time-bounded claim set for a service account identity and signs
//! it with the account's RSA key (RS256), producing a compact token suitable
//! for an `authorization: Bearer` header.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::service_account::ServiceAccountKey;
use super::Result;

/// Default token lifetime in seconds.
pub const DEFAULT_VALIDITY_SECS: i64 = 3600;

/// JWT claim set for a service account token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, the service account email
    pub iss: String,
    /// Subject, always equal to `iss`
    pub sub: String,
    /// Audience, the receiving service name
    pub aud: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Private claims; always carries `email`
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Claims {
    /// Builds the claim set issued at `now`.
    ///
    /// `validity_secs` is not range checked: zero or negative windows yield
    /// a token that is already expired.
    pub fn new(issuer: &str, audience: &str, validity_secs: i64, now: i64) -> Self {
        let mut extra = BTreeMap::new();
        extra.insert("email".to_string(), Value::String(issuer.to_string()));

        Self {
            iss: issuer.to_string(),
            sub: issuer.to_string(),
            aud: audience.to_string(),
            iat: now,
            exp: now.saturating_add(validity_secs),
            extra,
        }
    }

    /// Email private claim, if present.
    pub fn email(&self) -> Option<&str> {
        self.extra.get("email").and_then(Value::as_str)
    }
}

/// Signs a claim set with RS256.
pub fn sign(claims: &Claims, key: &EncodingKey) -> Result<String> {
    let mut header = Header::new(Algorithm::RS256);
    header.typ = Some("JWT".to_string());
    Ok(encode(&header, claims, key)?)
}

/// Assembles a signed token from a service account key file using the
/// current wall-clock time.
///
/// # Arguments
/// * `keyfile` - Path to the service account JSON key file
/// * `issuer` - Service account email, used for `iss`, `sub` and `email`
/// * `audience` - Receiving service name
/// * `validity_secs` - Token lifetime; see [`DEFAULT_VALIDITY_SECS`]
///
/// # Errors
/// Returns the first failure encountered; no token is produced on error.
pub fn assemble_token(
    keyfile: impl AsRef<Path>,
    issuer: &str,
    audience: &str,
    validity_secs: i64,
) -> Result<String> {
    assemble_token_at(keyfile, issuer, audience, validity_secs, Utc::now().timestamp())
}

/// Same as [`assemble_token`] with an explicit issue time.
pub fn assemble_token_at(
    keyfile: impl AsRef<Path>,
    issuer: &str,
    audience: &str,
    validity_secs: i64,
    now: i64,
) -> Result<String> {
    let keyfile = keyfile.as_ref();
    let account = ServiceAccountKey::from_file(keyfile)?;

    if account.client_email != issuer {
        warn!(
            issuer = %issuer,
            client_email = %account.client_email,
            "Issuer does not match the key file's client_email"
        );
    }

    let key = account.encoding_key()?;
    let claims = Claims::new(issuer, audience, validity_secs, now);
    debug!(iss = %claims.iss, aud = %claims.aud, iat = claims.iat, exp = claims.exp, "Signing claim set");

    let token = sign(&claims, &key)?;
    info!(path = %keyfile.display(), aud = %audience, "Assembled service account token");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    const SERVICE_ACCOUNT: &str = include_str!("../../tests/fixtures/service_account.json");
    const RSA_PUBLIC_PEM: &str = include_str!("../../tests/fixtures/rsa_public.pem");

    #[test]
    fn test_claims_window() {
        let claims = Claims::new("sa@example.com", "bookstore", 3600, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iss, claims.sub);
        assert_eq!(claims.email(), Some("sa@example.com"));
    }

    #[test]
    fn test_non_positive_window_is_kept() {
        let zero = Claims::new("sa@example.com", "bookstore", 0, 1_000);
        assert_eq!(zero.exp, zero.iat);

        let negative = Claims::new("sa@example.com", "bookstore", -60, 1_000);
        assert_eq!(negative.exp, 940);
    }

    #[test]
    fn test_claims_payload_is_flat() {
        let claims = Claims::new("sa@example.com", "bookstore", 10, 100);
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["email"], "sa@example.com");
        assert_eq!(value["aud"], "bookstore");
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_sign_round_trip_header() {
        let account = ServiceAccountKey::from_json(SERVICE_ACCOUNT.as_bytes()).unwrap();
        let key = account.encoding_key().unwrap();
        let claims = Claims::new(&account.client_email, "bookstore", 600, Utc::now().timestamp());

        let token = sign(&claims, &key).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["bookstore"]);
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_rsa_pem(RSA_PUBLIC_PEM.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();
        assert_eq!(decoded.claims, claims);
    }
}
