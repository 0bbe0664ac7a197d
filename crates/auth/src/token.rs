//! Bearer token issuance and validation (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use ledgerly_core::{DomainError, DomainResult, UserId};

/// Claims embedded in an access token.
///
/// The subject claims are the only identity the request path trusts; they go
/// stale if the user is deleted after issuance, a window bounded by `exp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: UserId,
    /// Email at issuance time.
    pub email: String,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

/// Verified subject identity extracted from a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub email: String,
}

/// Signs and verifies access tokens with a server-held secret.
///
/// There is no revocation list: logout is client-side token deletion, so a
/// leaked token remains valid until expiry.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], lifetime_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime: Duration::seconds(lifetime_secs),
        }
    }

    /// Issue a signed token for the given user, valid for the configured
    /// lifetime starting now.
    pub fn issue(&self, user_id: UserId, email: &str) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::internal(format!("token encoding failed: {e}")))
    }

    /// Validate signature and expiry, returning the embedded identity.
    ///
    /// Expiry is checked with zero leeway so a token is rejected from its
    /// exact expiry instant onward. All failure modes collapse into one
    /// generic authentication error.
    pub fn verify(&self, token: &str) -> DomainResult<TokenIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| DomainError::authentication("invalid or expired token"))?;

        Ok(TokenIdentity {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }
}
