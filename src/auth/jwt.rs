use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;

use crate::state::AppState;

use super::claims::Claims;

/// Uniform verification failure. Signature, structure and expiry problems
/// all collapse into this one value so callers cannot tell them apart; the
/// specific reason only shows up in debug logs.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid token")]
pub struct InvalidToken;

/// Holds the session signing and verification keys plus the token TTL.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.auth.secret, state.config.auth.token_ttl)
    }
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a signed session token for the given user.
    pub fn issue(&self, user_id: i64, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id, "session token issued");
        Ok(token)
    }

    /// Checks signature and structure first, then expiry. A token whose
    /// expiry equals the current second is already expired.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared strictly below; jsonwebtoken's own check
        // applies leeway and is lenient at the boundary.
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(reason = %e, "token rejected");
            InvalidToken
        })?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        if data.claims.exp <= now {
            debug!(user_id = data.claims.sub, "token expired");
            return Err(InvalidToken);
        }

        Ok(data.claims)
    }
}
