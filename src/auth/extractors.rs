use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::debug;

use crate::{error::AppError, state::AppState};

use super::{jwt::TokenKeys, repo_types::User};

/// Extracts and validates the bearer token, returning the user ID.
/// Rejects anonymous callers with a generic authentication error.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);
        let token = bearer_token(parts).ok_or(AppError::Unauthenticated)?;
        let claims = keys.verify(token).map_err(|_| {
            debug!("bearer token rejected");
            AppError::Unauthenticated
        })?;
        Ok(AuthUser(claims.sub))
    }
}

/// Anonymous-tolerant identity: resolves the bearer token to a full user
/// when possible and to `None` otherwise. Read paths use this to choose
/// between the public and the admin view of the same resource.
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };
        let Ok(claims) = TokenKeys::from_ref(&state).verify(token) else {
            return Ok(MaybeUser(None));
        };

        // A token whose user row no longer resolves is anonymous, not an
        // error; store hiccups on this path degrade to the public view.
        let user = User::find_by_id(&state.db, claims.sub).await.ok().flatten();
        Ok(MaybeUser(user))
    }
}

/// Only the exact `Bearer ` scheme counts; any other prefix is treated as
/// an absent header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(axum::http::header::AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn bearer_token_requires_exact_scheme() {
        assert_eq!(bearer_token(&parts_with_auth("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&parts_with_auth("bearer abc")), None);
        assert_eq!(bearer_token(&parts_with_auth("Token abc")), None);
        assert_eq!(bearer_token(&parts_with_auth("Bearerabc")), None);
    }

    #[test]
    fn bearer_token_missing_header_is_none() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
