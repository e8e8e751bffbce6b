use axum::{
    extract::{FromRef, Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::state::AppState;

use super::{
    cookie::{clear_session_cookie, cookie_value, AUTH_COOKIE},
    jwt::TokenKeys,
};

/// Path prefixes that require a session cookie.
pub const PROTECTED_PREFIXES: &[&str] = &["/admin"];

/// Sub-paths inside the protected prefixes that stay reachable without a
/// session, so the login and registration pages do not redirect to
/// themselves.
pub const PUBLIC_ADMIN_PATHS: &[&str] = &["/admin/login", "/admin/register"];

pub const LOGIN_PATH: &str = "/admin/login";

/// Gate for the browser-rendered admin surface. API identity goes through
/// the bearer extractors instead; both paths end in `TokenKeys::verify`.
pub async fn admin_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    let protected = PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p));
    let public = PUBLIC_ADMIN_PATHS.contains(&path.as_str());
    if !protected || public {
        return next.run(request).await;
    }

    let Some(token) = cookie_value(request.headers(), AUTH_COOKIE) else {
        debug!(path = %path, "no session cookie; redirecting to login");
        return login_redirect(&path).into_response();
    };

    if TokenKeys::from_ref(&state).verify(token).is_err() {
        // Clear the dead cookie so the client stops resending it.
        debug!(path = %path, "session cookie rejected; clearing and redirecting");
        let clear = clear_session_cookie(state.config.environment.is_production());
        return ([(SET_COOKIE, clear)], login_redirect(&path)).into_response();
    }

    next.run(request).await
}

/// 307 to the login page, preserving the originally requested path as a
/// return target.
fn login_redirect(path: &str) -> Redirect {
    Redirect::temporary(&format!(
        "{LOGIN_PATH}?redirect={}",
        urlencoding::encode(path)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_register_are_exempt() {
        for path in PUBLIC_ADMIN_PATHS {
            assert!(PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p)));
        }
    }

    #[test]
    fn redirect_preserves_return_target() {
        let redirect = login_redirect("/admin/posts/new");
        let response = redirect.into_response();
        let location = response.headers().get(axum::http::header::LOCATION).unwrap();
        assert_eq!(location, "/admin/login?redirect=%2Fadmin%2Fposts%2Fnew");
    }
}
