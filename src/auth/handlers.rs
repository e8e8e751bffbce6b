use axum::{
    extract::{FromRef, State},
    http::{header::SET_COOKIE, HeaderName},
    response::AppendHeaders,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{error::AppError, state::AppState};

use super::{
    cookie::{clear_session_cookie, session_cookie},
    dto::{
        AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, PublicUser,
        RegisterRequest,
    },
    extractors::AuthUser,
    jwt::TokenKeys,
    password::{hash_password, verify_password},
    repo_types::User,
};

const MIN_PASSWORD_LEN: usize = 6;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/change-password", post(change_password))
        .route("/auth/me", get(me))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

type SessionHeaders = AppendHeaders<[(HeaderName, String); 1]>;

/// Shared tail of register and login: mint a token, set the session cookie
/// and return the public user view alongside the token.
fn session_response(
    state: &AppState,
    user: User,
    message: &str,
) -> Result<(SessionHeaders, Json<AuthResponse>), AppError> {
    let token = TokenKeys::from_ref(state).issue(user.id, &user.email)?;
    let cookie = session_cookie(
        &token,
        state.config.auth.token_ttl,
        state.config.environment.is_production(),
    );
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            message: message.to_string(),
            user: PublicUser::from(user),
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(SessionHeaders, Json<AuthResponse>), AppError> {
    let (Some(email), Some(password), Some(name)) =
        (payload.email, payload.password, payload.name)
    else {
        return Err(AppError::Validation(
            "Email, password and name are required".into(),
        ));
    };

    // The invitation gate comes before any store access.
    if payload.invitation_code.as_deref() != Some(state.config.auth.invitation_code.as_str()) {
        warn!("registration with invalid invitation code");
        return Err(AppError::Forbidden("Invalid invitation code".into()));
    }

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email format");
        return Err(AppError::Validation("Invalid email format".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("This email is already registered".into()));
    }

    let hash = hash_password(&password)?;
    let user = User::create(&state.db, &email, &hash, &name)
        .await
        .map_err(|e| {
            // Two concurrent registrations can both pass the lookup above;
            // the store's UNIQUE(email) decides and the loser sees a
            // conflict, not a crash.
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                AppError::Conflict("This email is already registered".into())
            } else {
                AppError::Storage(e)
            }
        })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    session_response(&state, user, "User registered successfully")
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(SessionHeaders, Json<AuthResponse>), AppError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(AppError::Validation("Email and password are required".into()));
    };

    // Unknown email and wrong password take the same exit so responses
    // cannot be used to enumerate accounts.
    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login with unknown email");
        return Err(AppError::InvalidCredentials);
    };
    if !verify_password(&password, &user.password_hash) {
        warn!(user_id = user.id, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    session_response(&state, user, "Login successful")
}

/// Clears the session cookie. Issued tokens stay valid until they expire;
/// there is no server-side revocation list.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> (SessionHeaders, Json<MessageResponse>) {
    let cookie = clear_session_cookie(state.config.environment.is_production());
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: "Logged out".into(),
        }),
    )
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (Some(current), Some(new), Some(confirm)) = (
        payload.current_password,
        payload.new_password,
        payload.confirm_password,
    ) else {
        return Err(AppError::Validation("All fields are required".into()));
    };

    if new != confirm {
        return Err(AppError::Validation("New passwords do not match".into()));
    }
    if new.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if !verify_password(&current, &user.password_hash) {
        warn!(user_id, "change-password with wrong current password");
        return Err(AppError::Forbidden("Current password is incorrect".into()));
    }

    let hash = hash_password(&new)?;
    User::update_password(&state.db, user_id, &hash).await?;

    info!(user_id, "password changed");
    Ok(Json(MessageResponse {
        message: "Password updated successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    Ok(Json(PublicUser::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@signs.com"));
        assert!(!is_valid_email("spaces in@local.com"));
    }
}
