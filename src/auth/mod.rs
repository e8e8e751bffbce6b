//! Authentication: password hashing, session tokens, the cookie guard for
//! the admin UI and the bearer extractors for the JSON API.

use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod cookie;
pub mod dto;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod jwt;
pub mod password;
mod repo;
mod repo_types;

pub use repo_types::User;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
