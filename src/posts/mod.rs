//! Blog post read path. Content management beyond reads lives in the admin
//! frontend and is out of scope here; this module exists to serve the
//! public site and the admin view of the same rows.

use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
mod repo;
mod repo_types;

pub use repo_types::Post;

pub fn router() -> Router<AppState> {
    handlers::read_routes()
}
