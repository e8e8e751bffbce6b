//! Browser-facing admin surface. Everything here except the login and
//! registration mounts sits behind the session-cookie guard wired up in
//! `app::build_app`.

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{error::AppError, posts::Post, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_page))
        .route("/admin/register", get(register_page))
        .route("/admin/dashboard", get(dashboard))
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub posts: i64,
    pub published: i64,
    pub drafts: i64,
}

/// Content summary for the admin landing page. Only reachable with a valid
/// session cookie.
#[instrument(skip(state))]
async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let (posts, published) = Post::count_by_published(&state.db).await?;
    Ok(Json(DashboardSummary {
        posts,
        published,
        drafts: posts - published,
    }))
}

// The admin frontend is a separate application; these mounts only exist so
// the guard has unauthenticated pages to land on.

async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Admin login</title><h1>Admin login</h1>")
}

async fn register_page() -> Html<&'static str> {
    Html("<!doctype html><title>Admin registration</title><h1>Admin registration</h1>")
}
