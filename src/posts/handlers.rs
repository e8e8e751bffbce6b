use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{auth::extractors::MaybeUser, error::AppError, state::AppState};

use super::{dto::PostListItem, repo_types::Post};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:slug", get(get_post))
}

/// Public callers see published posts; an authenticated caller gets the
/// admin view with drafts included.
#[instrument(skip(state, user))]
pub async fn list_posts(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Json<Vec<PostListItem>>, AppError> {
    let posts = if user.is_some() {
        Post::list_all(&state.db).await?
    } else {
        Post::list_published(&state.db).await?
    };
    Ok(Json(posts.into_iter().map(PostListItem::from).collect()))
}

#[instrument(skip(state, user))]
pub async fn get_post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = Post::find_by_slug(&state.db, &slug)
        .await?
        .ok_or(AppError::NotFound("Post"))?;

    // Drafts are indistinguishable from absent posts for the public.
    if !post.published && user.is_none() {
        return Err(AppError::NotFound("Post"));
    }

    Ok(Json(post))
}
