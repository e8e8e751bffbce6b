use serde::Serialize;
use time::OffsetDateTime;

use super::repo_types::Post;

/// List view of a post; drops the body to keep index responses small.
#[derive(Debug, Serialize)]
pub struct PostListItem {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

impl From<Post> for PostListItem {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            slug: post.slug,
            title: post.title,
            description: post.description,
            tags: post.tags.0,
            published: post.published,
            created_at: post.created_at,
            published_at: post.published_at,
        }
    }
}
