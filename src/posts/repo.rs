use sqlx::SqlitePool;

use super::repo_types::Post;

const POST_COLUMNS: &str = "id, slug, title, description, content, tags, published, \
                            created_at, updated_at, published_at, author_id";

impl Post {
    /// Published posts only, newest first. The public view.
    pub async fn list_published(db: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE published = 1 ORDER BY published_at DESC"
        ))
        .fetch_all(db)
        .await
    }

    /// Every post including drafts, for authenticated callers.
    pub async fn list_all(db: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
    }

    pub async fn find_by_slug(db: &SqlitePool, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(db)
        .await
    }

    /// Total and published counts, for the admin dashboard.
    pub async fn count_by_published(db: &SqlitePool) -> Result<(i64, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(db)
            .await?;
        let published: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE published = 1")
                .fetch_one(db)
                .await?;
        Ok((total, published))
    }
}
