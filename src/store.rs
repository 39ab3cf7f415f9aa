//! Thin query layer over the SQLite pool.

use sqlx::sqlite::SqlitePool;
use time::OffsetDateTime;
use tracing::info;

use crate::{Post, User};

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert(&self, name: &str, email: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO users (name, email, created_at) VALUES (?, ?, ?) RETURNING id")
            .bind(name)
            .bind(email)
            .bind(OffsetDateTime::now_utc())
            .fetch_one(&self.pool)
            .await
    }
}

#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Newest first.
    pub async fn all(&self) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "SELECT id, title, body, created_at FROM posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn insert(&self, title: &str, body: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO posts (title, body, created_at) VALUES (?, ?, ?) RETURNING id")
            .bind(title)
            .bind(body)
            .bind(OffsetDateTime::now_utc())
            .fetch_one(&self.pool)
            .await
    }
}

/// Fills empty tables with one demo user and post so the profile and post pages have
/// something to show on a fresh database.
pub async fn seed_demo_data(users: &UserStore, posts: &PostStore) -> Result<(), sqlx::Error> {
    if users.count().await? == 0 {
        let id = users.insert("Joey", "joey@example.com").await?;
        info!("Seeded demo user {id}");
    }

    if posts.count().await? == 0 {
        let id = posts
            .insert(
                "Hello Laravel",
                "Notes on routing, middleware and views, one page per topic.",
            )
            .await?;
        info!("Seeded demo post {id}");
    }

    Ok(())
}
