use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use time::OffsetDateTime;
use tracing::info;

pub mod composers;
pub mod config;
pub mod error;
pub mod gate;
pub mod notes;
pub mod resource;
pub mod response;
pub mod routes;
pub mod store;
pub mod views;

use composers::ProfileComposer;
use config::Config;
use error::StartupError;
use store::{PostStore, UserStore};
use views::Views;

pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub posts: PostStore,
    pub views: Views,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, StartupError> {
        let db_pool = connect(&config.database_url).await?;

        sqlx::migrate!().run(&db_pool).await?;

        let users = UserStore::new(db_pool.clone());
        let posts = PostStore::new(db_pool.clone());

        if config.seed_demo_data {
            store::seed_demo_data(&users, &posts).await?;
        }

        let mut views = Views::from_directory(&config.templates_dir, config.template_dev_mode)?;
        views.composer(ProfileComposer::VIEW, ProfileComposer::new(users.clone()));

        info!("Loaded templates from {}", config.templates_dir);

        Ok(Self {
            config,
            users,
            posts,
            views,
        })
    }
}

async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Every connection to `:memory:` opens its own database, so keep exactly one alive.
    if url.contains(":memory:") {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await;
    }

    SqlitePoolOptions::new().connect(url).await
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
