use crate::entities::prelude::*;
use crate::models::trend::StoredTrendRow;
use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod repositories;

pub use crate::entities::user_searches::Model as UserSearch;

/// Default freshness window, in days, for stored trend queries.
pub const DEFAULT_WINDOW_DAYS: u32 = 3;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    window_days: u32,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            let parent = Path::new(path_str)
                .parent()
                .filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        // Every pooled connection to `:memory:` would see its own empty database.
        let max_connections = if in_memory { 1 } else { max_connections };
        let min_connections = min_connections.min(max_connections);

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        let store = Self {
            conn,
            window_days: DEFAULT_WINDOW_DAYS,
        };
        store.initialize().await?;

        info!(
            "Database connected & tables ready (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    #[must_use]
    pub const fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    /// Creates the `trends` and `user_searches` tables when missing.
    /// Safe to call on every start.
    pub async fn initialize(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut trends = schema.create_table_from_entity(Trends);
        trends.if_not_exists();
        self.conn.execute(backend.build(&trends)).await?;

        let mut user_searches = schema.create_table_from_entity(UserSearches);
        user_searches.if_not_exists();
        self.conn.execute(backend.build(&user_searches)).await?;

        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn trend_repo(&self) -> repositories::trend::TrendRepository {
        repositories::trend::TrendRepository::new(self.conn.clone())
    }

    fn user_search_repo(&self) -> repositories::user_search::UserSearchRepository {
        repositories::user_search::UserSearchRepository::new(self.conn.clone())
    }

    pub async fn save_trend(
        &self,
        term: &str,
        platform: &str,
        search_volume: i64,
        region: Option<&str>,
    ) -> Result<()> {
        self.trend_repo()
            .save(term, platform, search_volume, region)
            .await
    }

    /// Stored trends inside the freshness window, ordered by volume descending.
    pub async fn get_trends(
        &self,
        platform: Option<&str>,
        limit: u64,
    ) -> Result<Vec<StoredTrendRow>> {
        self.trend_repo()
            .fresh(
                platform,
                limit,
                self.window_days,
                chrono::Utc::now().date_naive(),
            )
            .await
    }

    pub async fn save_user_search(&self, search_term: &str) -> Result<()> {
        self.user_search_repo().add(search_term).await
    }

    pub async fn recent_user_searches(&self, limit: u64) -> Result<Vec<UserSearch>> {
        self.user_search_repo().recent(limit).await
    }
}
