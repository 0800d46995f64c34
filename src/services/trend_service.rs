//! Application service behind the web handlers and CLI commands.

use crate::models::trend::TrendRecord;
use crate::services::aggregator::RegionalMatrix;
use crate::services::formatter::FormattedTrend;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for TrendError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TrendError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Live search results together with their regional reorganisation.
#[derive(Debug, Clone)]
pub struct RegionalAnalysis {
    pub term: String,
    pub results: Vec<TrendRecord>,
    pub matrix: RegionalMatrix,
}

#[async_trait::async_trait]
pub trait TrendService: Send + Sync {
    /// Aggregates every provider's trending terms and persists the first
    /// `persist_limit` records (all when `None`). Returns every record.
    async fn collect_trending(
        &self,
        persist_limit: Option<usize>,
    ) -> Result<Vec<TrendRecord>, TrendError>;

    /// Audits the search, queries every provider for `term` and persists the
    /// five records.
    async fn search_term(&self, term: &str) -> Result<Vec<TrendRecord>, TrendError>;

    /// Queries every provider for `term` without touching the database.
    async fn live_search(&self, term: &str) -> Vec<TrendRecord>;

    /// Fresh stored trends, optionally for one platform, highest volume first.
    async fn stored_trends(
        &self,
        platform: Option<&str>,
        limit: u64,
    ) -> Result<Vec<FormattedTrend>, TrendError>;

    async fn regional_analysis(&self, term: &str) -> RegionalAnalysis;
}
