//! `SeaORM` implementation of the `TrendService` trait.

use crate::db::Store;
use crate::models::trend::TrendRecord;
use crate::services::aggregator::TrendsAggregator;
use crate::services::formatter::{FormattedTrend, format_trends_for_display};
use crate::services::trend_service::{RegionalAnalysis, TrendError, TrendService};
use async_trait::async_trait;
use tracing::{info, instrument};

pub struct SeaOrmTrendService {
    store: Store,
    aggregator: TrendsAggregator,
}

impl SeaOrmTrendService {
    #[must_use]
    pub const fn new(store: Store, aggregator: TrendsAggregator) -> Self {
        Self { store, aggregator }
    }

    /// Writes one row per region entry of each record.
    async fn persist(&self, records: &[TrendRecord]) -> Result<usize, TrendError> {
        let mut rows = 0;

        for record in records {
            let platform = record.platform.as_str();
            for (region, volume) in record.regions.iter() {
                let volume = i64::try_from(volume)
                    .map_err(|_| TrendError::Internal(format!("Volume out of range: {volume}")))?;
                self.store
                    .save_trend(&record.term, platform, volume, Some(region))
                    .await?;
                rows += 1;
            }
        }

        Ok(rows)
    }
}

#[async_trait]
impl TrendService for SeaOrmTrendService {
    #[instrument(skip(self))]
    async fn collect_trending(
        &self,
        persist_limit: Option<usize>,
    ) -> Result<Vec<TrendRecord>, TrendError> {
        let records = self.aggregator.get_all_trends().await;

        let to_persist = match persist_limit {
            Some(limit) => &records[..limit.min(records.len())],
            None => &records[..],
        };
        let rows = self.persist(to_persist).await?;

        info!(
            records = records.len(),
            persisted = to_persist.len(),
            rows,
            "Collected trending terms"
        );
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn search_term(&self, term: &str) -> Result<Vec<TrendRecord>, TrendError> {
        self.store.save_user_search(term).await?;

        let records = self.aggregator.search_specific_term(term).await;
        let rows = self.persist(&records).await?;

        info!(term, rows, "Stored term search");
        Ok(records)
    }

    async fn live_search(&self, term: &str) -> Vec<TrendRecord> {
        self.aggregator.search_specific_term(term).await
    }

    async fn stored_trends(
        &self,
        platform: Option<&str>,
        limit: u64,
    ) -> Result<Vec<FormattedTrend>, TrendError> {
        let rows = self.store.get_trends(platform, limit).await?;
        Ok(format_trends_for_display(rows))
    }

    async fn regional_analysis(&self, term: &str) -> RegionalAnalysis {
        let results = self.aggregator.search_specific_term(term).await;
        let matrix = TrendsAggregator::regional_matrix(&results);

        RegionalAnalysis {
            term: term.to_string(),
            results,
            matrix,
        }
    }
}
