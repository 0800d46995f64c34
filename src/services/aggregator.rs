//! Merges every provider's output into ranked or grouped views.

use crate::models::trend::{Platform, TrendRecord};
use crate::providers::TrendProvider;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Region to platform to volume, with regions in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionalMatrix {
    rows: Vec<RegionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRow {
    pub region: String,
    pub volumes: Vec<(Platform, u64)>,
}

impl RegionRow {
    #[must_use]
    pub fn volume(&self, platform: Platform) -> Option<u64> {
        self.volumes
            .iter()
            .find(|(p, _)| *p == platform)
            .map(|(_, v)| *v)
    }
}

impl RegionalMatrix {
    #[must_use]
    pub fn from_records(records: &[TrendRecord]) -> Self {
        let mut matrix = Self::default();

        for record in records {
            for (region, volume) in record.regions.iter() {
                let row = match matrix.rows.iter().position(|r| r.region == region) {
                    Some(index) => &mut matrix.rows[index],
                    None => {
                        matrix.rows.push(RegionRow {
                            region: region.to_string(),
                            volumes: Vec::new(),
                        });
                        let last = matrix.rows.len() - 1;
                        &mut matrix.rows[last]
                    }
                };

                // A later record for the same platform overwrites the earlier value.
                match row.volumes.iter_mut().find(|(p, _)| *p == record.platform) {
                    Some(entry) => entry.1 = volume,
                    None => row.volumes.push((record.platform, volume)),
                }
            }
        }

        matrix
    }

    pub fn rows(&self) -> &[RegionRow] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, region: &str, platform: Platform) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.region == region)
            .and_then(|r| r.volume(platform))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone)]
pub struct TrendsAggregator {
    providers: Vec<Arc<dyn TrendProvider>>,
}

impl TrendsAggregator {
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn TrendProvider>>) -> Self {
        Self { providers }
    }

    /// Collects every trending term of every provider, ranked by volume.
    ///
    /// Providers are queried one after another. Equal volumes keep provider
    /// order, and duplicates across platforms are kept.
    pub async fn get_all_trends(&self) -> Vec<TrendRecord> {
        let mut records = Vec::new();

        for provider in &self.providers {
            let platform = provider.platform();
            let terms = provider.trending_terms().await;
            debug!(%platform, count = terms.len(), "Collected trending terms");

            for term in terms {
                let volume = provider.volume(&term).await;
                let regions = provider.regional_breakdown(&term).await;
                records.push(TrendRecord {
                    term,
                    platform,
                    volume,
                    regions,
                });
            }
        }

        records.sort_by(|a, b| b.volume.cmp(&a.volume));
        info!(count = records.len(), "Aggregated trends");
        records
    }

    /// One record per provider for `term`, in provider order.
    pub async fn search_specific_term(&self, term: &str) -> Vec<TrendRecord> {
        let mut records = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            records.push(TrendRecord {
                term: term.to_string(),
                platform: provider.platform(),
                volume: provider.volume(term).await,
                regions: provider.regional_breakdown(term).await,
            });
        }

        records
    }

    #[must_use]
    pub fn regional_matrix(records: &[TrendRecord]) -> RegionalMatrix {
        RegionalMatrix::from_records(records)
    }
}
