use super::random::RandomSource;
use super::regions::{BRAZILIAN_STATES, TOP_REGIONS, draw_top};
use super::TrendProvider;
use crate::models::trend::{Platform, RegionBreakdown};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Raw queries against a search-trends backend.
///
/// Errors are surfaced here; [`GoogleTrendsProvider`] decides how to degrade.
#[async_trait::async_trait]
pub trait TrendsQuery: Send + Sync {
    /// Today's trending searches for a country.
    async fn trending_searches(&self, geo: &str) -> Result<Vec<String>>;

    /// Interest values (0-100) over the last seven days.
    async fn interest_over_time(&self, keyword: &str, geo: &str) -> Result<Vec<u32>>;

    /// Interest (0-100) per sub-region of `geo`.
    async fn interest_by_region(&self, keyword: &str, geo: &str) -> Result<Vec<(String, u32)>>;
}

pub struct GoogleTrendsProvider {
    backend: Arc<dyn TrendsQuery>,
    rng: RandomSource,
    geo: String,
    trending_limit: usize,
}

impl GoogleTrendsProvider {
    #[must_use]
    pub fn new(
        backend: Arc<dyn TrendsQuery>,
        rng: RandomSource,
        geo: String,
        trending_limit: usize,
    ) -> Self {
        Self {
            backend,
            rng,
            geo,
            trending_limit,
        }
    }

    /// Population-weighted stand-in used when the backend has no regional data.
    #[must_use]
    pub fn simulated_regions(&self) -> RegionBreakdown {
        draw_top(&BRAZILIAN_STATES, &self.rng)
    }
}

#[async_trait::async_trait]
impl TrendProvider for GoogleTrendsProvider {
    fn platform(&self) -> Platform {
        Platform::Google
    }

    async fn trending_terms(&self) -> Vec<String> {
        match self.backend.trending_searches(&self.geo).await {
            Ok(mut terms) => {
                terms.truncate(self.trending_limit);
                terms
            }
            Err(e) => {
                warn!(error = %e, geo = %self.geo, "Failed to fetch Google trending searches");
                Vec::new()
            }
        }
    }

    async fn volume(&self, term: &str) -> u64 {
        match self.backend.interest_over_time(term, &self.geo).await {
            Ok(values) if values.is_empty() => 0,
            Ok(values) => {
                let total: u64 = values.iter().map(|v| u64::from(*v)).sum();
                total / values.len() as u64
            }
            Err(e) => {
                warn!(error = %e, term, "Failed to fetch Google interest over time");
                0
            }
        }
    }

    async fn regional_breakdown(&self, term: &str) -> RegionBreakdown {
        match self.backend.interest_by_region(term, &self.geo).await {
            Ok(mut regions) if !regions.is_empty() => {
                regions.sort_by(|a, b| b.1.cmp(&a.1));
                regions
                    .into_iter()
                    .take(TOP_REGIONS)
                    .map(|(name, value)| (name, u64::from(value)))
                    .collect()
            }
            Ok(_) => {
                debug!(term, "No regional data from Google, using simulated states");
                self.simulated_regions()
            }
            Err(e) => {
                warn!(error = %e, term, "Failed to fetch Google regional interest");
                self.simulated_regions()
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::providers::regions::range_for;

    /// Backend returning canned data, or failing every call.
    #[derive(Default)]
    pub struct StubTrends {
        pub trending: Vec<String>,
        pub timeline: Vec<u32>,
        pub regions: Vec<(String, u32)>,
        pub fail: bool,
    }

    #[async_trait::async_trait]
    impl TrendsQuery for StubTrends {
        async fn trending_searches(&self, _geo: &str) -> Result<Vec<String>> {
            if self.fail {
                anyhow::bail!("network down");
            }
            Ok(self.trending.clone())
        }

        async fn interest_over_time(&self, _keyword: &str, _geo: &str) -> Result<Vec<u32>> {
            if self.fail {
                anyhow::bail!("network down");
            }
            Ok(self.timeline.clone())
        }

        async fn interest_by_region(
            &self,
            _keyword: &str,
            _geo: &str,
        ) -> Result<Vec<(String, u32)>> {
            if self.fail {
                anyhow::bail!("network down");
            }
            Ok(self.regions.clone())
        }
    }

    fn provider(stub: StubTrends) -> GoogleTrendsProvider {
        GoogleTrendsProvider::new(Arc::new(stub), RandomSource::seeded(8), "BR".into(), 20)
    }

    fn assert_simulated(regions: &RegionBreakdown) {
        assert_eq!(regions.len(), TOP_REGIONS);
        for (region, value) in regions.iter() {
            let range = range_for(&BRAZILIAN_STATES, region).expect("state from table");
            assert!(range.contains(&value), "{region}={value}");
        }
    }

    #[tokio::test]
    async fn test_trending_terms_capped() {
        let stub = StubTrends {
            trending: (0..30).map(|i| format!("termo {i}")).collect(),
            ..Default::default()
        };
        let terms = provider(stub).trending_terms().await;
        assert_eq!(terms.len(), 20);
        assert_eq!(terms[0], "termo 0");
    }

    #[tokio::test]
    async fn test_volume_is_truncated_mean() {
        let stub = StubTrends {
            timeline: vec![10, 20, 31],
            ..Default::default()
        };
        assert_eq!(provider(stub).volume("ofertas").await, 20);
    }

    #[tokio::test]
    async fn test_volume_zero_when_empty_or_failing() {
        assert_eq!(provider(StubTrends::default()).volume("x").await, 0);

        let failing = StubTrends {
            fail: true,
            ..Default::default()
        };
        let google = provider(failing);
        assert_eq!(google.volume("x").await, 0);
        assert!(google.trending_terms().await.is_empty());
    }

    #[tokio::test]
    async fn test_real_regions_top_five_descending() {
        let stub = StubTrends {
            regions: vec![
                ("Acre".into(), 10),
                ("Bahia".into(), 70),
                ("Ceará".into(), 40),
                ("Goiás".into(), 55),
                ("Pará".into(), 5),
                ("São Paulo".into(), 100),
                ("Sergipe".into(), 0),
            ],
            ..Default::default()
        };

        let regions = provider(stub).regional_breakdown("x").await;
        let pairs: Vec<(&str, u64)> = regions.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("São Paulo", 100),
                ("Bahia", 70),
                ("Goiás", 55),
                ("Ceará", 40),
                ("Acre", 10)
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_regional_data_uses_simulated_states() {
        let regions = provider(StubTrends::default())
            .regional_breakdown("ofertas")
            .await;
        assert_simulated(&regions);
    }

    #[tokio::test]
    async fn test_failed_regional_query_uses_simulated_states() {
        let failing = StubTrends {
            fail: true,
            ..Default::default()
        };
        let regions = provider(failing).regional_breakdown("ofertas").await;
        assert_simulated(&regions);
    }
}
