//! Trend providers: one adapter per source platform.
//!
//! Every provider exposes the same three capabilities and never fails:
//! transport or data errors are logged and turned into empty results.

use crate::config::ProvidersConfig;
use crate::models::trend::{Platform, RegionBreakdown};
use std::sync::Arc;

pub mod google;
pub mod random;
pub mod regions;
pub mod social;

pub use google::{GoogleTrendsProvider, TrendsQuery};
pub use random::RandomSource;
pub use social::SocialProvider;

#[async_trait::async_trait]
pub trait TrendProvider: Send + Sync {
    fn platform(&self) -> Platform;

    /// Terms currently trending on this platform.
    async fn trending_terms(&self) -> Vec<String>;

    /// Search volume for a term; 0 when unknown.
    async fn volume(&self, term: &str) -> u64;

    /// Per-region volume for a term.
    async fn regional_breakdown(&self, term: &str) -> RegionBreakdown;
}

/// Builds the five providers in aggregation order, with Google backed by
/// `google_backend`.
#[must_use]
pub fn build_providers(
    config: &ProvidersConfig,
    google_backend: Arc<dyn TrendsQuery>,
    rng: &RandomSource,
) -> Vec<Arc<dyn TrendProvider>> {
    vec![
        Arc::new(GoogleTrendsProvider::new(
            google_backend,
            rng.clone(),
            config.country.clone(),
            config.trending_limit,
        )),
        Arc::new(SocialProvider::facebook(
            rng.clone(),
            config.facebook_access_token.clone(),
        )),
        Arc::new(SocialProvider::instagram(
            rng.clone(),
            config.instagram_access_token.clone(),
        )),
        Arc::new(SocialProvider::tiktok(
            rng.clone(),
            config.tiktok_api_key.clone(),
        )),
        Arc::new(SocialProvider::youtube(rng.clone(), None)),
    ]
}
