use std::sync::Arc;

use crate::clients::google_trends::GoogleTrendsClient;
use crate::config::Config;
use crate::db::Store;
use crate::providers::{RandomSource, TrendProvider, build_providers};
use crate::services::{SeaOrmTrendService, TrendService, TrendsAggregator};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub trend_service: Arc<dyn TrendService>,
}

impl SharedState {
    /// Wires the production providers: Google Trends over HTTP plus the
    /// simulated social platforms.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let google = Arc::new(GoogleTrendsClient::new(&config.providers)?);
        let rng = RandomSource::from_config(config.providers.seed);
        let providers = build_providers(&config.providers, google, &rng);

        Self::with_providers(config, providers).await
    }

    /// Builds the state around an explicit provider list.
    pub async fn with_providers(
        config: Config,
        providers: Vec<Arc<dyn TrendProvider>>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?
        .with_window_days(config.trends.default_search_days);

        let aggregator = TrendsAggregator::new(providers);

        let trend_service = Arc::new(SeaOrmTrendService::new(
            store.clone(),
            aggregator,
        )) as Arc<dyn TrendService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            trend_service,
        })
    }
}
