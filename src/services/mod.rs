pub mod aggregator;
pub use aggregator::{RegionRow, RegionalMatrix, TrendsAggregator};

pub mod formatter;
pub use formatter::{FormattedTrend, format_trends_for_display};

pub mod trend_service;
pub mod trend_service_impl;
pub use trend_service::{RegionalAnalysis, TrendError, TrendService};
pub use trend_service_impl::SeaOrmTrendService;
