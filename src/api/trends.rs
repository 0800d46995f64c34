use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{clamp_limit, platform_filter};
use super::{ApiError, AppState, TrendsParams};
use crate::models::trend::TrendRecord;
use crate::services::FormattedTrend;

/// Fresh stored trends, highest volume first.
///
/// # Endpoint
/// `GET /api/trends?platform=Google&limit=50`
///
/// An empty `platform` is treated as no filter. `limit=0` gives an empty
/// list and oversized limits are capped.
pub async fn list_trends(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrendsParams>,
) -> Result<Json<Vec<FormattedTrend>>, ApiError> {
    let limit = clamp_limit(
        query
            .limit
            .unwrap_or(state.config().trends.api_default_limit),
    );
    let platform = platform_filter(query.platform.as_deref());

    let trends = state.trend_service().stored_trends(platform, limit).await?;
    Ok(Json(trends))
}

/// Live per-platform records for a term. Nothing is persisted.
///
/// # Endpoint
/// `GET /api/search/{term}`
pub async fn search_term(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
) -> Json<Vec<TrendRecord>> {
    Json(state.trend_service().live_search(&term).await)
}
