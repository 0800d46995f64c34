//! Server-rendered pages.

use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{error, info};

use super::flash::{self, Flash};
use super::validation::search_term;
use super::{ApiError, AppState, SearchForm, views};

/// # Endpoint
/// `GET /`
pub async fn index(session: Session) -> Result<Html<String>, ApiError> {
    let flashes = flash::take(&session).await?;
    Ok(Html(views::index(&flashes)))
}

/// # Endpoint
/// `GET /search`
pub async fn search_form() -> Html<String> {
    Html(views::search_form())
}

/// A term runs a per-platform search that is audited and stored. A blank
/// submission collects the general trends instead and stores the top of the
/// ranking.
///
/// # Endpoint
/// `POST /search`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, ApiError> {
    if let Some(term) = search_term(&form.search_term) {
        let results = state.trend_service().search_term(term).await?;
        return Ok(Html(views::search_results(term, &results)));
    }

    let persist_limit = state.config().trends.max_results_per_platform;
    let trends = state
        .trend_service()
        .collect_trending(Some(persist_limit))
        .await?;
    Ok(Html(views::trending(&trends)))
}

/// # Endpoint
/// `GET /ranking`
pub async fn ranking(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let trends = state
        .trend_service()
        .stored_trends(None, state.config().trends.ranking_limit)
        .await?;
    Ok(Html(views::ranking(&trends)))
}

/// # Endpoint
/// `GET /regional/{term}`
pub async fn regional(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
) -> Html<String> {
    let analysis = state.trend_service().regional_analysis(&term).await;
    Html(views::regional(&analysis))
}

/// Collects and stores every trend, then renders the landing page with the
/// outcome as a notice. Failures never change the status code.
///
/// # Endpoint
/// `GET /refresh`
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let notice = match state.trend_service().collect_trending(None).await {
        Ok(trends) => {
            info!(count = trends.len(), "Trends refreshed");
            Flash::success(format!(
                "Tendências atualizadas! {} termos coletados.",
                trends.len()
            ))
        }
        Err(e) => {
            error!(error = %e, "Trend refresh failed");
            Flash::error(format!("Erro ao atualizar tendências: {e}"))
        }
    };

    flash::push(&session, notice).await?;
    index(session).await
}
