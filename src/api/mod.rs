use axum::{Router, middleware, routing::get};
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::state::SharedState;

mod assets;
mod error;
pub mod flash;
mod observability;
mod pages;
mod system;
mod trends;
mod types;
mod validation;
pub mod views;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn trend_service(&self) -> &Arc<dyn crate::services::TrendService> {
        &self.shared.trend_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

/// Stretches the configured secret to the 64 bytes a cookie signing key needs.
pub fn session_key(secret: &str) -> anyhow::Result<Key> {
    let digest = Sha512::digest(secret.as_bytes());
    Key::try_from(digest.as_slice())
        .map_err(|e| anyhow::anyhow!("Secret key cannot sign session cookies: {e:?}"))
}

pub fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let key = session_key(&state.config().server.secret_key)?;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config().server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)))
        .with_signed(key);

    let pages = Router::new()
        .route("/", get(pages::index))
        .route("/search", get(pages::search_form).post(pages::search))
        .route("/ranking", get(pages::ranking))
        .route("/regional/{term}", get(pages::regional))
        .route("/refresh", get(pages::refresh))
        .layer(session_layer);

    let api = Router::new()
        .route("/trends", get(trends::list_trends))
        .route("/search/{term}", get(trends::search_term));

    Ok(Router::new()
        .merge(pages)
        .nest("/api", api)
        .route("/static/{*path}", get(assets::serve_asset))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware)))
}
