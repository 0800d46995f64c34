use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use trendboard::config::Config;
use trendboard::providers::{RandomSource, TrendsQuery, build_providers};
use trendboard::state::SharedState;

/// Search-trends backend with canned answers.
struct CannedTrends;

#[async_trait::async_trait]
impl TrendsQuery for CannedTrends {
    async fn trending_searches(&self, _geo: &str) -> anyhow::Result<Vec<String>> {
        Ok(vec!["Flamengo".to_string(), "Mega-Sena".to_string()])
    }

    async fn interest_over_time(&self, _keyword: &str, _geo: &str) -> anyhow::Result<Vec<u32>> {
        Ok(vec![40, 60, 80])
    }

    async fn interest_by_region(
        &self,
        _keyword: &str,
        _geo: &str,
    ) -> anyhow::Result<Vec<(String, u32)>> {
        Ok(vec![
            ("Bahia".to_string(), 64),
            ("São Paulo".to_string(), 100),
            ("Acre".to_string(), 3),
        ])
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.providers.seed = Some(42);
    config
}

async fn spawn_app() -> Router {
    let config = test_config();
    let rng = RandomSource::from_config(config.providers.seed);
    let providers = build_providers(&config.providers, Arc::new(CannedTrends), &rng);

    let shared = SharedState::with_providers(config, providers)
        .await
        .expect("Failed to create shared state");
    let state = trendboard::api::create_app_state(Arc::new(shared), None);
    trendboard::api::router(state).expect("Failed to build router")
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_search(app: &Router, form: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/search")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_api_search_returns_one_record_per_platform() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/search/ofertas").await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 5);

    let platforms: Vec<&str> = records
        .iter()
        .map(|r| r["platform"].as_str().unwrap())
        .collect();
    assert_eq!(
        platforms,
        vec!["Google", "Facebook", "Instagram", "TikTok", "YouTube"]
    );
    assert!(records.iter().all(|r| r["term"] == "ofertas"));

    // Google: truncated mean of the timeline, regions highest first.
    assert_eq!(records[0]["volume"], 60);
    let google_regions: Vec<&String> = records[0]["regions"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(google_regions.len(), 3);
    assert_eq!(records[0]["regions"]["São Paulo"], 100);
}

#[tokio::test]
async fn test_api_search_does_not_persist() {
    let app = spawn_app().await;

    get_json(&app, "/api/search/ofertas").await;

    let (status, body) = get_json(&app, "/api/trends").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_trends_after_form_search() {
    let app = spawn_app().await;

    assert_eq!(post_search(&app, "search_term=ofertas").await, StatusCode::OK);

    // Google keeps its three real regions, each social platform five.
    let (status, body) = get_json(&app, "/api/trends?limit=1000").await;
    assert_eq!(status, StatusCode::OK);
    let trends = body.as_array().unwrap();
    assert_eq!(trends.len(), 3 + 4 * 5);

    let volumes: Vec<i64> = trends
        .iter()
        .map(|t| t["search_volume"].as_i64().unwrap())
        .collect();
    assert!(volumes.windows(2).all(|w| w[0] >= w[1]));

    let first = &trends[0];
    for field in ["term", "platform", "search_volume", "region", "date"] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
}

#[tokio::test]
async fn test_api_trends_platform_filter() {
    let app = spawn_app().await;
    post_search(&app, "search_term=ofertas").await;

    let (_, body) = get_json(&app, "/api/trends?platform=Google").await;
    let google = body.as_array().unwrap();
    assert_eq!(google.len(), 3);
    assert!(google.iter().all(|t| t["platform"] == "Google"));
    assert_eq!(google[0]["region"], "São Paulo");
    assert_eq!(google[0]["search_volume"], 100);

    // An empty platform parameter means no filter.
    let (_, body) = get_json(&app, "/api/trends?platform=&limit=1000").await;
    assert_eq!(body.as_array().unwrap().len(), 23);

    let (_, body) = get_json(&app, "/api/trends?platform=TikTok&limit=2").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_api_trends_limit_edges() {
    let app = spawn_app().await;
    assert_eq!(post_search(&app, "search_term=ofertas").await, StatusCode::OK);

    let (status, body) = get_json(&app, "/api/trends?limit=0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = get_json(&app, "/api/trends?limit=2000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 23);
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = spawn_app().await;

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_assets() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/static/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/css");

    let (status, body) = get_json(&app, "/static/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Asset missing.js not found");
}
