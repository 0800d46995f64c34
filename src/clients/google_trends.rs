//! Client for the public Google Trends web endpoints.
//!
//! Interest queries are two-step: `explore` hands out a token per widget,
//! then each widget endpoint is called with its token and request payload.

use crate::config::ProvidersConfig;
use crate::providers::TrendsQuery;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use url::Url;

const TRENDS_BASE: &str = "https://trends.google.com";
const EXPLORE_PATH: &str = "/trends/api/explore";
const MULTILINE_PATH: &str = "/trends/api/widgetdata/multiline";
const COMPARED_GEO_PATH: &str = "/trends/api/widgetdata/comparedgeo";
const TRENDING_RSS_PATH: &str = "/trending/rss";

/// Last seven days, the window every interest query uses.
const TIMEFRAME: &str = "now 7-d";

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    token: String,
    request: Value,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: TimelineData,
}

#[derive(Debug, Deserialize)]
struct TimelineData {
    #[serde(rename = "timelineData", default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    #[serde(default)]
    value: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct ComparedGeoResponse {
    default: GeoMapData,
}

#[derive(Debug, Deserialize)]
struct GeoMapData {
    #[serde(rename = "geoMapData", default)]
    geo_map_data: Vec<GeoPoint>,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    #[serde(rename = "geoName")]
    geo_name: String,
    #[serde(default)]
    value: Vec<u32>,
    #[serde(rename = "hasData", default)]
    has_data: Vec<bool>,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: String,
}

#[derive(Clone)]
pub struct GoogleTrendsClient {
    client: Client,
    base_url: String,
    language: String,
    timezone_offset: i32,
}

impl GoogleTrendsClient {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.into()))
            .user_agent("Mozilla/5.0 (compatible; Trendboard/1.0)")
            .cookie_store(true)
            .build()
            .context("Failed to build Google Trends HTTP client")?;

        Ok(Self {
            client,
            base_url: TRENDS_BASE.to_string(),
            language: config.language.clone(),
            timezone_offset: config.timezone_offset,
        })
    }

    /// Points the client at another host, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse_with_params(&base, params).with_context(|| format!("Invalid URL: {base}"))
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        debug!(url = %url, "Google Trends request");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Google Trends error: {} - {}", status, body));
        }

        Ok(response.text().await?)
    }

    async fn explore(&self, keyword: &str, geo: &str) -> Result<Vec<Widget>> {
        let req = json!({
            "comparisonItem": [{ "keyword": keyword, "time": TIMEFRAME, "geo": geo }],
            "category": 0,
            "property": "",
        })
        .to_string();
        let tz = self.timezone_offset.to_string();

        let url = self.url(
            EXPLORE_PATH,
            &[
                ("hl", self.language.as_str()),
                ("tz", tz.as_str()),
                ("req", req.as_str()),
            ],
        )?;

        let body = self.get_text(url).await?;
        let response: ExploreResponse = parse_guarded_json(&body)?;
        Ok(response.widgets)
    }

    async fn widget(&self, keyword: &str, geo: &str, id: &str) -> Result<Option<Widget>> {
        let widgets = self.explore(keyword, geo).await?;
        Ok(widgets.into_iter().find(|w| w.id == id))
    }

    async fn widget_data(&self, path: &str, widget: &Widget) -> Result<String> {
        let req = widget.request.to_string();
        let tz = self.timezone_offset.to_string();
        let url = self.url(
            path,
            &[
                ("hl", self.language.as_str()),
                ("tz", tz.as_str()),
                ("req", req.as_str()),
                ("token", widget.token.as_str()),
            ],
        )?;
        self.get_text(url).await
    }
}

#[async_trait::async_trait]
impl TrendsQuery for GoogleTrendsClient {
    async fn trending_searches(&self, geo: &str) -> Result<Vec<String>> {
        let url = self.url(TRENDING_RSS_PATH, &[("geo", geo)])?;
        let body = self.get_text(url).await?;
        parse_trending_rss(&body)
    }

    async fn interest_over_time(&self, keyword: &str, geo: &str) -> Result<Vec<u32>> {
        let Some(widget) = self.widget(keyword, geo, "TIMESERIES").await? else {
            return Ok(Vec::new());
        };

        let body = self.widget_data(MULTILINE_PATH, &widget).await?;
        let response: MultilineResponse = parse_guarded_json(&body)?;
        Ok(timeline_values(response))
    }

    async fn interest_by_region(&self, keyword: &str, geo: &str) -> Result<Vec<(String, u32)>> {
        let Some(mut widget) = self.widget(keyword, geo, "GEO_MAP").await? else {
            return Ok(Vec::new());
        };

        if let Some(request) = widget.request.as_object_mut() {
            request.insert("resolution".to_string(), json!("REGION"));
            request.insert("includeLowSearchVolumeGeos".to_string(), json!(false));
        }

        let body = self.widget_data(COMPARED_GEO_PATH, &widget).await?;
        let response: ComparedGeoResponse = parse_guarded_json(&body)?;
        Ok(region_values(response))
    }
}

/// Google prefixes JSON bodies with `)]}'` to defeat JSON hijacking.
fn parse_guarded_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    let start = body
        .find('{')
        .ok_or_else(|| anyhow::anyhow!("Google Trends response has no JSON payload"))?;
    serde_json::from_str(&body[start..]).context("Failed to parse Google Trends response")
}

fn parse_trending_rss(xml: &str) -> Result<Vec<String>> {
    let rss: Rss = quick_xml::de::from_str(xml).context("Failed to parse trending RSS")?;
    Ok(rss
        .channel
        .items
        .into_iter()
        .map(|item| item.title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect())
}

fn timeline_values(response: MultilineResponse) -> Vec<u32> {
    response
        .default
        .timeline_data
        .into_iter()
        .filter_map(|point| point.value.first().copied())
        .collect()
}

fn region_values(response: ComparedGeoResponse) -> Vec<(String, u32)> {
    response
        .default
        .geo_map_data
        .into_iter()
        .filter(|point| point.has_data.first().copied().unwrap_or(true))
        .filter_map(|point| point.value.first().map(|v| (point.geo_name, *v)))
        .collect()
}
