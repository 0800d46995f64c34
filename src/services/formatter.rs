use crate::models::trend::StoredTrendRow;
use serde::Serialize;

/// Shown in place of a missing region.
pub const DEFAULT_REGION: &str = "Brasil";

/// A stored trend ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTrend {
    pub term: String,
    pub platform: String,
    pub search_volume: i64,
    pub region: String,
    pub date: String,
}

impl From<StoredTrendRow> for FormattedTrend {
    fn from(row: StoredTrendRow) -> Self {
        let region = row
            .region
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            term: row.term,
            platform: row.platform,
            search_volume: row.search_volume,
            region,
            date: row.date_collected,
        }
    }
}

#[must_use]
pub fn format_trends_for_display(rows: Vec<StoredTrendRow>) -> Vec<FormattedTrend> {
    rows.into_iter().map(FormattedTrend::from).collect()
}
