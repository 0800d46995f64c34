use crate::entities::{prelude::*, trends};
use crate::models::trend::StoredTrendRow;
use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct TrendRepository {
    conn: DatabaseConnection,
}

impl TrendRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn save(
        &self,
        term: &str,
        platform: &str,
        search_volume: i64,
        region: Option<&str>,
    ) -> Result<()> {
        let now = Utc::now();

        let active_model = trends::ActiveModel {
            term: Set(term.to_string()),
            platform: Set(platform.to_string()),
            search_volume: Set(search_volume),
            region: Set(region.map(str::to_string)),
            date_collected: Set(now.date_naive().format(DATE_FORMAT).to_string()),
            created_at: Set(now.format(TIMESTAMP_FORMAT).to_string()),
            ..Default::default()
        };

        Trends::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    /// Rows collected on or after `today - window_days`, loudest first.
    pub async fn fresh(
        &self,
        platform: Option<&str>,
        limit: u64,
        window_days: u32,
        today: NaiveDate,
    ) -> Result<Vec<StoredTrendRow>> {
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MIN)
            .format(DATE_FORMAT)
            .to_string();

        let mut query = Trends::find().filter(trends::Column::DateCollected.gte(cutoff));

        if let Some(platform) = platform {
            query = query.filter(trends::Column::Platform.eq(platform));
        }

        let rows = query
            .order_by_desc(trends::Column::SearchVolume)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| StoredTrendRow {
                term: m.term,
                platform: m.platform,
                search_volume: m.search_volume,
                region: m.region,
                date_collected: m.date_collected,
            })
            .collect())
    }
}
