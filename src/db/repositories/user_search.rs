use super::trend::TIMESTAMP_FORMAT;
use crate::entities::{prelude::*, user_searches};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

pub struct UserSearchRepository {
    conn: DatabaseConnection,
}

impl UserSearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, search_term: &str) -> Result<()> {
        let active_model = user_searches::ActiveModel {
            search_term: Set(search_term.to_string()),
            search_date: Set(chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()),
            ..Default::default()
        };

        UserSearches::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<user_searches::Model>> {
        let rows = UserSearches::find()
            .order_by_desc(user_searches::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
