use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One collected measurement. Rows are append-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "trends")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub term: String,
    pub platform: String,
    pub search_volume: i64,
    pub region: Option<String>,
    pub date_collected: String, // YYYY-MM-DD, compared lexically
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
