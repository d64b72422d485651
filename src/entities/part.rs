use crate::models::PartCategory;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog part. Common columns live here; category-specific attributes are
/// a tagged [`crate::models::PartDetails`] value in the `details` JSON
/// column. Availability is derived from `quantity`/`min_quantity` on read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub part_number: String,
    pub name: String,
    pub category: PartCategory,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub compatibility: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub vendor_id: Option<Uuid>,
    #[sea_orm(column_type = "Json")]
    pub details: Json,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
