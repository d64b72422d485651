use crate::models::{JobType, WorkOrderPriority, WorkOrderSource, WorkOrderStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub work_order_number: String,
    pub status: WorkOrderStatus,
    pub job_type: JobType,
    pub priority: WorkOrderPriority,
    pub source: WorkOrderSource,
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub service_advisor_id: Option<Uuid>,
    pub technician_id: Option<Uuid>,
    pub description: Option<String>,
    pub odometer_km: Option<i32>,
    // Financial snapshot, recomputed whenever an estimate is generated.
    pub estimated_total: Option<Decimal>,
    pub subtotal_labor: Option<Decimal>,
    pub subtotal_parts: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
