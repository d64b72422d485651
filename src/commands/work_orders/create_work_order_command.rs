use crate::{
    commands::Command,
    db::DbPool,
    entities::work_order,
    errors::ServiceError,
    events::{Event, EventSender},
    models::{JobType, WorkOrderPriority, WorkOrderSource, WorkOrderStatus},
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateWorkOrderCommand {
    pub job_type: JobType,
    #[serde(default)]
    pub priority: Option<WorkOrderPriority>,
    #[serde(default)]
    pub source: Option<WorkOrderSource>,
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub service_advisor_id: Option<Uuid>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub odometer_km: Option<i32>,
}

impl CreateWorkOrderCommand {
    /// New work orders always enter the board at the reception column.
    fn initial_status(&self) -> WorkOrderStatus {
        WorkOrderStatus::Received
    }

    fn generate_number() -> String {
        let now = Utc::now();
        format!(
            "WO-{}-{}",
            now.format("%Y%m%d"),
            Uuid::new_v4().simple().to_string()[..6].to_uppercase()
        )
    }
}

#[async_trait]
impl Command for CreateWorkOrderCommand {
    type Result = work_order::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate()?;

        let now = Utc::now();
        let model = work_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_number: Set(Self::generate_number()),
            status: Set(self.initial_status()),
            job_type: Set(self.job_type),
            priority: Set(self.priority.unwrap_or(WorkOrderPriority::Normal)),
            source: Set(self.source.unwrap_or(WorkOrderSource::WalkIn)),
            customer_id: Set(self.customer_id),
            vehicle_id: Set(self.vehicle_id),
            service_advisor_id: Set(self.service_advisor_id),
            technician_id: Set(None),
            description: Set(self.description.clone()),
            odometer_km: Set(self.odometer_km),
            estimated_total: Set(None),
            subtotal_labor: Set(None),
            subtotal_parts: Set(None),
            tax_amount: Set(None),
            total_amount: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = model.insert(&*db_pool).await.map_err(|e| {
            error!("Failed to create work order: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(
            work_order_id = %saved.id,
            work_order_number = %saved.work_order_number,
            "Work order created"
        );
        event_sender
            .send_or_log(Event::WorkOrderCreated(saved.id))
            .await;

        Ok(saved)
    }
}
