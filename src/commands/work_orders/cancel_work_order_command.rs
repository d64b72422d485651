use crate::{
    commands::Command,
    db::DbPool,
    entities::work_order,
    errors::ServiceError,
    events::{Event, EventSender},
    models::WorkOrderStatus,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Cancels a work order. Allowed from every non-terminal status; cancelling
/// an already cancelled order is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelWorkOrderCommand {
    pub work_order_id: Uuid,
    pub reason: Option<String>,
}

#[async_trait]
impl Command for CancelWorkOrderCommand {
    type Result = work_order::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let target = work_order::Entity::find_by_id(self.work_order_id)
            .one(&*db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", self.work_order_id))
            })?;

        if target.status == WorkOrderStatus::Cancelled {
            return Ok(target);
        }
        if target.status == WorkOrderStatus::Completed {
            return Err(ServiceError::InvalidTransition {
                from: target.status.to_string(),
                to: WorkOrderStatus::Cancelled.to_string(),
            });
        }

        let old_status = target.status;
        let mut active = target.into_active_model();
        active.status = Set(WorkOrderStatus::Cancelled);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*db_pool).await?;

        info!(
            work_order_id = %updated.id,
            reason = self.reason.as_deref().unwrap_or("none"),
            "Work order cancelled"
        );
        event_sender
            .send_or_log(Event::WorkOrderStatusChanged {
                work_order_id: updated.id,
                old_status,
                new_status: WorkOrderStatus::Cancelled,
            })
            .await;

        Ok(updated)
    }
}
