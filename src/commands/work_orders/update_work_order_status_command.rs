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
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Moves a work order to a new status. The transition is checked against the
/// allowed edges of the lifecycle; anything else is rejected with a conflict
/// before any write happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkOrderStatusCommand {
    pub work_order_id: Uuid,
    pub new_status: WorkOrderStatus,
}

#[async_trait]
impl Command for UpdateWorkOrderStatusCommand {
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

        let old_status = target.status;

        // Same-status moves are idempotent no-ops.
        if old_status == self.new_status {
            return Ok(target);
        }

        if !old_status.can_transition_to(self.new_status) {
            warn!(
                work_order_id = %self.work_order_id,
                from = %old_status,
                to = %self.new_status,
                "Rejected work order transition"
            );
            return Err(ServiceError::InvalidTransition {
                from: old_status.to_string(),
                to: self.new_status.to_string(),
            });
        }

        let mut active = target.into_active_model();
        active.status = Set(self.new_status);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*db_pool).await?;

        info!(
            work_order_id = %updated.id,
            from = %old_status,
            to = %updated.status,
            "Work order status changed"
        );
        event_sender
            .send_or_log(Event::WorkOrderStatusChanged {
                work_order_id: updated.id,
                old_status,
                new_status: updated.status,
            })
            .await;

        Ok(updated)
    }
}
