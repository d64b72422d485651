use crate::{
    commands::Command,
    db::DbPool,
    entities::work_order,
    errors::ServiceError,
    events::{Event, EventSender},
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTechnicianCommand {
    pub work_order_id: Uuid,
    pub technician_id: Option<Uuid>,
    pub service_advisor_id: Option<Uuid>,
}

#[async_trait]
impl Command for AssignTechnicianCommand {
    type Result = work_order::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        if self.technician_id.is_none() && self.service_advisor_id.is_none() {
            return Err(ServiceError::InvalidInput(
                "Provide a technician_id, a service_advisor_id, or both".to_string(),
            ));
        }

        let target = work_order::Entity::find_by_id(self.work_order_id)
            .one(&*db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", self.work_order_id))
            })?;

        if target.status.is_terminal() {
            return Err(ServiceError::Conflict(format!(
                "Work order {} is {} and can no longer be assigned",
                target.work_order_number, target.status
            )));
        }

        let mut active = target.into_active_model();
        if let Some(technician_id) = self.technician_id {
            active.technician_id = Set(Some(technician_id));
        }
        if let Some(advisor_id) = self.service_advisor_id {
            active.service_advisor_id = Set(Some(advisor_id));
        }
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*db_pool).await?;

        info!(
            work_order_id = %updated.id,
            technician_id = ?self.technician_id,
            service_advisor_id = ?self.service_advisor_id,
            "Work order assignment updated"
        );
        if let Some(technician_id) = self.technician_id {
            event_sender
                .send_or_log(Event::WorkOrderAssigned {
                    work_order_id: updated.id,
                    technician_id,
                })
                .await;
        }

        Ok(updated)
    }
}
