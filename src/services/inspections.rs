use crate::{
    db::DbPool,
    entities::{inspection, inspection_item, inspection_template, inspection_template_item, work_order},
    errors::ServiceError,
    events::{Event, EventSender},
    models::{ChecklistItemStatus, ChecklistSignal},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Counts of checklist items per traffic-light signal, for the summary
/// strip above an inspection.
#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
pub struct InspectionSummary {
    pub total: u32,
    pub open: u32,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct InspectionWithItems {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub inspection: inspection::Model,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<inspection_item::Model>,
    pub summary: InspectionSummary,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TemplateWithItems {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub template: inspection_template::Model,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<inspection_template_item::Model>,
}

#[derive(Debug, Clone, serde::Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize, utoipa::ToSchema)]
pub struct UpdateChecklistItemRequest {
    pub status: ChecklistItemStatus,
    pub notes: Option<String>,
}

/// Manages inspection templates and the checklists stamped from them onto
/// work orders.
#[derive(Clone)]
pub struct InspectionService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl InspectionService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_template(
        &self,
        request: CreateTemplateRequest,
    ) -> Result<inspection_template::Model, ServiceError> {
        request.validate()?;
        let txn = self.db_pool.begin().await?;

        let template = inspection_template::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            category: Set(request.category),
            active: Set(true),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        for (position, label) in request.items.into_iter().enumerate() {
            inspection_template_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                template_id: Set(template.id),
                label: Set(label),
                position: Set(position as i32),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!(template_id = %template.id, "Inspection template created");
        Ok(template)
    }

    #[instrument(skip(self))]
    pub async fn list_templates(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<inspection_template::Model>, ServiceError> {
        let mut query = inspection_template::Entity::find();
        if !include_inactive {
            query = query.filter(inspection_template::Column::Active.eq(true));
        }
        Ok(query
            .order_by_asc(inspection_template::Column::Name)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn template_items(
        &self,
        template_id: Uuid,
    ) -> Result<Vec<inspection_template_item::Model>, ServiceError> {
        Ok(inspection_template_item::Entity::find()
            .filter(inspection_template_item::Column::TemplateId.eq(template_id))
            .order_by_asc(inspection_template_item::Column::Position)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_template(&self, template_id: Uuid) -> Result<TemplateWithItems, ServiceError> {
        let template = inspection_template::Entity::find_by_id(template_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Inspection template {} not found", template_id))
            })?;
        let items = self.template_items(template_id).await?;
        Ok(TemplateWithItems { template, items })
    }

    /// Retires a template. Existing inspections keep their copied items.
    #[instrument(skip(self))]
    pub async fn deactivate_template(&self, template_id: Uuid) -> Result<(), ServiceError> {
        let template = inspection_template::Entity::find_by_id(template_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Inspection template {} not found", template_id))
            })?;
        let mut active = template.into_active_model();
        active.active = Set(false);
        active.update(&*self.db_pool).await?;
        Ok(())
    }

    /// Stamps a template onto a work order: item labels and ordering are
    /// copied so later template edits never mutate a live checklist. All
    /// items start out pending.
    #[instrument(skip(self))]
    pub async fn start_inspection(
        &self,
        work_order_id: Uuid,
        template_id: Uuid,
        inspector_id: Option<Uuid>,
    ) -> Result<InspectionWithItems, ServiceError> {
        let txn = self.db_pool.begin().await?;

        work_order::Entity::find_by_id(work_order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", work_order_id))
            })?;

        let template = inspection_template::Entity::find_by_id(template_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Inspection template {} not found", template_id))
            })?;
        if !template.active {
            return Err(ServiceError::Conflict(format!(
                "Inspection template '{}' is no longer active",
                template.name
            )));
        }

        let template_items = inspection_template_item::Entity::find()
            .filter(inspection_template_item::Column::TemplateId.eq(template_id))
            .order_by_asc(inspection_template_item::Column::Position)
            .all(&txn)
            .await?;

        let created = inspection::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            template_id: Set(template_id),
            template_name: Set(template.name.clone()),
            inspector_id: Set(inspector_id),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(template_items.len());
        for ti in template_items {
            let item = inspection_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                inspection_id: Set(created.id),
                label: Set(ti.label),
                position: Set(ti.position),
                status: Set(ChecklistItemStatus::Pending),
                notes: Set(None),
                updated_at: Set(Utc::now()),
            }
            .insert(&txn)
            .await?;
            items.push(item);
        }

        txn.commit().await?;

        info!(
            work_order_id = %work_order_id,
            inspection_id = %created.id,
            items = items.len(),
            "Inspection started"
        );
        self.event_sender
            .send_or_log(Event::InspectionStarted {
                work_order_id,
                inspection_id: created.id,
            })
            .await;

        let summary = summarize(&items);
        Ok(InspectionWithItems {
            inspection: created,
            items,
            summary,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_inspection(&self, id: Uuid) -> Result<InspectionWithItems, ServiceError> {
        let inspection = inspection::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inspection {} not found", id)))?;
        let items = inspection_item::Entity::find()
            .filter(inspection_item::Column::InspectionId.eq(id))
            .order_by_asc(inspection_item::Column::Position)
            .all(&*self.db_pool)
            .await?;
        let summary = summarize(&items);
        Ok(InspectionWithItems {
            inspection,
            items,
            summary,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_for_work_order(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<inspection::Model>, ServiceError> {
        Ok(inspection::Entity::find()
            .filter(inspection::Column::WorkOrderId.eq(work_order_id))
            .order_by_desc(inspection::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    /// Updates one checklist item and returns the refreshed inspection with
    /// its recomputed summary.
    #[instrument(skip(self, request))]
    pub async fn update_item(
        &self,
        inspection_id: Uuid,
        item_id: Uuid,
        request: UpdateChecklistItemRequest,
    ) -> Result<InspectionWithItems, ServiceError> {
        let item = inspection_item::Entity::find_by_id(item_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Checklist item {} not found", item_id))
            })?;
        if item.inspection_id != inspection_id {
            return Err(ServiceError::NotFound(format!(
                "Checklist item {} does not belong to inspection {}",
                item_id, inspection_id
            )));
        }

        let mut active = item.into_active_model();
        active.status = Set(request.status);
        active.notes = Set(request.notes);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db_pool).await?;

        self.event_sender
            .send_or_log(Event::ChecklistItemUpdated {
                inspection_id,
                item_id,
                status: updated.status,
            })
            .await;

        self.get_inspection(inspection_id).await
    }
}

/// Tallies items into the traffic-light summary.
pub fn summarize(items: &[inspection_item::Model]) -> InspectionSummary {
    let mut summary = InspectionSummary {
        total: items.len() as u32,
        ..Default::default()
    };
    for item in items {
        if item.status.is_open() {
            summary.open += 1;
        }
        match item.status.signal() {
            Some(ChecklistSignal::Green) => summary.green += 1,
            Some(ChecklistSignal::Yellow) => summary.yellow += 1,
            Some(ChecklistSignal::Red) => summary.red += 1,
            None => {}
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: ChecklistItemStatus) -> inspection_item::Model {
        inspection_item::Model {
            id: Uuid::new_v4(),
            inspection_id: Uuid::new_v4(),
            label: "Brake pads".to_string(),
            position: 0,
            status,
            notes: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn summary_counts_signals_and_open_items() {
        let items = vec![
            item(ChecklistItemStatus::Pass),
            item(ChecklistItemStatus::Pass),
            item(ChecklistItemStatus::Warning),
            item(ChecklistItemStatus::Fail),
            item(ChecklistItemStatus::Pending),
            item(ChecklistItemStatus::Na),
        ];
        let summary = summarize(&items);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.green, 2);
        assert_eq!(summary.yellow, 1);
        assert_eq!(summary.red, 1);
        assert_eq!(summary.open, 1);
    }

    #[test]
    fn summary_of_empty_checklist_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.open, 0);
    }
}
