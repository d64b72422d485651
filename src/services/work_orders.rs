use crate::{
    commands::work_orders::{
        AssignTechnicianCommand, CancelWorkOrderCommand, CreateWorkOrderCommand,
        UpdateWorkOrderStatusCommand,
    },
    commands::Command,
    db::DbPool,
    entities::{
        estimate, inspection, inspection_item, work_order, work_order_attachment,
        work_order_labor, work_order_part, work_order_payment, work_order_qc,
        work_order_service,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::{paging, JobType, WorkOrderPriority, WorkOrderStatus},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Filters accepted by the work order list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkOrderFilter {
    pub status: Option<WorkOrderStatus>,
    pub job_type: Option<JobType>,
    pub priority: Option<WorkOrderPriority>,
    pub technician_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub search: Option<String>,
}

/// One kanban column: the status, its display label, the cards in it
/// (newest first) and how many there are.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct BoardColumn {
    pub status: WorkOrderStatus,
    pub label: String,
    pub count: u64,
    #[schema(value_type = Vec<Object>)]
    pub work_orders: Vec<work_order::Model>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateWorkOrderRequest {
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub priority: Option<WorkOrderPriority>,
    pub service_advisor_id: Option<Uuid>,
    #[validate(range(min = 0))]
    pub odometer_km: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddLaborRequest {
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    pub technician_id: Option<Uuid>,
}

/// Adds a part line. With a `part_id` the part number, name and unit price
/// are snapshotted from the catalog; otherwise all three must be supplied
/// for an off-catalog part.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddPartLineRequest {
    pub part_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub part_number: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddServiceLineRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddPaymentRequest {
    pub amount: Decimal,
    pub method: work_order_payment::PaymentMethod,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddAttachmentRequest {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 100))]
    pub content_type: String,
    #[validate(length(min = 1, max = 2000))]
    pub url: String,
    pub uploaded_by: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddQcCheckRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub passed: bool,
    pub checked_by: Option<Uuid>,
    pub notes: Option<String>,
}

/// Service for the work order lifecycle and its sub-resources.
#[derive(Clone)]
pub struct WorkOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl WorkOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_work_order(
        &self,
        command: CreateWorkOrderCommand,
    ) -> Result<work_order::Model, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_work_order(&self, id: Uuid) -> Result<work_order::Model, ServiceError> {
        work_order::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))
    }

    /// Lists work orders with optional filters, newest first.
    #[instrument(skip(self))]
    pub async fn list_work_orders(
        &self,
        filter: WorkOrderFilter,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<(Vec<work_order::Model>, u64, u64), ServiceError> {
        let (page, limit) = paging::normalize(page, limit);

        let mut query = work_order::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(work_order::Column::Status.eq(status));
        }
        if let Some(job_type) = filter.job_type {
            query = query.filter(work_order::Column::JobType.eq(job_type));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(work_order::Column::Priority.eq(priority));
        }
        if let Some(technician_id) = filter.technician_id {
            query = query.filter(work_order::Column::TechnicianId.eq(technician_id));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(work_order::Column::CustomerId.eq(customer_id));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                query = query.filter(work_order::Column::WorkOrderNumber.contains(search));
            }
        }

        let paginator = query
            .order_by_desc(work_order::Column::CreatedAt)
            .paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page - 1).await?;

        Ok((rows, total, total.div_ceil(limit)))
    }

    /// Groups open work orders into kanban columns, one per non-terminal
    /// status plus Completed. Cancelled orders stay off the board.
    #[instrument(skip(self))]
    pub async fn board(&self) -> Result<Vec<BoardColumn>, ServiceError> {
        let rows = work_order::Entity::find()
            .filter(work_order::Column::Status.ne(WorkOrderStatus::Cancelled))
            .order_by_desc(work_order::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;

        let mut grouped: HashMap<WorkOrderStatus, Vec<work_order::Model>> = HashMap::new();
        for row in rows {
            grouped.entry(row.status).or_default().push(row);
        }

        let columns = [
            WorkOrderStatus::Received,
            WorkOrderStatus::Estimate,
            WorkOrderStatus::Approval,
            WorkOrderStatus::InProgress,
            WorkOrderStatus::WaitingForParts,
            WorkOrderStatus::Completed,
        ]
        .into_iter()
        .map(|status| {
            let work_orders = grouped.remove(&status).unwrap_or_default();
            BoardColumn {
                status,
                label: status.workflow_step().to_string(),
                count: work_orders.len() as u64,
                work_orders,
            }
        })
        .collect();

        Ok(columns)
    }

    #[instrument(skip(self))]
    pub async fn update_work_order(
        &self,
        id: Uuid,
        request: UpdateWorkOrderRequest,
    ) -> Result<work_order::Model, ServiceError> {
        request.validate()?;
        let target = self.get_work_order(id).await?;

        let mut active = target.into_active_model();
        if let Some(description) = request.description {
            active.description = Set(Some(description));
        }
        if let Some(priority) = request.priority {
            active.priority = Set(priority);
        }
        if let Some(advisor) = request.service_advisor_id {
            active.service_advisor_id = Set(Some(advisor));
        }
        if let Some(odometer) = request.odometer_km {
            active.odometer_km = Set(Some(odometer));
        }
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db_pool).await?;

        self.event_sender
            .send_or_log(Event::WorkOrderUpdated(updated.id))
            .await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: Uuid,
        new_status: WorkOrderStatus,
    ) -> Result<work_order::Model, ServiceError> {
        UpdateWorkOrderStatusCommand {
            work_order_id: id,
            new_status,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    #[instrument(skip(self))]
    pub async fn assign_technician(
        &self,
        id: Uuid,
        technician_id: Option<Uuid>,
        service_advisor_id: Option<Uuid>,
    ) -> Result<work_order::Model, ServiceError> {
        AssignTechnicianCommand {
            work_order_id: id,
            technician_id,
            service_advisor_id,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    #[instrument(skip(self))]
    pub async fn cancel_work_order(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<work_order::Model, ServiceError> {
        CancelWorkOrderCommand {
            work_order_id: id,
            reason,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    /// Deletes a work order and every row hanging off it, in one
    /// transaction: lines, payments, attachments, QC checks, estimates,
    /// inspections and their checklist items.
    #[instrument(skip(self))]
    pub async fn delete_work_order(&self, id: Uuid) -> Result<(), ServiceError> {
        let target = self.get_work_order(id).await?;
        let txn = self.db_pool.begin().await?;

        work_order_labor::Entity::delete_many()
            .filter(work_order_labor::Column::WorkOrderId.eq(id))
            .exec(&txn)
            .await?;
        work_order_part::Entity::delete_many()
            .filter(work_order_part::Column::WorkOrderId.eq(id))
            .exec(&txn)
            .await?;
        work_order_service::Entity::delete_many()
            .filter(work_order_service::Column::WorkOrderId.eq(id))
            .exec(&txn)
            .await?;
        work_order_payment::Entity::delete_many()
            .filter(work_order_payment::Column::WorkOrderId.eq(id))
            .exec(&txn)
            .await?;
        work_order_attachment::Entity::delete_many()
            .filter(work_order_attachment::Column::WorkOrderId.eq(id))
            .exec(&txn)
            .await?;
        work_order_qc::Entity::delete_many()
            .filter(work_order_qc::Column::WorkOrderId.eq(id))
            .exec(&txn)
            .await?;
        estimate::Entity::delete_many()
            .filter(estimate::Column::WorkOrderId.eq(id))
            .exec(&txn)
            .await?;

        let inspection_ids: Vec<Uuid> = inspection::Entity::find()
            .filter(inspection::Column::WorkOrderId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect();
        if !inspection_ids.is_empty() {
            inspection_item::Entity::delete_many()
                .filter(inspection_item::Column::InspectionId.is_in(inspection_ids))
                .exec(&txn)
                .await?;
            inspection::Entity::delete_many()
                .filter(inspection::Column::WorkOrderId.eq(id))
                .exec(&txn)
                .await?;
        }

        target.delete(&txn).await?;
        txn.commit().await?;

        info!(work_order_id = %id, "Work order deleted");
        self.event_sender
            .send_or_log(Event::WorkOrderDeleted(id))
            .await;
        Ok(())
    }

    #[instrument(skip(self, request))]
    pub async fn add_labor(
        &self,
        work_order_id: Uuid,
        request: AddLaborRequest,
    ) -> Result<work_order_labor::Model, ServiceError> {
        request.validate()?;
        self.ensure_editable(work_order_id).await?;
        if request.hours <= Decimal::ZERO || request.hourly_rate < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Labor hours must be positive and rate non-negative".into(),
            ));
        }

        let model = work_order_labor::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            description: Set(request.description),
            hours: Set(request.hours),
            hourly_rate: Set(request.hourly_rate),
            technician_id: Set(request.technician_id),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_labor(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<work_order_labor::Model>, ServiceError> {
        Ok(work_order_labor::Entity::find()
            .filter(work_order_labor::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_labor::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, request))]
    pub async fn add_part_line(
        &self,
        work_order_id: Uuid,
        request: AddPartLineRequest,
    ) -> Result<work_order_part::Model, ServiceError> {
        request.validate()?;
        self.ensure_editable(work_order_id).await?;

        let (part_number, name, unit_price) = match request.part_id {
            Some(part_id) => {
                let part = crate::entities::part::Entity::find_by_id(part_id)
                    .one(&*self.db_pool)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Part {} not found", part_id))
                    })?;
                (
                    part.part_number,
                    request.name.unwrap_or(part.name),
                    request.unit_price.unwrap_or(part.price),
                )
            }
            None => {
                let part_number = request.part_number.ok_or_else(|| {
                    ServiceError::InvalidInput(
                        "Off-catalog part lines require a part_number".into(),
                    )
                })?;
                let name = request.name.ok_or_else(|| {
                    ServiceError::InvalidInput("Off-catalog part lines require a name".into())
                })?;
                let unit_price = request.unit_price.ok_or_else(|| {
                    ServiceError::InvalidInput(
                        "Off-catalog part lines require a unit_price".into(),
                    )
                })?;
                (part_number, name, unit_price)
            }
        };
        if unit_price < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Unit price must be non-negative".into(),
            ));
        }

        let model = work_order_part::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            part_id: Set(request.part_id),
            part_number: Set(part_number),
            name: Set(name),
            quantity: Set(request.quantity),
            unit_price: Set(unit_price),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_part_lines(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<work_order_part::Model>, ServiceError> {
        Ok(work_order_part::Entity::find()
            .filter(work_order_part::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_part::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, request))]
    pub async fn add_service_line(
        &self,
        work_order_id: Uuid,
        request: AddServiceLineRequest,
    ) -> Result<work_order_service::Model, ServiceError> {
        request.validate()?;
        self.ensure_editable(work_order_id).await?;
        if request.price < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Service price must be non-negative".into(),
            ));
        }

        let model = work_order_service::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            name: Set(request.name),
            price: Set(request.price),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_service_lines(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<work_order_service::Model>, ServiceError> {
        Ok(work_order_service::Entity::find()
            .filter(work_order_service::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_service::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, request))]
    pub async fn add_payment(
        &self,
        work_order_id: Uuid,
        request: AddPaymentRequest,
    ) -> Result<work_order_payment::Model, ServiceError> {
        request.validate()?;
        self.get_work_order(work_order_id).await?;
        if request.amount <= Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Payment amount must be positive".into(),
            ));
        }

        let model = work_order_payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            amount: Set(request.amount),
            method: Set(request.method),
            reference: Set(request.reference),
            received_at: Set(Utc::now()),
        };
        Ok(model.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_payments(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<work_order_payment::Model>, ServiceError> {
        Ok(work_order_payment::Entity::find()
            .filter(work_order_payment::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_payment::Column::ReceivedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, request))]
    pub async fn add_attachment(
        &self,
        work_order_id: Uuid,
        request: AddAttachmentRequest,
    ) -> Result<work_order_attachment::Model, ServiceError> {
        request.validate()?;
        self.get_work_order(work_order_id).await?;

        let model = work_order_attachment::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            file_name: Set(request.file_name),
            content_type: Set(request.content_type),
            url: Set(request.url),
            uploaded_by: Set(request.uploaded_by),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_attachments(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<work_order_attachment::Model>, ServiceError> {
        Ok(work_order_attachment::Entity::find()
            .filter(work_order_attachment::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_attachment::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, request))]
    pub async fn add_qc_check(
        &self,
        work_order_id: Uuid,
        request: AddQcCheckRequest,
    ) -> Result<work_order_qc::Model, ServiceError> {
        request.validate()?;
        let target = self.get_work_order(work_order_id).await?;
        if target.status != WorkOrderStatus::InProgress
            && target.status != WorkOrderStatus::Completed
        {
            return Err(ServiceError::Conflict(format!(
                "QC checks can only be recorded while in service, work order is {}",
                target.status
            )));
        }

        let model = work_order_qc::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            name: Set(request.name),
            passed: Set(request.passed),
            checked_by: Set(request.checked_by),
            notes: Set(request.notes),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_qc_checks(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<work_order_qc::Model>, ServiceError> {
        Ok(work_order_qc::Entity::find()
            .filter(work_order_qc::Column::WorkOrderId.eq(work_order_id))
            .order_by_asc(work_order_qc::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn remove_labor(&self, work_order_id: Uuid, line_id: Uuid) -> Result<(), ServiceError> {
        self.ensure_editable(work_order_id).await?;
        let line = work_order_labor::Entity::find_by_id(line_id)
            .filter(work_order_labor::Column::WorkOrderId.eq(work_order_id))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Labor line {} not found", line_id)))?;
        line.delete(&*self.db_pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_part_line(
        &self,
        work_order_id: Uuid,
        line_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.ensure_editable(work_order_id).await?;
        let line = work_order_part::Entity::find_by_id(line_id)
            .filter(work_order_part::Column::WorkOrderId.eq(work_order_id))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Part line {} not found", line_id)))?;
        line.delete(&*self.db_pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_service_line(
        &self,
        work_order_id: Uuid,
        line_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.ensure_editable(work_order_id).await?;
        let line = work_order_service::Entity::find_by_id(line_id)
            .filter(work_order_service::Column::WorkOrderId.eq(work_order_id))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Service line {} not found", line_id))
            })?;
        line.delete(&*self.db_pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_payment(
        &self,
        work_order_id: Uuid,
        line_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.get_work_order(work_order_id).await?;
        let line = work_order_payment::Entity::find_by_id(line_id)
            .filter(work_order_payment::Column::WorkOrderId.eq(work_order_id))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Payment {} not found", line_id)))?;
        line.delete(&*self.db_pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_qc_check(
        &self,
        work_order_id: Uuid,
        line_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.get_work_order(work_order_id).await?;
        let line = work_order_qc::Entity::find_by_id(line_id)
            .filter(work_order_qc::Column::WorkOrderId.eq(work_order_id))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("QC check {} not found", line_id)))?;
        line.delete(&*self.db_pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_attachment(
        &self,
        work_order_id: Uuid,
        line_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.get_work_order(work_order_id).await?;
        let line = work_order_attachment::Entity::find_by_id(line_id)
            .filter(work_order_attachment::Column::WorkOrderId.eq(work_order_id))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Attachment {} not found", line_id)))?;
        line.delete(&*self.db_pool).await?;
        Ok(())
    }

    /// Line items can only change while pricing is still open.
    async fn ensure_editable(&self, work_order_id: Uuid) -> Result<work_order::Model, ServiceError> {
        let target = self.get_work_order(work_order_id).await?;
        if target.status.is_terminal() {
            return Err(ServiceError::Conflict(format!(
                "Work order {} is {} and can no longer be edited",
                target.work_order_number, target.status
            )));
        }
        Ok(target)
    }
}
