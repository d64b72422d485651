use crate::{
    db::DbPool,
    entities::{
        estimate, work_order, work_order_labor, work_order_part, work_order_service,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    models::WorkOrderStatus,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Builds and approves priced estimates for work orders. Totals are computed
/// from the order's line items inside a transaction so the estimate and the
/// order's financial snapshot never drift apart.
#[derive(Clone)]
pub struct EstimateService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    tax_rate: Decimal,
}

impl EstimateService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>, tax_rate: Decimal) -> Self {
        Self {
            db_pool,
            event_sender,
            tax_rate,
        }
    }

    /// Prices the work order's current line items into a new estimate
    /// version and moves the order to ESTIMATE. Allowed while the order is
    /// in RECEIVED or ESTIMATE; re-generating supersedes the prior draft.
    #[instrument(skip(self))]
    pub async fn generate_estimate(
        &self,
        work_order_id: Uuid,
    ) -> Result<estimate::Model, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = work_order::Entity::find_by_id(work_order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", work_order_id))
            })?;

        if order.status != WorkOrderStatus::Received
            && order.status != WorkOrderStatus::Estimate
        {
            return Err(ServiceError::Conflict(format!(
                "Cannot generate an estimate while work order is {}",
                order.status
            )));
        }

        let labor = work_order_labor::Entity::find()
            .filter(work_order_labor::Column::WorkOrderId.eq(work_order_id))
            .all(&txn)
            .await?;
        let parts = work_order_part::Entity::find()
            .filter(work_order_part::Column::WorkOrderId.eq(work_order_id))
            .all(&txn)
            .await?;
        let services = work_order_service::Entity::find()
            .filter(work_order_service::Column::WorkOrderId.eq(work_order_id))
            .all(&txn)
            .await?;

        let subtotal_labor: Decimal = labor.iter().map(|l| l.line_total()).sum();
        let subtotal_parts: Decimal = parts.iter().map(|p| p.line_total()).sum();
        let subtotal_services: Decimal = services.iter().map(|s| s.price).sum();
        let subtotal = subtotal_labor + subtotal_parts + subtotal_services;
        let tax_amount = (subtotal * self.tax_rate).round_dp(2);
        let total = subtotal + tax_amount;

        let version = estimate::Entity::find()
            .filter(estimate::Column::WorkOrderId.eq(work_order_id))
            .count(&txn)
            .await? as i32
            + 1;

        let now = Utc::now();
        let saved = estimate::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            estimate_number: Set(format!("EST-{}-V{}", order.work_order_number, version)),
            version: Set(version),
            status: Set(estimate::EstimateStatus::Draft),
            subtotal_labor: Set(subtotal_labor),
            subtotal_parts: Set(subtotal_parts),
            subtotal_services: Set(subtotal_services),
            tax_amount: Set(tax_amount),
            total: Set(total),
            approved_at: Set(None),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let old_status = order.status;
        let mut active = order.into_active_model();
        active.status = Set(WorkOrderStatus::Estimate);
        active.estimated_total = Set(Some(total));
        active.subtotal_labor = Set(Some(subtotal_labor));
        active.subtotal_parts = Set(Some(subtotal_parts));
        active.tax_amount = Set(Some(tax_amount));
        active.total_amount = Set(Some(total));
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;

        info!(
            work_order_id = %work_order_id,
            estimate_id = %saved.id,
            version,
            total = %total,
            "Estimate generated"
        );
        if old_status != WorkOrderStatus::Estimate {
            self.event_sender
                .send_or_log(Event::WorkOrderStatusChanged {
                    work_order_id,
                    old_status,
                    new_status: WorkOrderStatus::Estimate,
                })
                .await;
        }
        self.event_sender
            .send_or_log(Event::EstimateGenerated {
                work_order_id,
                estimate_id: saved.id,
            })
            .await;

        Ok(saved)
    }

    /// Marks the estimate as sent to the customer and moves the work order
    /// to APPROVAL.
    #[instrument(skip(self))]
    pub async fn submit_for_approval(
        &self,
        estimate_id: Uuid,
    ) -> Result<estimate::Model, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let est = estimate::Entity::find_by_id(estimate_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Estimate {} not found", estimate_id))
            })?;
        if est.status != estimate::EstimateStatus::Draft {
            return Err(ServiceError::Conflict(format!(
                "Only draft estimates can be submitted, estimate is {:?}",
                est.status
            )));
        }

        let order = work_order::Entity::find_by_id(est.work_order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", est.work_order_id))
            })?;
        if order.status != WorkOrderStatus::Estimate {
            return Err(ServiceError::InvalidTransition {
                from: order.status.to_string(),
                to: WorkOrderStatus::Approval.to_string(),
            });
        }

        let mut est_active = est.into_active_model();
        est_active.status = Set(estimate::EstimateStatus::PendingApproval);
        let updated = est_active.update(&txn).await?;

        let work_order_id = order.id;
        let mut order_active = order.into_active_model();
        order_active.status = Set(WorkOrderStatus::Approval);
        order_active.updated_at = Set(Utc::now());
        order_active.update(&txn).await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::WorkOrderStatusChanged {
                work_order_id,
                old_status: WorkOrderStatus::Estimate,
                new_status: WorkOrderStatus::Approval,
            })
            .await;

        Ok(updated)
    }

    /// Customer approval: marks the estimate APPROVED and moves the work
    /// order into service. Requires the order to be awaiting approval.
    #[instrument(skip(self))]
    pub async fn approve_estimate(
        &self,
        estimate_id: Uuid,
    ) -> Result<estimate::Model, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let est = estimate::Entity::find_by_id(estimate_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Estimate {} not found", estimate_id))
            })?;
        if est.status != estimate::EstimateStatus::PendingApproval {
            return Err(ServiceError::Conflict(format!(
                "Only pending estimates can be approved, estimate is {:?}",
                est.status
            )));
        }

        let order = work_order::Entity::find_by_id(est.work_order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", est.work_order_id))
            })?;
        if order.status != WorkOrderStatus::Approval {
            return Err(ServiceError::InvalidTransition {
                from: order.status.to_string(),
                to: WorkOrderStatus::InProgress.to_string(),
            });
        }

        let now = Utc::now();
        let mut est_active = est.into_active_model();
        est_active.status = Set(estimate::EstimateStatus::Approved);
        est_active.approved_at = Set(Some(now));
        let updated = est_active.update(&txn).await?;

        let work_order_id = order.id;
        let mut order_active = order.into_active_model();
        order_active.status = Set(WorkOrderStatus::InProgress);
        order_active.updated_at = Set(now);
        order_active.update(&txn).await?;

        txn.commit().await?;

        info!(
            work_order_id = %work_order_id,
            estimate_id = %estimate_id,
            "Estimate approved, work order moved into service"
        );
        self.event_sender
            .send_or_log(Event::EstimateApproved {
                work_order_id,
                estimate_id,
            })
            .await;
        self.event_sender
            .send_or_log(Event::WorkOrderStatusChanged {
                work_order_id,
                old_status: WorkOrderStatus::Approval,
                new_status: WorkOrderStatus::InProgress,
            })
            .await;

        Ok(updated)
    }

    /// Customer rejection: the estimate is marked REJECTED and the order
    /// returns to ESTIMATE for re-pricing.
    #[instrument(skip(self))]
    pub async fn reject_estimate(
        &self,
        estimate_id: Uuid,
    ) -> Result<estimate::Model, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let est = estimate::Entity::find_by_id(estimate_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Estimate {} not found", estimate_id))
            })?;
        if est.status != estimate::EstimateStatus::PendingApproval {
            return Err(ServiceError::Conflict(format!(
                "Only pending estimates can be rejected, estimate is {:?}",
                est.status
            )));
        }

        let order = work_order::Entity::find_by_id(est.work_order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", est.work_order_id))
            })?;

        let mut est_active = est.into_active_model();
        est_active.status = Set(estimate::EstimateStatus::Rejected);
        let updated = est_active.update(&txn).await?;

        if order.status == WorkOrderStatus::Approval {
            let mut order_active = order.into_active_model();
            order_active.status = Set(WorkOrderStatus::Estimate);
            order_active.updated_at = Set(Utc::now());
            order_active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get_estimate(&self, id: Uuid) -> Result<estimate::Model, ServiceError> {
        estimate::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Estimate {} not found", id)))
    }

    /// All estimate versions for a work order, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_work_order(
        &self,
        work_order_id: Uuid,
    ) -> Result<Vec<estimate::Model>, ServiceError> {
        Ok(estimate::Entity::find()
            .filter(estimate::Column::WorkOrderId.eq(work_order_id))
            .order_by_desc(estimate::Column::Version)
            .all(&*self.db_pool)
            .await?)
    }
}
