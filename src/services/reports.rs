use crate::{
    db::DbPool,
    entities::{part, work_order, work_order_payment},
    errors::ServiceError,
    models::{Availability, WorkOrderStatus},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, Iterable, PaginatorTrait, QueryFilter};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Revenue over a period, from completed work orders.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RevenueReport {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub completed_orders: u64,
    pub gross_revenue: Decimal,
    pub tax_collected: Decimal,
    pub commission: Decimal,
    pub net_revenue: Decimal,
    pub payments_received: Decimal,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StatusCount {
    pub status: WorkOrderStatus,
    pub workflow_step: String,
    pub count: u64,
}

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DashboardSummary {
    pub open_work_orders: u64,
    pub completed_this_period: u64,
    pub status_counts: Vec<StatusCount>,
    pub parts_in_catalog: u64,
    pub low_stock_parts: u64,
    pub inventory_value: Decimal,
}

/// Read-only reporting over work orders, payments, and the parts catalog.
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
    commission_rate: Decimal,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>, commission_rate: Decimal) -> Self {
        Self {
            db_pool,
            commission_rate,
        }
    }

    /// Revenue from work orders completed in the window. The commission is
    /// the platform's cut of gross revenue excluding tax.
    #[instrument(skip(self))]
    pub async fn revenue(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<RevenueReport, ServiceError> {
        let mut query = work_order::Entity::find()
            .filter(work_order::Column::Status.eq(WorkOrderStatus::Completed));
        if let Some(from) = from {
            query = query.filter(work_order::Column::UpdatedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(work_order::Column::UpdatedAt.lt(to));
        }
        let orders = query.all(&*self.db_pool).await?;

        let gross_revenue: Decimal = orders
            .iter()
            .filter_map(|o| o.total_amount)
            .sum();
        let tax_collected: Decimal = orders.iter().filter_map(|o| o.tax_amount).sum();
        let commission = ((gross_revenue - tax_collected) * self.commission_rate).round_dp(2);

        let mut payments_query = work_order_payment::Entity::find();
        if let Some(from) = from {
            payments_query =
                payments_query.filter(work_order_payment::Column::ReceivedAt.gte(from));
        }
        if let Some(to) = to {
            payments_query = payments_query.filter(work_order_payment::Column::ReceivedAt.lt(to));
        }
        let payments_received: Decimal = payments_query
            .all(&*self.db_pool)
            .await?
            .iter()
            .map(|p| p.amount)
            .sum();

        Ok(RevenueReport {
            from,
            to,
            completed_orders: orders.len() as u64,
            gross_revenue,
            tax_collected,
            commission,
            net_revenue: gross_revenue - tax_collected - commission,
            payments_received,
        })
    }

    #[instrument(skip(self))]
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ServiceError> {
        let mut status_counts = Vec::new();
        let mut open_work_orders = 0;
        let mut completed = 0;
        for status in WorkOrderStatus::iter() {
            let count = work_order::Entity::find()
                .filter(work_order::Column::Status.eq(status))
                .count(&*self.db_pool)
                .await?;
            if !status.is_terminal() {
                open_work_orders += count;
            }
            if status == WorkOrderStatus::Completed {
                completed = count;
            }
            status_counts.push(StatusCount {
                status,
                workflow_step: status.workflow_step().to_string(),
                count,
            });
        }

        let parts = part::Entity::find().all(&*self.db_pool).await?;
        let low_stock_parts = parts
            .iter()
            .filter(|p| {
                matches!(
                    Availability::derive(p.quantity, p.min_quantity),
                    Availability::LowStock | Availability::OutOfStock
                )
            })
            .count() as u64;
        let inventory_value: Decimal = parts
            .iter()
            .map(|p| p.price * Decimal::from(p.quantity.max(0)))
            .sum();

        Ok(DashboardSummary {
            open_work_orders,
            completed_this_period: completed,
            status_counts,
            parts_in_catalog: parts.len() as u64,
            low_stock_parts,
            inventory_value,
        })
    }
}
