use crate::{
    db::DbPool,
    entities::part,
    errors::ServiceError,
    events::{Event, EventSender},
    models::Availability,
};
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// One row in the stock overview.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StockLevel {
    pub part_id: Uuid,
    pub part_number: String,
    pub name: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub availability: Availability,
}

impl StockLevel {
    fn from_model(model: &part::Model) -> Self {
        Self {
            part_id: model.id,
            part_number: model.part_number.clone(),
            name: model.name.clone(),
            quantity: model.quantity,
            min_quantity: model.min_quantity,
            availability: Availability::derive(model.quantity, model.min_quantity),
        }
    }
}

/// How a stock mutation is expressed: an absolute count (stocktake) or a
/// signed delta (receipt or consumption).
#[derive(Debug, Clone, Copy, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockAdjustment {
    Absolute(i32),
    Delta(i32),
}

/// Stock movements over the parts table, with low-stock detection.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn stock_levels(&self) -> Result<Vec<StockLevel>, ServiceError> {
        let rows = part::Entity::find()
            .order_by_asc(part::Column::Name)
            .all(&*self.db_pool)
            .await?;
        Ok(rows.iter().map(StockLevel::from_model).collect())
    }

    /// Parts at or below their minimum quantity, worst first.
    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<StockLevel>, ServiceError> {
        let rows = part::Entity::find()
            .filter(
                Condition::any()
                    .add(part::Column::Quantity.lte(0))
                    .add(Expr::col(part::Column::Quantity).lte(Expr::col(part::Column::MinQuantity))),
            )
            .all(&*self.db_pool)
            .await?;
        let mut levels: Vec<StockLevel> = rows.iter().map(StockLevel::from_model).collect();
        levels.sort_by_key(|l| l.quantity - l.min_quantity);
        Ok(levels)
    }

    #[instrument(skip(self))]
    pub async fn out_of_stock(&self) -> Result<Vec<StockLevel>, ServiceError> {
        let rows = part::Entity::find()
            .filter(part::Column::Quantity.lte(0))
            .order_by_asc(part::Column::Name)
            .all(&*self.db_pool)
            .await?;
        Ok(rows.iter().map(StockLevel::from_model).collect())
    }

    /// Applies a stock adjustment. Rejects mutations that would take the
    /// count negative; emits a low-stock event when the new level falls to
    /// or below the minimum.
    #[instrument(skip(self))]
    pub async fn adjust_stock(
        &self,
        part_id: Uuid,
        adjustment: StockAdjustment,
    ) -> Result<StockLevel, ServiceError> {
        let model = part::Entity::find_by_id(part_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Part {} not found", part_id)))?;

        let old_quantity = model.quantity;
        let new_quantity = match adjustment {
            StockAdjustment::Absolute(count) => count,
            StockAdjustment::Delta(delta) => {
                old_quantity.checked_add(delta).ok_or_else(|| {
                    ServiceError::InvalidInput(format!(
                        "Delta {} overflows the stock count for part {}",
                        delta, model.part_number
                    ))
                })?
            }
        };
        if new_quantity < 0 {
            return Err(ServiceError::InsufficientStock(format!(
                "Part {} has {} on hand, cannot remove {}",
                model.part_number,
                old_quantity,
                old_quantity - new_quantity
            )));
        }

        let min_quantity = model.min_quantity;
        let mut active = model.into_active_model();
        active.quantity = Set(new_quantity);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db_pool).await?;

        info!(
            part_id = %part_id,
            old_quantity,
            new_quantity,
            "Stock adjusted"
        );
        self.event_sender
            .send_or_log(Event::StockAdjusted {
                part_id,
                old_quantity,
                new_quantity,
            })
            .await;
        if new_quantity <= min_quantity && old_quantity > min_quantity {
            self.event_sender
                .send_or_log(Event::LowStockDetected {
                    part_id,
                    quantity: new_quantity,
                    min_quantity,
                })
                .await;
        }

        Ok(StockLevel::from_model(&updated))
    }
}
