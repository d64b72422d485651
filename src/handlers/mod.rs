pub mod customers;
pub mod estimates;
pub mod inspections;
pub mod inventory;
pub mod parts;
pub mod reports;
pub mod work_orders;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub work_orders: Arc<crate::services::WorkOrderService>,
    pub estimates: Arc<crate::services::EstimateService>,
    pub inspections: Arc<crate::services::InspectionService>,
    pub catalog: Arc<crate::services::CatalogService>,
    pub inventory: Arc<crate::services::InventoryService>,
    pub reports: Arc<crate::services::ReportService>,
}

impl AppServices {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        config: &crate::config::AppConfig,
    ) -> Self {
        Self {
            work_orders: Arc::new(crate::services::WorkOrderService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            estimates: Arc::new(crate::services::EstimateService::new(
                db_pool.clone(),
                event_sender.clone(),
                config.tax_rate,
            )),
            inspections: Arc::new(crate::services::InspectionService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            catalog: Arc::new(crate::services::CatalogService::new(db_pool.clone())),
            inventory: Arc::new(crate::services::InventoryService::new(
                db_pool.clone(),
                event_sender,
            )),
            reports: Arc::new(crate::services::ReportService::new(
                db_pool,
                config.commission_rate,
            )),
        }
    }
}
