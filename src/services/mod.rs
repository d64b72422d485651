pub mod catalog;
pub mod estimates;
pub mod inspections;
pub mod inventory;
pub mod reports;
pub mod work_orders;

pub use catalog::CatalogService;
pub use estimates::EstimateService;
pub use inspections::InspectionService;
pub use inventory::InventoryService;
pub use reports::ReportService;
pub use work_orders::WorkOrderService;
