//! Domain model layer: closed enums and the pure rules the services enforce.

pub mod availability;
pub mod checklist;
pub mod paging;
pub mod part;
pub mod work_order;

pub use availability::Availability;
pub use checklist::{ChecklistItemStatus, ChecklistSignal};
pub use part::{PartCategory, PartDetails};
pub use work_order::{JobType, WorkOrderPriority, WorkOrderSource, WorkOrderStatus};
