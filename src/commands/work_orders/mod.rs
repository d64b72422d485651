pub mod assign_technician_command;
pub mod cancel_work_order_command;
pub mod create_work_order_command;
pub mod update_work_order_status_command;

pub use assign_technician_command::AssignTechnicianCommand;
pub use cancel_work_order_command::CancelWorkOrderCommand;
pub use create_work_order_command::CreateWorkOrderCommand;
pub use update_work_order_status_command::UpdateWorkOrderStatusCommand;
