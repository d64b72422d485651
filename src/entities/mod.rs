//! Database table models (sea-orm).

pub mod customer;
pub mod estimate;
pub mod inspection;
pub mod inspection_item;
pub mod inspection_template;
pub mod inspection_template_item;
pub mod part;
pub mod vehicle;
pub mod work_order;
pub mod work_order_attachment;
pub mod work_order_labor;
pub mod work_order_part;
pub mod work_order_payment;
pub mod work_order_qc;
pub mod work_order_service;
