//! Permission strings in `resource:action` form. Roles map onto sets of
//! these at token issuance; admins bypass the check entirely.

pub const WORK_ORDERS_READ: &str = "work_orders:read";
pub const WORK_ORDERS_WRITE: &str = "work_orders:write";
pub const WORK_ORDERS_DELETE: &str = "work_orders:delete";

pub const ESTIMATES_READ: &str = "estimates:read";
pub const ESTIMATES_WRITE: &str = "estimates:write";

pub const INSPECTIONS_READ: &str = "inspections:read";
pub const INSPECTIONS_WRITE: &str = "inspections:write";

pub const PARTS_READ: &str = "parts:read";
pub const PARTS_WRITE: &str = "parts:write";

pub const INVENTORY_READ: &str = "inventory:read";
pub const INVENTORY_WRITE: &str = "inventory:write";

pub const CUSTOMERS_READ: &str = "customers:read";
pub const CUSTOMERS_WRITE: &str = "customers:write";

pub const REPORTS_READ: &str = "reports:read";

/// Everything a service-center user gets.
pub fn service_center_permissions() -> Vec<String> {
    vec![
        WORK_ORDERS_READ,
        WORK_ORDERS_WRITE,
        WORK_ORDERS_DELETE,
        ESTIMATES_READ,
        ESTIMATES_WRITE,
        INSPECTIONS_READ,
        INSPECTIONS_WRITE,
        PARTS_READ,
        INVENTORY_READ,
        CUSTOMERS_READ,
        CUSTOMERS_WRITE,
        REPORTS_READ,
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Everything a vendor user gets.
pub fn vendor_permissions() -> Vec<String> {
    vec![
        PARTS_READ,
        PARTS_WRITE,
        INVENTORY_READ,
        INVENTORY_WRITE,
        REPORTS_READ,
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
