use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Derived stock availability label. Never persisted; recomputed from the
/// current quantity and alert threshold on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    InStock,
    LowStock,
    OutOfStock,
}

impl Availability {
    /// Zero quantity always reads OUT_OF_STOCK, even when the alert
    /// threshold itself is zero.
    pub fn derive(quantity: i32, min_quantity: i32) -> Self {
        if quantity <= 0 {
            Availability::OutOfStock
        } else if quantity <= min_quantity {
            Availability::LowStock
        } else {
            Availability::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::LowStock => "Low Stock",
            Availability::OutOfStock => "Out of Stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0 => Availability::OutOfStock; "zero quantity zero threshold")]
    #[test_case(0, 10 => Availability::OutOfStock; "zero quantity")]
    #[test_case(1, 1 => Availability::LowStock; "at threshold")]
    #[test_case(5, 10 => Availability::LowStock; "below threshold")]
    #[test_case(10, 10 => Availability::LowStock; "equal threshold")]
    #[test_case(11, 10 => Availability::InStock; "above threshold")]
    #[test_case(3, 0 => Availability::InStock; "no threshold configured")]
    fn derivation_grid(quantity: i32, min_quantity: i32) -> Availability {
        Availability::derive(quantity, min_quantity)
    }

    #[test]
    fn labels_match_dashboard_wording() {
        assert_eq!(Availability::derive(0, 5).label(), "Out of Stock");
        assert_eq!(Availability::derive(2, 5).label(), "Low Stock");
        assert_eq!(Availability::derive(9, 5).label(), "In Stock");
    }
}
