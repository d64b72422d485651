use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status of a single inspection checklist item as edited by inspectors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "checklist_item_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChecklistItemStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "pass")]
    Pass,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "fail")]
    Fail,
    #[sea_orm(string_value = "na")]
    Na,
}

/// Tri-state reporting signal derived from an item status. Pending and
/// not-applicable items carry no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistSignal {
    Green,
    Yellow,
    Red,
}

impl ChecklistItemStatus {
    pub fn signal(self) -> Option<ChecklistSignal> {
        match self {
            ChecklistItemStatus::Pass => Some(ChecklistSignal::Green),
            ChecklistItemStatus::Warning => Some(ChecklistSignal::Yellow),
            ChecklistItemStatus::Fail => Some(ChecklistSignal::Red),
            ChecklistItemStatus::Pending | ChecklistItemStatus::Na => None,
        }
    }

    /// Whether the item still needs inspector attention.
    pub fn is_open(self) -> bool {
        matches!(self, ChecklistItemStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn signal_mapping_is_total() {
        for status in ChecklistItemStatus::iter() {
            // Every status maps without panicking; pass/warning/fail carry a
            // signal, the rest do not.
            let signal = status.signal();
            match status {
                ChecklistItemStatus::Pass => assert_eq!(signal, Some(ChecklistSignal::Green)),
                ChecklistItemStatus::Warning => assert_eq!(signal, Some(ChecklistSignal::Yellow)),
                ChecklistItemStatus::Fail => assert_eq!(signal, Some(ChecklistSignal::Red)),
                _ => assert_eq!(signal, None),
            }
        }
    }

    #[test]
    fn wire_formats() {
        assert_eq!(serde_json::to_string(&ChecklistItemStatus::Na).unwrap(), "\"na\"");
        assert_eq!(
            serde_json::to_string(&ChecklistSignal::Yellow).unwrap(),
            "\"YELLOW\""
        );
    }
}
