use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Work order lifecycle status. Single source of truth; the workflow step
/// shown in clients is derived via [`WorkOrderStatus::workflow_step`], never
/// stored alongside.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "work_order_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    #[sea_orm(string_value = "RECEIVED")]
    Received,
    #[sea_orm(string_value = "ESTIMATE")]
    Estimate,
    #[sea_orm(string_value = "APPROVAL")]
    Approval,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "WAITING_FOR_PARTS")]
    WaitingForParts,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl WorkOrderStatus {
    /// Allowed outgoing edges of the lifecycle state machine.
    ///
    /// RECEIVED -> IN_PROGRESS exists so walk-in quick jobs can skip the
    /// estimate/approval path. COMPLETED and CANCELLED are terminal.
    pub fn allowed_transitions(self) -> &'static [WorkOrderStatus] {
        use WorkOrderStatus::*;
        match self {
            Received => &[Estimate, InProgress, Cancelled],
            Estimate => &[Approval, Cancelled],
            Approval => &[InProgress, Estimate, Cancelled],
            InProgress => &[WaitingForParts, Completed, Cancelled],
            WaitingForParts => &[InProgress, Cancelled],
            Completed => &[],
            Cancelled => &[],
        }
    }

    /// Whether a move to `next` is legal. Self-transitions are accepted as
    /// idempotent no-ops.
    pub fn can_transition_to(self, next: WorkOrderStatus) -> bool {
        self == next || self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Human-readable workflow step shown on the board and in detail views.
    pub fn workflow_step(self) -> &'static str {
        match self {
            WorkOrderStatus::Received => "Reception",
            WorkOrderStatus::Estimate => "Estimation",
            WorkOrderStatus::Approval => "Awaiting Approval",
            WorkOrderStatus::InProgress => "In Service",
            WorkOrderStatus::WaitingForParts => "Parts Hold",
            WorkOrderStatus::Completed => "Completed",
            WorkOrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// Kind of work being performed.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "job_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    #[sea_orm(string_value = "REPAIR")]
    Repair,
    #[sea_orm(string_value = "MAINTENANCE")]
    Maintenance,
    #[sea_orm(string_value = "INSPECTION")]
    Inspection,
    #[sea_orm(string_value = "DIAGNOSTIC")]
    Diagnostic,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "work_order_priority")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderPriority {
    #[sea_orm(string_value = "HIGH")]
    High,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "NORMAL")]
    Normal,
}

/// How the job entered the shop.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "work_order_source")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderSource {
    #[sea_orm(string_value = "WALK_IN")]
    WalkIn,
    #[sea_orm(string_value = "APPOINTMENT")]
    Appointment,
    #[sea_orm(string_value = "PHONE")]
    Phone,
    #[sea_orm(string_value = "ONLINE")]
    Online,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

#[cfg(test)]
mod tests {
    use super::WorkOrderStatus::*;
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn happy_path_is_fully_connected() {
        let path = [
            Received,
            Estimate,
            Approval,
            InProgress,
            WaitingForParts,
            InProgress,
            Completed,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be legal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn walk_in_jobs_may_skip_estimation() {
        assert!(Received.can_transition_to(InProgress));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for target in WorkOrderStatus::iter() {
            if target != Completed {
                assert!(!Completed.can_transition_to(target));
            }
            if target != Cancelled {
                assert!(!Cancelled.can_transition_to(target));
            }
        }
    }

    #[test]
    fn completion_requires_in_progress() {
        for status in WorkOrderStatus::iter() {
            let legal = status.can_transition_to(Completed);
            assert_eq!(legal, matches!(status, InProgress | Completed));
        }
    }

    #[test]
    fn reopening_a_completed_order_is_rejected() {
        // The SPA allowed dropping any card into any column; the board move
        // endpoint must refuse this one.
        assert!(!Completed.can_transition_to(Received));
    }

    #[test]
    fn self_transitions_are_idempotent() {
        for status in WorkOrderStatus::iter() {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn every_status_except_terminal_can_be_cancelled() {
        for status in WorkOrderStatus::iter() {
            if !status.is_terminal() {
                assert!(status.can_transition_to(Cancelled));
            }
        }
    }

    #[test]
    fn workflow_step_is_total() {
        for status in WorkOrderStatus::iter() {
            assert!(!status.workflow_step().is_empty());
        }
    }

    #[test]
    fn wire_format_is_screaming_snake() {
        let json = serde_json::to_string(&WaitingForParts).unwrap();
        assert_eq!(json, "\"WAITING_FOR_PARTS\"");
        let back: WorkOrderStatus = serde_json::from_str("\"WAITING_FOR_PARTS\"").unwrap();
        assert_eq!(back, WaitingForParts);
    }
}
