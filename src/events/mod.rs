use crate::models::{ChecklistItemStatus, WorkOrderStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Domain events emitted by the services after a state change has been
/// persisted. Consumers run out of band and must tolerate replays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    WorkOrderCreated(Uuid),
    WorkOrderUpdated(Uuid),
    WorkOrderDeleted(Uuid),
    WorkOrderStatusChanged {
        work_order_id: Uuid,
        old_status: WorkOrderStatus,
        new_status: WorkOrderStatus,
    },
    WorkOrderAssigned {
        work_order_id: Uuid,
        technician_id: Uuid,
    },
    EstimateGenerated {
        work_order_id: Uuid,
        estimate_id: Uuid,
    },
    EstimateApproved {
        work_order_id: Uuid,
        estimate_id: Uuid,
    },
    InspectionStarted {
        work_order_id: Uuid,
        inspection_id: Uuid,
    },
    ChecklistItemUpdated {
        inspection_id: Uuid,
        item_id: Uuid,
        status: ChecklistItemStatus,
    },
    StockAdjusted {
        part_id: Uuid,
        old_quantity: i32,
        new_quantity: i32,
    },
    LowStockDetected {
        part_id: Uuid,
        quantity: i32,
        min_quantity: i32,
    },
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Failed to send event: {0}")]
    SendError(String),
}

/// Cloneable handle the services use to publish events.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), EventError> {
        self.sender
            .send(event)
            .await
            .map_err(|e| EventError::SendError(e.to_string()))
    }

    /// Send without surfacing the failure to the caller. Used on paths
    /// where the database write already committed and the request must
    /// still succeed.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Event dropped: {}", e);
        }
    }
}

pub fn event_channel(buffer: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(buffer);
    (EventSender::new(tx), rx)
}

/// Drains the event channel, logging each event. Runs until every
/// sender handle has been dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("Event processor started");
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::WorkOrderStatusChanged {
                work_order_id,
                old_status,
                new_status,
            } => {
                info!(
                    %work_order_id,
                    old_status = %old_status,
                    new_status = %new_status,
                    "Work order status changed"
                );
            }
            Event::LowStockDetected {
                part_id,
                quantity,
                min_quantity,
            } => {
                warn!(
                    %part_id,
                    quantity,
                    min_quantity,
                    "Part fell below minimum stock level"
                );
            }
            other => debug!(event = ?other, "Event processed"),
        }
    }
    info!("Event processor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_and_receive() {
        let (sender, mut rx) = event_channel(8);
        let id = Uuid::new_v4();
        sender.send(Event::WorkOrderCreated(id)).await.unwrap();
        match rx.recv().await {
            Some(Event::WorkOrderCreated(got)) => assert_eq!(got, id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (sender, rx) = event_channel(1);
        drop(rx);
        sender.send_or_log(Event::WorkOrderDeleted(Uuid::new_v4())).await;
    }
}
