use crate::{db::DbPool, errors::ServiceError, events::EventSender};
use async_trait::async_trait;
use std::sync::Arc;

/// Encapsulates a single business mutation: validation, persistence, and the
/// events it publishes once the write has committed.
#[async_trait]
pub trait Command: Send + Sync {
    /// The value produced on success.
    type Result;

    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError>;
}

pub mod work_orders;
