//! Change notifications for request records.
//!
//! Every successful mutation publishes a [`RequestChanged`] event; read
//! paths interested in freshness subscribe instead of coupling to any
//! particular cache.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::request::{RequestKind, RequestStatus};

#[derive(Debug, Clone, Serialize)]
pub struct RequestChanged {
    pub id: String,
    pub kind: RequestKind,
    pub status: RequestStatus,
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<RequestChanged>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Fire-and-forget: publishing with no live subscribers is not an
    /// error.
    pub fn publish(&self, event: RequestChanged) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RequestChanged> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
