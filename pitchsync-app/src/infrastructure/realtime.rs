use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTable {
    Pitches,
    Messages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
}

/// "Something changed" signal. Carries just enough for a subscriber to decide
/// whether to refetch; never a row payload.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub table: ChangeTable,
    pub op: ChangeOp,
    pub row_id: Option<uuid::Uuid>,
    pub sender_id: Option<uuid::Uuid>,
    pub receiver_id: Option<uuid::Uuid>,
}

impl ChangeEvent {
    pub fn pitch(op: ChangeOp, row_id: uuid::Uuid) -> Self {
        Self {
            table: ChangeTable::Pitches,
            op,
            row_id: Some(row_id),
            sender_id: None,
            receiver_id: None,
        }
    }

    pub fn message(
        op: ChangeOp,
        row_id: Option<uuid::Uuid>,
        sender_id: uuid::Uuid,
        receiver_id: uuid::Uuid,
    ) -> Self {
        Self {
            table: ChangeTable::Messages,
            op,
            row_id,
            sender_id: Some(sender_id),
            receiver_id: Some(receiver_id),
        }
    }
}

/// In-process change feed with one broadcast channel per table. Publishing
/// with no subscribers is a no-op, and a slow subscriber only loses its own
/// backlog.
#[derive(Clone)]
pub struct ChangeFeed {
    channels: Arc<DashMap<ChangeTable, broadcast::Sender<ChangeEvent>>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
        }
    }

    pub fn publish(&self, event: ChangeEvent) {
        if let Some(sender) = self.channels.get(&event.table) {
            let _ = sender.send(event);
        }
    }

    pub fn subscribe(&self, table: ChangeTable) -> broadcast::Receiver<ChangeEvent> {
        self.channels
            .entry(table)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }
}
