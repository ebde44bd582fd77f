use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: uuid::Uuid,
    pub sender_id: uuid::Uuid,
    pub receiver_id: uuid::Uuid,
    pub pitch_id: Option<uuid::Uuid>,
    pub content: String,
    pub read: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
