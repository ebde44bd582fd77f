use super::Message;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Per-counterpart summary derived from a viewer's message history. Never
/// persisted; rebuilt on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub counterpart_id: uuid::Uuid,
    pub counterpart_name: String,
    pub counterpart_role: String,
    pub unread_count: u32,
    pub last_message: Message,
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
}
