mod email;

pub use email::EmailNotifier;

use async_trait::async_trait;
use pitchsync_errors::AppError;
use serde::Serialize;

/// Payload for the owner-facing email sent after an investor acts on a
/// pitch. The dispatch side resolves the owner's address from the id.
#[derive(Debug, Clone, Serialize)]
pub struct PitchActionNotice {
    pub pitch_id: uuid::Uuid,
    pub action: String,
    pub reviewer_id: uuid::Uuid,
    pub owner_id: uuid::Uuid,
    pub company_name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageNotice {
    pub message_id: uuid::Uuid,
    pub sender_id: uuid::Uuid,
    pub receiver_id: uuid::Uuid,
    pub content: String,
    pub sent_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Outbound notification channel. Callers treat failures as non-fatal, so an
/// implementation only has to report them honestly.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn pitch_action(&self, notice: &PitchActionNotice) -> Result<(), AppError>;
    async fn message_received(&self, notice: &MessageNotice) -> Result<(), AppError>;
}
