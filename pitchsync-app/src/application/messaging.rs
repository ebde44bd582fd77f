use super::conversations::group_by_counterpart;
use crate::domain::{Conversation, Message, Role, UNKNOWN_ROLE, UNKNOWN_USER};
use crate::infrastructure::db::{MessageRepository, ProfileRepository};
use crate::infrastructure::notify::{MessageNotice, Notifier};
use crate::infrastructure::realtime::{ChangeEvent, ChangeFeed, ChangeOp};
use pitchsync_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct Messaging {
    messages: MessageRepository,
    profiles: ProfileRepository,
    notifier: Arc<dyn Notifier>,
    changes: ChangeFeed,
}

impl Messaging {
    pub fn new(
        messages: MessageRepository,
        profiles: ProfileRepository,
        notifier: Arc<dyn Notifier>,
        changes: ChangeFeed,
    ) -> Self {
        Self {
            messages,
            profiles,
            notifier,
            changes,
        }
    }

    /// Stores the message, then emails the receiver best-effort. A failed
    /// email never fails the send.
    pub async fn send(
        &self,
        actor: Option<Uuid>,
        receiver_id: Uuid,
        pitch_id: Option<Uuid>,
        content: &str,
    ) -> Result<Message, AppError> {
        let sender_id = actor.ok_or(AppError::NotAuthenticated)?;
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Message cannot be empty".to_string()));
        }
        if receiver_id == sender_id {
            return Err(AppError::Validation(
                "You cannot message yourself".to_string(),
            ));
        }

        let row = self
            .messages
            .create(sender_id, receiver_id, pitch_id, content)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        let message = Message::from(row);

        let notice = MessageNotice {
            message_id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            sent_at: message.created_at,
        };
        if let Err(err) = self.notifier.message_received(&notice).await {
            tracing::warn!("message notification failed: {}", err);
        }

        self.changes.publish(ChangeEvent::message(
            ChangeOp::Insert,
            Some(message.id),
            message.sender_id,
            message.receiver_id,
        ));

        Ok(message)
    }

    /// Reads the thread without touching read flags. Callers that open the
    /// thread on screen follow up with mark_thread_read.
    pub async fn thread(
        &self,
        actor: Option<Uuid>,
        counterpart_id: Uuid,
    ) -> Result<Vec<Message>, AppError> {
        let viewer_id = actor.ok_or(AppError::NotAuthenticated)?;
        let rows = self
            .messages
            .find_between(viewer_id, counterpart_id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    pub async fn mark_thread_read(
        &self,
        actor: Option<Uuid>,
        counterpart_id: Uuid,
    ) -> Result<u64, AppError> {
        let viewer_id = actor.ok_or(AppError::NotAuthenticated)?;
        let updated = self
            .messages
            .mark_read_between(counterpart_id, viewer_id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        if updated > 0 {
            self.changes.publish(ChangeEvent::message(
                ChangeOp::Update,
                None,
                counterpart_id,
                viewer_id,
            ));
        }

        Ok(updated)
    }

    pub async fn conversations(&self, actor: Option<Uuid>) -> Result<Vec<Conversation>, AppError> {
        let viewer_id = actor.ok_or(AppError::NotAuthenticated)?;
        let rows = self
            .messages
            .find_for_user(viewer_id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        let messages: Vec<Message> = rows.into_iter().map(Message::from).collect();

        let mut conversations = Vec::new();
        for thread in group_by_counterpart(viewer_id, messages) {
            // One lookup per counterpart; a failed or empty lookup degrades
            // to sentinels instead of dropping the conversation.
            let profile = match self.profiles.find_by_id(thread.counterpart_id).await {
                Ok(found) => found,
                Err(err) => {
                    tracing::warn!(
                        "profile lookup failed for {}: {}",
                        thread.counterpart_id,
                        err
                    );
                    None
                }
            };
            let (name, role) = match profile {
                Some(profile) => (
                    profile.display_name,
                    Role::parse(&profile.role).as_str().to_string(),
                ),
                None => (UNKNOWN_USER.to_string(), UNKNOWN_ROLE.to_string()),
            };

            let last_message_at = thread.last_message.created_at;
            conversations.push(Conversation {
                counterpart_id: thread.counterpart_id,
                counterpart_name: name,
                counterpart_role: role,
                unread_count: thread.unread_count,
                last_message: thread.last_message,
                last_message_at,
            });
        }

        Ok(conversations)
    }

    /// Fresh count on every call; nothing is cached.
    pub async fn unread_count(&self, actor: Option<Uuid>) -> Result<u64, AppError> {
        let viewer_id = actor.ok_or(AppError::NotAuthenticated)?;
        self.messages
            .count_unread(viewer_id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::entities::{message, profile};
    use crate::infrastructure::notify::PitchActionNotice;
    use crate::infrastructure::realtime::ChangeTable;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    struct RecordingNotifier {
        notices: Mutex<Vec<MessageNotice>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                notices: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn pitch_action(&self, _notice: &PitchActionNotice) -> Result<(), AppError> {
            Ok(())
        }

        async fn message_received(&self, notice: &MessageNotice) -> Result<(), AppError> {
            self.notices.lock().unwrap().push(notice.clone());
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn pitch_action(&self, _notice: &PitchActionNotice) -> Result<(), AppError> {
            Err(AppError::Notification("relay down".to_string()))
        }

        async fn message_received(&self, _notice: &MessageNotice) -> Result<(), AppError> {
            Err(AppError::Notification("relay down".to_string()))
        }
    }

    fn service(db: DatabaseConnection, notifier: Arc<dyn Notifier>, changes: ChangeFeed) -> Messaging {
        let db = Arc::new(db);
        Messaging::new(
            MessageRepository::new(db.clone()),
            ProfileRepository::new(db),
            notifier,
            changes,
        )
    }

    fn message_row(
        sender: Uuid,
        receiver: Uuid,
        minute: u32,
        read: bool,
    ) -> message::Model {
        message::Model {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            pitch_id: None,
            content: "hello".to_string(),
            read,
            created_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, minute, 0).unwrap()),
        }
    }

    fn profile_row(id: Uuid, name: &str, role: &str) -> profile::Model {
        profile::Model {
            id,
            email: format!("{}@example.com", name.to_lowercase()),
            display_name: name.to_string(),
            role: role.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn test_send_requires_authentication() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, Arc::new(RecordingNotifier::new()), ChangeFeed::new());

        let result = service.send(None, Uuid::new_v4(), None, "hi").await;
        assert!(matches!(result, Err(AppError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_send_rejects_empty_body() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, Arc::new(RecordingNotifier::new()), ChangeFeed::new());

        let result = service
            .send(Some(Uuid::new_v4()), Uuid::new_v4(), None, "   ")
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_send_persists_notifies_and_publishes() {
        let sender = Uuid::new_v4();
        let receiver = Uuid::new_v4();
        let row = message_row(sender, receiver, 5, false);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let notifier = Arc::new(RecordingNotifier::new());
        let changes = ChangeFeed::new();
        let mut rx = changes.subscribe(ChangeTable::Messages);
        let service = service(db, notifier.clone(), changes);

        let sent = service
            .send(Some(sender), receiver, None, "hello")
            .await
            .unwrap();
        assert_eq!(sent.content, "hello");
        assert_eq!(sent.sender_id, sender);
        assert!(!sent.read);

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].receiver_id, receiver);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.table, ChangeTable::Messages);
        assert_eq!(event.op, ChangeOp::Insert);
        assert_eq!(event.sender_id, Some(sender));
        assert_eq!(event.receiver_id, Some(receiver));
    }

    #[tokio::test]
    async fn test_send_survives_notification_failure() {
        let sender = Uuid::new_v4();
        let receiver = Uuid::new_v4();
        let row = message_row(sender, receiver, 5, false);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let service = service(db, Arc::new(FailingNotifier), ChangeFeed::new());

        let sent = service.send(Some(sender), receiver, None, "hello").await;
        assert!(sent.is_ok());
    }

    #[tokio::test]
    async fn test_mark_thread_read_is_idempotent() {
        let viewer = Uuid::new_v4();
        let counterpart = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .append_query_results([vec![count_row(0)]])
            .into_connection();
        let service = service(db, Arc::new(RecordingNotifier::new()), ChangeFeed::new());

        let first = service
            .mark_thread_read(Some(viewer), counterpart)
            .await
            .unwrap();
        assert_eq!(first, 2);

        let second = service
            .mark_thread_read(Some(viewer), counterpart)
            .await
            .unwrap();
        assert_eq!(second, 0);

        let unread = service.unread_count(Some(viewer)).await.unwrap();
        assert_eq!(unread, 0);
    }

    #[tokio::test]
    async fn test_conversations_resolve_and_degrade() {
        let viewer = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let ghost = Uuid::new_v4();

        // Alice's thread is newer, so her profile is looked up first.
        let rows = vec![
            message_row(alice, viewer, 30, false),
            message_row(viewer, alice, 10, true),
            message_row(ghost, viewer, 20, true),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .append_query_results([vec![profile_row(alice, "Alice", "investor")]])
            .append_query_results([Vec::<profile::Model>::new()])
            .into_connection();
        let service = service(db, Arc::new(RecordingNotifier::new()), ChangeFeed::new());

        let conversations = service.conversations(Some(viewer)).await.unwrap();
        assert_eq!(conversations.len(), 2);

        assert_eq!(conversations[0].counterpart_id, alice);
        assert_eq!(conversations[0].counterpart_name, "Alice");
        assert_eq!(conversations[0].counterpart_role, "investor");
        assert_eq!(conversations[0].unread_count, 1);

        assert_eq!(conversations[1].counterpart_id, ghost);
        assert_eq!(conversations[1].counterpart_name, UNKNOWN_USER);
        assert_eq!(conversations[1].counterpart_role, UNKNOWN_ROLE);
        assert_eq!(conversations[1].unread_count, 0);
    }
}
