use super::entities::{message, Message};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, Condition, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct MessageRepository {
    db: Arc<DatabaseConnection>,
}

impl MessageRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        pitch_id: Option<Uuid>,
        content: &str,
    ) -> Result<message::Model, DbErr> {
        let active = message::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            pitch_id: Set(pitch_id),
            content: Set(content.to_string()),
            read: Set(false),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(self.db.as_ref()).await
    }

    /// Everything the user sent or received, newest first.
    pub async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<message::Model>, DbErr> {
        Message::find()
            .filter(
                Condition::any()
                    .add(message::Column::SenderId.eq(user_id))
                    .add(message::Column::ReceiverId.eq(user_id)),
            )
            .order_by_desc(message::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Both directions of a two-party thread, oldest first.
    pub async fn find_between(&self, a: Uuid, b: Uuid) -> Result<Vec<message::Model>, DbErr> {
        Message::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(a))
                            .add(message::Column::ReceiverId.eq(b)),
                    )
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(b))
                            .add(message::Column::ReceiverId.eq(a)),
                    ),
            )
            .order_by_asc(message::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Flips the read flag on every unread message from `sender_id` to
    /// `receiver_id`. The unread filter keeps repeat calls at zero rows.
    pub async fn mark_read_between(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<u64, DbErr> {
        let result = Message::update_many()
            .col_expr(message::Column::Read, Expr::value(true))
            .filter(message::Column::SenderId.eq(sender_id))
            .filter(message::Column::ReceiverId.eq(receiver_id))
            .filter(message::Column::Read.eq(false))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn count_unread(&self, receiver_id: Uuid) -> Result<u64, DbErr> {
        Message::find()
            .filter(message::Column::ReceiverId.eq(receiver_id))
            .filter(message::Column::Read.eq(false))
            .count(self.db.as_ref())
            .await
    }
}
