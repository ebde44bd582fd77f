use super::entities::{profile, Profile};
use crate::domain::Role;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profile::Model>, DbErr> {
        Profile::find_by_id(id).one(self.db.as_ref()).await
    }

    pub async fn find_by_role(&self, role: Role) -> Result<Vec<profile::Model>, DbErr> {
        Profile::find()
            .filter(profile::Column::Role.eq(role.as_str()))
            .order_by_desc(profile::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    pub async fn list(&self) -> Result<Vec<profile::Model>, DbErr> {
        Profile::find()
            .order_by_desc(profile::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    pub async fn upsert(&self, profile_data: &crate::domain::Profile) -> Result<profile::Model, DbErr> {
        // The id comes from the identity provider, so it doubles as the
        // existence check. Role is set once at signup and never touched
        // on the update path.
        if let Some(existing) = self.find_by_id(profile_data.id).await? {
            let mut active: profile::ActiveModel = existing.into();
            active.email = Set(profile_data.email.clone());
            active.display_name = Set(profile_data.display_name.clone());
            active.updated_at = Set(Some(chrono::Utc::now()));
            active.update(self.db.as_ref()).await
        } else {
            let active = profile::ActiveModel {
                id: Set(profile_data.id),
                email: Set(profile_data.email.clone()),
                display_name: Set(profile_data.display_name.clone()),
                role: Set(profile_data.role.as_str().to_string()),
                created_at: Set(Some(chrono::Utc::now())),
                updated_at: Set(None),
            };
            active.insert(self.db.as_ref()).await
        }
    }
}
