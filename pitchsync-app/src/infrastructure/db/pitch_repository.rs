use super::entities::{pitch, profile, Pitch, Profile};
use crate::domain::{PersistedPitch, PitchStatus};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct PitchRepository {
    db: Arc<DatabaseConnection>,
}

impl PitchRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(&self, pitch_data: &PersistedPitch) -> Result<pitch::Model, DbErr> {
        let active = pitch::ActiveModel {
            id: Set(pitch_data.id),
            owner_id: Set(pitch_data.owner_id),
            company_name: Set(pitch_data.company_name.clone()),
            industry: Set(pitch_data.industry.clone()),
            location: Set(pitch_data.location.clone()),
            funding_stage: Set(pitch_data.funding_stage.clone()),
            funding_amount: Set(pitch_data.funding_amount),
            description: Set(pitch_data.description.clone()),
            problem: Set(pitch_data.problem.clone()),
            solution: Set(pitch_data.solution.clone()),
            traction: Set(pitch_data.traction.clone()),
            team: Set(pitch_data.team.clone()),
            growth: Set(pitch_data.growth.clone()),
            deck_url: Set(pitch_data.deck_url.clone()),
            video_url: Set(pitch_data.video_url.clone()),
            ai_score: Set(Some(pitch_data.ai_score)),
            ai_summary: Set(Some(pitch_data.ai_summary.clone())),
            status: Set(pitch_data.status.as_str().to_string()),
            created_at: Set(Some(chrono::Utc::now())),
            updated_at: Set(None),
        };
        active.insert(self.db.as_ref()).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<pitch::Model>, DbErr> {
        Pitch::find_by_id(id).one(self.db.as_ref()).await
    }

    /// Every pitch with its owner profile joined in, newest first.
    pub async fn list_with_owners(
        &self,
    ) -> Result<Vec<(pitch::Model, Option<profile::Model>)>, DbErr> {
        Pitch::find()
            .find_also_related(Profile)
            .order_by_desc(pitch::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<pitch::Model>, DbErr> {
        Pitch::find()
            .filter(pitch::Column::OwnerId.eq(owner_id))
            .order_by_desc(pitch::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    pub async fn set_status(&self, id: Uuid, status: PitchStatus) -> Result<pitch::Model, DbErr> {
        let pitch = Pitch::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(DbErr::RecordNotFound("Pitch not found".to_string()))?;

        let mut active: pitch::ActiveModel = pitch.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(self.db.as_ref()).await
    }
}
