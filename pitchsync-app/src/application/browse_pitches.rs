use super::normalize_pitch::normalize_pitch;
use crate::domain::Pitch;
use crate::infrastructure::db::{PitchRepository, ProfileRepository};
use crate::infrastructure::scoring::ScoringProvider;
use pitchsync_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct BrowsePitches {
    pitches: PitchRepository,
    profiles: ProfileRepository,
    scoring: Arc<dyn ScoringProvider>,
}

impl BrowsePitches {
    pub fn new(
        pitches: PitchRepository,
        profiles: ProfileRepository,
        scoring: Arc<dyn ScoringProvider>,
    ) -> Self {
        Self {
            pitches,
            profiles,
            scoring,
        }
    }

    /// Every pitch, newest first, with founder identity joined in. Pitches
    /// whose owner is gone still appear under the sentinel name.
    pub async fn list(&self) -> Result<Vec<Pitch>, AppError> {
        let rows = self
            .pitches
            .list_with_owners()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|(record, owner)| {
                normalize_pitch(record, owner.as_ref(), self.scoring.as_ref())
            })
            .collect())
    }

    pub async fn list_for_owner(&self, actor: Option<Uuid>) -> Result<Vec<Pitch>, AppError> {
        let owner_id = actor.ok_or(AppError::NotAuthenticated)?;
        let rows = self
            .pitches
            .list_by_owner(owner_id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        // One lookup covers every row, they all share the same owner.
        let owner = match self.profiles.find_by_id(owner_id).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!("owner lookup failed for {}: {}", owner_id, err);
                None
            }
        };

        Ok(rows
            .into_iter()
            .map(|record| normalize_pitch(record, owner.as_ref(), self.scoring.as_ref()))
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Pitch, AppError> {
        let record = self
            .pitches
            .find_by_id(id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?
            .ok_or(AppError::PitchNotFound)?;

        let owner = match self.profiles.find_by_id(record.owner_id).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!("owner lookup failed for {}: {}", record.owner_id, err);
                None
            }
        };

        Ok(normalize_pitch(record, owner.as_ref(), self.scoring.as_ref()))
    }
}
