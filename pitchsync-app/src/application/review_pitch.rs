use super::normalize_pitch::normalize_pitch;
use crate::domain::{Pitch, ReviewAction, UNKNOWN_FOUNDER};
use crate::infrastructure::db::{PitchRepository, ProfileRepository};
use crate::infrastructure::notify::{Notifier, PitchActionNotice};
use crate::infrastructure::realtime::{ChangeEvent, ChangeFeed, ChangeOp};
use crate::infrastructure::scoring::ScoringProvider;
use pitchsync_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct ReviewPitch {
    pitches: PitchRepository,
    profiles: ProfileRepository,
    scoring: Arc<dyn ScoringProvider>,
    notifier: Arc<dyn Notifier>,
    changes: ChangeFeed,
}

impl ReviewPitch {
    pub fn new(
        pitches: PitchRepository,
        profiles: ProfileRepository,
        scoring: Arc<dyn ScoringProvider>,
        notifier: Arc<dyn Notifier>,
        changes: ChangeFeed,
    ) -> Self {
        Self {
            pitches,
            profiles,
            scoring,
            notifier,
            changes,
        }
    }

    /// Persists the requested status, then notifies the founder best-effort.
    /// Any action can replace any earlier one, so a rejection stays
    /// reversible. Success means "status persisted", not "founder notified".
    pub async fn execute(
        &self,
        actor: Option<Uuid>,
        pitch_id: Uuid,
        action: ReviewAction,
        notes: Option<&str>,
    ) -> Result<Pitch, AppError> {
        let reviewer_id = actor.ok_or(AppError::NotAuthenticated)?;

        let pitch = self
            .pitches
            .find_by_id(pitch_id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?
            .ok_or(AppError::PitchNotFound)?;

        let owner = match self.profiles.find_by_id(pitch.owner_id).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!("owner lookup failed for {}: {}", pitch.owner_id, err);
                None
            }
        };
        let founder_name = owner
            .as_ref()
            .map(|profile| profile.display_name.clone())
            .unwrap_or_else(|| UNKNOWN_FOUNDER.to_string());

        let updated = self
            .pitches
            .set_status(pitch_id, action.status())
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        tracing::info!(
            "pitch {} ({}) moved to {} for founder {}",
            pitch_id,
            updated.company_name,
            action.as_str(),
            founder_name
        );

        self.changes
            .publish(ChangeEvent::pitch(ChangeOp::Update, pitch_id));

        let notice = PitchActionNotice {
            pitch_id,
            action: action.as_str().to_string(),
            reviewer_id,
            owner_id: pitch.owner_id,
            company_name: updated.company_name.clone(),
            notes: notes.map(|n| n.to_string()),
        };
        if let Err(err) = self.notifier.pitch_action(&notice).await {
            tracing::warn!("pitch notification failed: {}", err);
        }

        Ok(normalize_pitch(updated, owner.as_ref(), self.scoring.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PitchStatus, ScoreContext};
    use crate::infrastructure::db::entities::{pitch, profile};
    use crate::infrastructure::notify::MessageNotice;
    use crate::infrastructure::realtime::ChangeTable;
    use async_trait::async_trait;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Mutex;

    struct FixedScoring;

    impl ScoringProvider for FixedScoring {
        fn score(&self, _context: &ScoreContext) -> i32 {
            70
        }

        fn summarize(&self, context: &ScoreContext) -> String {
            format!("summary for {}", context.company_name)
        }
    }

    struct RecordingNotifier {
        notices: Mutex<Vec<PitchActionNotice>>,
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
        async fn pitch_action(&self, notice: &PitchActionNotice) -> Result<(), AppError> {
            self.notices.lock().unwrap().push(notice.clone());
            Ok(())
        }

        async fn message_received(&self, _notice: &MessageNotice) -> Result<(), AppError> {
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

    fn service(db: DatabaseConnection, notifier: Arc<dyn Notifier>, changes: ChangeFeed) -> ReviewPitch {
        let db = Arc::new(db);
        ReviewPitch::new(
            PitchRepository::new(db.clone()),
            ProfileRepository::new(db),
            Arc::new(FixedScoring),
            notifier,
            changes,
        )
    }

    fn pitch_row(id: Uuid, owner_id: Uuid, status: &str) -> pitch::Model {
        pitch::Model {
            id,
            owner_id,
            company_name: "Acme".to_string(),
            industry: None,
            location: None,
            funding_stage: None,
            funding_amount: None,
            description: None,
            problem: None,
            solution: None,
            traction: None,
            team: None,
            growth: None,
            deck_url: None,
            video_url: None,
            ai_score: Some(80),
            ai_summary: None,
            status: status.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn owner_row(id: Uuid) -> profile::Model {
        profile::Model {
            id,
            email: "jane@example.com".to_string(),
            display_name: "Jane Doe".to_string(),
            role: "founder".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_review_requires_authentication() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, Arc::new(RecordingNotifier::new()), ChangeFeed::new());

        let result = service
            .execute(None, Uuid::new_v4(), ReviewAction::Shortlisted, None)
            .await;
        assert!(matches!(result, Err(AppError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_review_missing_pitch_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<pitch::Model>::new()])
            .into_connection();
        let service = service(db, Arc::new(RecordingNotifier::new()), ChangeFeed::new());

        let result = service
            .execute(Some(Uuid::new_v4()), Uuid::new_v4(), ReviewAction::Rejected, None)
            .await;
        assert!(matches!(result, Err(AppError::PitchNotFound)));
    }

    #[tokio::test]
    async fn test_review_returns_updated_pitch_and_notifies() {
        let pitch_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();
        let reviewer_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "new")]])
            .append_query_results([vec![owner_row(owner_id)]])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "new")]])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "shortlisted")]])
            .into_connection();
        let notifier = Arc::new(RecordingNotifier::new());
        let changes = ChangeFeed::new();
        let mut rx = changes.subscribe(ChangeTable::Pitches);
        let service = service(db, notifier.clone(), changes);

        let pitch = service
            .execute(
                Some(reviewer_id),
                pitch_id,
                ReviewAction::Shortlisted,
                Some("strong team"),
            )
            .await
            .unwrap();

        assert_eq!(pitch.id, pitch_id);
        assert_eq!(pitch.status, PitchStatus::Shortlisted);
        assert_eq!(pitch.founder_name, "Jane Doe");
        assert_eq!(pitch.ai_score, 80);

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].pitch_id, pitch_id);
        assert_eq!(notices[0].action, "shortlisted");
        assert_eq!(notices[0].reviewer_id, reviewer_id);
        assert_eq!(notices[0].owner_id, owner_id);
        assert_eq!(notices[0].notes.as_deref(), Some("strong team"));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.table, ChangeTable::Pitches);
        assert_eq!(event.op, ChangeOp::Update);
        assert_eq!(event.row_id, Some(pitch_id));
    }

    #[tokio::test]
    async fn test_review_survives_notification_failure() {
        let pitch_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "new")]])
            .append_query_results([vec![owner_row(owner_id)]])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "new")]])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "rejected")]])
            .into_connection();
        let changes = ChangeFeed::new();
        let mut rx = changes.subscribe(ChangeTable::Pitches);
        let service = service(db, Arc::new(FailingNotifier), changes);

        let result = service
            .execute(Some(Uuid::new_v4()), pitch_id, ReviewAction::Rejected, None)
            .await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().status, PitchStatus::Rejected);
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_rejected_pitch_can_be_shortlisted() {
        let pitch_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "rejected")]])
            .append_query_results([vec![owner_row(owner_id)]])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "rejected")]])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "shortlisted")]])
            .into_connection();
        let notifier = Arc::new(RecordingNotifier::new());
        let service = service(db, notifier.clone(), ChangeFeed::new());

        let pitch = service
            .execute(Some(Uuid::new_v4()), pitch_id, ReviewAction::Shortlisted, None)
            .await
            .unwrap();
        assert_eq!(pitch.status, PitchStatus::Shortlisted);
        assert_eq!(notifier.notices.lock().unwrap()[0].action, "shortlisted");
    }

    #[tokio::test]
    async fn test_review_degrades_missing_owner() {
        let pitch_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "new")]])
            .append_query_results([Vec::<profile::Model>::new()])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "new")]])
            .append_query_results([vec![pitch_row(pitch_id, owner_id, "forwarded")]])
            .into_connection();
        let service = service(db, Arc::new(RecordingNotifier::new()), ChangeFeed::new());

        let pitch = service
            .execute(Some(Uuid::new_v4()), pitch_id, ReviewAction::Forwarded, None)
            .await
            .unwrap();
        assert_eq!(pitch.founder_name, UNKNOWN_FOUNDER);
        assert_eq!(pitch.status, PitchStatus::Forwarded);
    }
}
