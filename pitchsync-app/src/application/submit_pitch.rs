use super::normalize_pitch::{format_funding_amount, normalize_pitch, parse_funding_amount};
use crate::domain::{NewPitch, PersistedPitch, Pitch, ScoreContext};
use crate::infrastructure::db::{PitchRepository, ProfileRepository};
use crate::infrastructure::realtime::{ChangeEvent, ChangeFeed, ChangeOp};
use crate::infrastructure::scoring::ScoringProvider;
use pitchsync_errors::AppError;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

pub struct SubmitPitch {
    pitches: PitchRepository,
    profiles: ProfileRepository,
    scoring: Arc<dyn ScoringProvider>,
    changes: ChangeFeed,
}

impl SubmitPitch {
    pub fn new(
        pitches: PitchRepository,
        profiles: ProfileRepository,
        scoring: Arc<dyn ScoringProvider>,
        changes: ChangeFeed,
    ) -> Self {
        Self {
            pitches,
            profiles,
            scoring,
            changes,
        }
    }

    /// Scores the pitch once at submission and stores the result, then hands
    /// back the same normalized view the browse path produces.
    pub async fn execute(&self, actor: Option<Uuid>, input: &NewPitch) -> Result<Pitch, AppError> {
        let owner_id = actor.ok_or(AppError::NotAuthenticated)?;
        let funding_amount = validate(input)?;

        let context = ScoreContext {
            company_name: input.company_name.trim().to_string(),
            description: input.description.trim().to_string(),
            funding_amount: format_funding_amount(Some(funding_amount)),
            funding_stage: input.funding_stage.trim().to_string(),
        };
        let ai_score = self.scoring.score(&context);
        let ai_summary = self.scoring.summarize(&context);

        let record = PersistedPitch::new(owner_id, input, Some(funding_amount), ai_score, ai_summary);
        let row = self
            .pitches
            .create(&record)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        let owner = match self.profiles.find_by_id(owner_id).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!("owner lookup failed for {}: {}", owner_id, err);
                None
            }
        };

        self.changes
            .publish(ChangeEvent::pitch(ChangeOp::Insert, row.id));

        Ok(normalize_pitch(row, owner.as_ref(), self.scoring.as_ref()))
    }
}

fn validate(input: &NewPitch) -> Result<f64, AppError> {
    if input.company_name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }
    let funding_amount = parse_funding_amount(&input.funding_amount).ok_or_else(|| {
        AppError::Validation("Funding amount must be a number".to_string())
    })?;
    validate_link(&input.deck_url, "Deck link")?;
    if let Some(video_url) = input.video_url.as_deref() {
        if !video_url.trim().is_empty() {
            validate_link(video_url, "Video link")?;
        }
    }
    Ok(funding_amount)
}

fn validate_link(value: &str, label: &str) -> Result<(), AppError> {
    let url = Url::parse(value.trim())
        .map_err(|_| AppError::Validation(format!("{} must be a valid URL", label)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::Validation(format!(
            "{} must use http or https",
            label
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PitchStatus, UNKNOWN_FOUNDER};
    use crate::infrastructure::db::entities::{pitch, profile};
    use crate::infrastructure::realtime::ChangeTable;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

    struct FixedScoring;

    impl ScoringProvider for FixedScoring {
        fn score(&self, _context: &ScoreContext) -> i32 {
            70
        }

        fn summarize(&self, context: &ScoreContext) -> String {
            format!("summary for {}", context.company_name)
        }
    }

    fn service(db: DatabaseConnection, changes: ChangeFeed) -> SubmitPitch {
        let db = Arc::new(db);
        SubmitPitch::new(
            PitchRepository::new(db.clone()),
            ProfileRepository::new(db),
            Arc::new(FixedScoring),
            changes,
        )
    }

    fn input() -> NewPitch {
        NewPitch {
            company_name: "Acme".to_string(),
            industry: "Robotics".to_string(),
            location: "Berlin".to_string(),
            funding_stage: "seed".to_string(),
            funding_amount: "$500,000".to_string(),
            description: "Widgets on demand.".to_string(),
            problem: "No widgets".to_string(),
            solution: "Widgets".to_string(),
            traction: String::new(),
            team: "Two of us".to_string(),
            growth: String::new(),
            deck_url: "https://cdn.example.com/deck.pdf".to_string(),
            video_url: None,
        }
    }

    fn stored_row(id: Uuid, owner_id: Uuid) -> pitch::Model {
        pitch::Model {
            id,
            owner_id,
            company_name: "Acme".to_string(),
            industry: Some("Robotics".to_string()),
            location: Some("Berlin".to_string()),
            funding_stage: Some("seed".to_string()),
            funding_amount: Some(500000.0),
            description: Some("Widgets on demand.".to_string()),
            problem: Some("No widgets".to_string()),
            solution: Some("Widgets".to_string()),
            traction: None,
            team: Some("Two of us".to_string()),
            growth: None,
            deck_url: Some("https://cdn.example.com/deck.pdf".to_string()),
            video_url: None,
            ai_score: Some(70),
            ai_summary: Some("summary for Acme".to_string()),
            status: "new".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_submit_requires_authentication() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, ChangeFeed::new());

        let result = service.execute(None, &input()).await;
        assert!(matches!(result, Err(AppError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_company() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, ChangeFeed::new());

        let mut bad = input();
        bad.company_name = "   ".to_string();
        let result = service.execute(Some(Uuid::new_v4()), &bad).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_unparseable_funding() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, ChangeFeed::new());

        let mut bad = input();
        bad.funding_amount = "soon".to_string();
        let result = service.execute(Some(Uuid::new_v4()), &bad).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_links() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, ChangeFeed::new());

        let mut bad = input();
        bad.deck_url = "not a url".to_string();
        assert!(matches!(
            service.execute(Some(Uuid::new_v4()), &bad).await,
            Err(AppError::Validation(_))
        ));

        let mut bad = input();
        bad.video_url = Some("ftp://example.com/pitch.mp4".to_string());
        assert!(matches!(
            service.execute(Some(Uuid::new_v4()), &bad).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_persists_and_returns_view() {
        let pitch_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();
        let owner = profile::Model {
            id: owner_id,
            email: "jane@example.com".to_string(),
            display_name: "Jane Doe".to_string(),
            role: "founder".to_string(),
            created_at: None,
            updated_at: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_row(pitch_id, owner_id)]])
            .append_query_results([vec![owner]])
            .into_connection();
        let changes = ChangeFeed::new();
        let mut rx = changes.subscribe(ChangeTable::Pitches);
        let service = service(db, changes);

        let pitch = service.execute(Some(owner_id), &input()).await.unwrap();

        assert_eq!(pitch.id, pitch_id);
        assert_eq!(pitch.founder_name, "Jane Doe");
        assert_eq!(pitch.founder_email, "jane@example.com");
        assert_eq!(pitch.funding_amount, "500000");
        assert_eq!(pitch.ai_score, 70);
        assert_eq!(pitch.ai_summary, "summary for Acme");
        assert_eq!(pitch.status, PitchStatus::New);
        assert_eq!(pitch.questions.len(), 5);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.op, ChangeOp::Insert);
        assert_eq!(event.row_id, Some(pitch_id));
    }

    #[tokio::test]
    async fn test_submit_degrades_missing_owner_profile() {
        let pitch_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_row(pitch_id, owner_id)]])
            .append_query_results([Vec::<profile::Model>::new()])
            .into_connection();
        let service = service(db, ChangeFeed::new());

        let pitch = service.execute(Some(owner_id), &input()).await.unwrap();
        assert_eq!(pitch.founder_name, UNKNOWN_FOUNDER);
        assert_eq!(pitch.founder_email, "");
    }
}
