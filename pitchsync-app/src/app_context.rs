use crate::application::{BrowsePitches, Messaging, ReviewPitch, SubmitPitch};
use crate::config::AppConfig;
use crate::infrastructure::auth::IdentityClient;
use crate::infrastructure::db::{MessageRepository, PitchRepository, ProfileRepository};
use crate::infrastructure::notify::{EmailNotifier, Notifier};
use crate::infrastructure::realtime::ChangeFeed;
use crate::infrastructure::scoring::{ScoringProvider, SynthesizedScoring};
use crate::infrastructure::storage::StorageClient;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub identity: Arc<IdentityClient>,
    pub storage: Arc<StorageClient>,
    pub profiles: ProfileRepository,
    pub submit_pitch: Arc<SubmitPitch>,
    pub browse_pitches: Arc<BrowsePitches>,
    pub review_pitch: Arc<ReviewPitch>,
    pub messaging: Arc<Messaging>,
    pub changes: ChangeFeed,
}

impl AppContext {
    pub fn new(config: &AppConfig, db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        let pitches = PitchRepository::new(db.clone());
        let profiles = ProfileRepository::new(db.clone());
        let messages = MessageRepository::new(db);
        let scoring: Arc<dyn ScoringProvider> = Arc::new(SynthesizedScoring);
        let notifier: Arc<dyn Notifier> = Arc::new(EmailNotifier::new(
            config.functions_url.clone(),
            config.service_api_key.clone(),
        ));
        let changes = ChangeFeed::new();

        Self {
            identity: Arc::new(IdentityClient::new(
                config.identity_url.clone(),
                config.service_api_key.clone(),
            )),
            storage: Arc::new(StorageClient::new(
                config.storage_url.clone(),
                config.service_api_key.clone(),
            )),
            profiles: profiles.clone(),
            submit_pitch: Arc::new(SubmitPitch::new(
                pitches.clone(),
                profiles.clone(),
                scoring.clone(),
                changes.clone(),
            )),
            browse_pitches: Arc::new(BrowsePitches::new(
                pitches.clone(),
                profiles.clone(),
                scoring.clone(),
            )),
            review_pitch: Arc::new(ReviewPitch::new(
                pitches,
                profiles.clone(),
                scoring,
                notifier.clone(),
                changes.clone(),
            )),
            messaging: Arc::new(Messaging::new(messages, profiles, notifier, changes.clone())),
            changes,
        }
    }
}
