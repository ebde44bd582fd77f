use pitchsync_errors::AppError;
use serde::{Deserialize, Serialize};

const DECK_CONTENT_TYPES: &[&str] = &["application/pdf"];
const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4", "video/quicktime", "video/x-msvideo"];

const DECK_MAX_BYTES: usize = 10 * 1024 * 1024;
const VIDEO_MAX_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Deck,
    Video,
}

impl UploadKind {
    pub fn bucket(&self) -> &'static str {
        match self {
            Self::Deck => "pitch-decks",
            Self::Video => "pitch-videos",
        }
    }

    pub fn max_bytes(&self) -> usize {
        match self {
            Self::Deck => DECK_MAX_BYTES,
            Self::Video => VIDEO_MAX_BYTES,
        }
    }

    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            Self::Deck => DECK_CONTENT_TYPES,
            Self::Video => VIDEO_CONTENT_TYPES,
        }
    }

    /// Checked before any byte leaves the process.
    pub fn validate(&self, content_type: &str, size: usize) -> Result<(), AppError> {
        let content_type = content_type.to_lowercase();
        if !self
            .allowed_content_types()
            .contains(&content_type.as_str())
        {
            return Err(AppError::Validation(match self {
                Self::Deck => "Pitch decks must be PDF files".to_string(),
                Self::Video => "Videos must be MP4, MOV or AVI files".to_string(),
            }));
        }
        if size == 0 {
            return Err(AppError::Validation("The uploaded file is empty".to_string()));
        }
        if size > self.max_bytes() {
            let limit_mb = self.max_bytes() / (1024 * 1024);
            return Err(AppError::Validation(format!(
                "File is too large (limit is {}MB)",
                limit_mb
            )));
        }
        Ok(())
    }
}
