use serde::{Deserialize, Serialize};

/// Question text shown for each of the five pitch answers. The pairing with
/// the problem/solution/traction/team/growth columns is positional and fixed.
pub const PITCH_QUESTIONS: [&str; 5] = [
    "What problem are you solving?",
    "What is your solution?",
    "What traction do you have?",
    "Who is on the team?",
    "How will you grow?",
];

pub const PLACEHOLDER_DECK_URL: &str = "/assets/placeholder-deck.pdf";

pub const UNKNOWN_FOUNDER: &str = "Unknown Founder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchStatus {
    New,
    Shortlisted,
    Rejected,
    Forwarded,
}

impl PitchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Forwarded => "forwarded",
        }
    }

    /// Unrecognized values fall back to New rather than failing.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "shortlisted" => Self::Shortlisted,
            "rejected" => Self::Rejected,
            "forwarded" => Self::Forwarded,
            _ => Self::New,
        }
    }
}

impl Default for PitchStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Target states an investor can ask for. Setting a pitch back to `new` is
/// not a review action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Shortlisted,
    Rejected,
    Forwarded,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        self.status().as_str()
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "shortlisted" => Some(Self::Shortlisted),
            "rejected" => Some(Self::Rejected),
            "forwarded" => Some(Self::Forwarded),
            _ => None,
        }
    }

    pub fn status(&self) -> PitchStatus {
        match self {
            Self::Shortlisted => PitchStatus::Shortlisted,
            Self::Rejected => PitchStatus::Rejected,
            Self::Forwarded => PitchStatus::Forwarded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Fully-populated pitch as the rest of the system consumes it. Every field
/// is present; absent persisted values have already been defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitch {
    pub id: uuid::Uuid,
    pub owner_id: uuid::Uuid,
    pub founder_name: String,
    pub founder_email: String,
    pub company_name: String,
    pub industry: String,
    pub location: String,
    pub funding_stage: String,
    pub funding_amount: String,
    pub description: String,
    pub questions: Vec<QuestionAnswer>,
    pub deck_url: String,
    pub video_url: Option<String>,
    pub ai_score: i32,
    pub ai_summary: String,
    pub status: PitchStatus,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Submission payload as the founder typed it, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPitch {
    pub company_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub funding_stage: String,
    pub funding_amount: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub traction: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub growth: String,
    pub deck_url: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Row shape handed to the repository on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedPitch {
    pub id: uuid::Uuid,
    pub owner_id: uuid::Uuid,
    pub company_name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub funding_stage: Option<String>,
    pub funding_amount: Option<f64>,
    pub description: Option<String>,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub traction: Option<String>,
    pub team: Option<String>,
    pub growth: Option<String>,
    pub deck_url: Option<String>,
    pub video_url: Option<String>,
    pub ai_score: i32,
    pub ai_summary: String,
    pub status: PitchStatus,
}

impl PersistedPitch {
    pub fn new(
        owner_id: uuid::Uuid,
        input: &NewPitch,
        funding_amount: Option<f64>,
        ai_score: i32,
        ai_summary: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            owner_id,
            company_name: input.company_name.trim().to_string(),
            industry: non_empty(&input.industry),
            location: non_empty(&input.location),
            funding_stage: non_empty(&input.funding_stage),
            funding_amount,
            description: non_empty(&input.description),
            problem: non_empty(&input.problem),
            solution: non_empty(&input.solution),
            traction: non_empty(&input.traction),
            team: non_empty(&input.team),
            growth: non_empty(&input.growth),
            deck_url: non_empty(&input.deck_url),
            video_url: input.video_url.as_deref().and_then(non_empty),
            ai_score,
            ai_summary,
            status: PitchStatus::New,
        }
    }
}

/// The facts a scoring backend sees about a pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreContext {
    pub company_name: String,
    pub description: String,
    pub funding_amount: String,
    pub funding_stage: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
