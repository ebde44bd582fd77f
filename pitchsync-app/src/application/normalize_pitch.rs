use crate::domain::{
    Pitch, PitchStatus, QuestionAnswer, ScoreContext, PITCH_QUESTIONS, PLACEHOLDER_DECK_URL,
    UNKNOWN_FOUNDER,
};
use crate::infrastructure::db::entities::{pitch, profile};
use crate::infrastructure::scoring::ScoringProvider;

/// Turns a raw pitch row plus its (possibly missing) owner profile into a
/// fully-populated view model. Absent fields become defaults; this never
/// fails.
///
/// The five answers map positionally onto the fixed question list, in column
/// order: problem, solution, traction, team, growth.
pub fn normalize_pitch(
    record: pitch::Model,
    owner: Option<&profile::Model>,
    scoring: &dyn ScoringProvider,
) -> Pitch {
    let answers = [
        record.problem.unwrap_or_default(),
        record.solution.unwrap_or_default(),
        record.traction.unwrap_or_default(),
        record.team.unwrap_or_default(),
        record.growth.unwrap_or_default(),
    ];
    let questions = PITCH_QUESTIONS
        .iter()
        .zip(answers)
        .map(|(question, answer)| QuestionAnswer {
            question: (*question).to_string(),
            answer,
        })
        .collect();

    let (founder_name, founder_email) = match owner {
        Some(profile) => (profile.display_name.clone(), profile.email.clone()),
        None => (UNKNOWN_FOUNDER.to_string(), String::new()),
    };

    let context = ScoreContext {
        company_name: record.company_name.clone(),
        description: record.description.unwrap_or_default(),
        funding_amount: format_funding_amount(record.funding_amount),
        funding_stage: record.funding_stage.unwrap_or_default(),
    };

    // A persisted score wins; the summary is always rebuilt from the template.
    let ai_score = record.ai_score.unwrap_or_else(|| scoring.score(&context));
    let ai_summary = scoring.summarize(&context);

    Pitch {
        id: record.id,
        owner_id: record.owner_id,
        founder_name,
        founder_email,
        company_name: record.company_name,
        industry: record.industry.unwrap_or_default(),
        location: record.location.unwrap_or_default(),
        funding_stage: context.funding_stage,
        funding_amount: context.funding_amount,
        description: context.description,
        questions,
        deck_url: record
            .deck_url
            .unwrap_or_else(|| PLACEHOLDER_DECK_URL.to_string()),
        video_url: record.video_url,
        ai_score,
        ai_summary,
        status: PitchStatus::parse(&record.status),
        created_at: record.created_at,
    }
}

/// Display form of the stored numeric amount. Whatever formatting the founder
/// typed (currency symbol, separators) did not survive storage; only the
/// number comes back.
pub fn format_funding_amount(amount: Option<f64>) -> String {
    match amount {
        None => String::new(),
        Some(value) => {
            // f64 keeps integers exact below 2^53
            if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
                format!("{}", value as i64)
            } else {
                value.to_string()
            }
        }
    }
}

/// Strips everything but digits and dots, then parses. "$1,500,000" comes out
/// as 1500000; text without digits comes out as nothing.
pub fn parse_funding_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
