use crate::domain::ScoreContext;
use rand::Rng;

pub const SCORE_FLOOR: i32 = 65;
pub const SCORE_CEILING: i32 = 95;

/// Boundary for pitch scoring so a real model can replace the placeholder
/// without touching the normalization pipeline.
pub trait ScoringProvider: Send + Sync {
    fn score(&self, context: &ScoreContext) -> i32;
    fn summarize(&self, context: &ScoreContext) -> String;
}

/// Placeholder backend: a pseudo-random score and one templated sentence.
/// Not an inference call.
pub struct SynthesizedScoring;

impl ScoringProvider for SynthesizedScoring {
    fn score(&self, _context: &ScoreContext) -> i32 {
        rand::thread_rng().gen_range(SCORE_FLOOR..SCORE_CEILING)
    }

    fn summarize(&self, context: &ScoreContext) -> String {
        format!(
            "{} is raising {} at the {} stage. {}",
            context.company_name, context.funding_amount, context.funding_stage, context.description
        )
    }
}
