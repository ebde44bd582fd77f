mod browse_pitches;
mod conversations;
mod messaging;
mod normalize_pitch;
mod review_pitch;
mod submit_pitch;

pub use browse_pitches::BrowsePitches;
pub use conversations::{group_by_counterpart, ConversationSeed};
pub use messaging::Messaging;
pub use normalize_pitch::{format_funding_amount, normalize_pitch, parse_funding_amount};
pub use review_pitch::ReviewPitch;
pub use submit_pitch::SubmitPitch;
