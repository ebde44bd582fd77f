mod conversation;
mod message;
mod pitch;
mod profile;
mod upload;

pub use conversation::{Conversation, UNKNOWN_ROLE, UNKNOWN_USER};
pub use message::Message;
pub use pitch::{
    NewPitch, PersistedPitch, Pitch, PitchStatus, QuestionAnswer, ReviewAction, ScoreContext,
    PITCH_QUESTIONS, PLACEHOLDER_DECK_URL, UNKNOWN_FOUNDER,
};
pub use profile::{Profile, Role};
pub use upload::UploadKind;
