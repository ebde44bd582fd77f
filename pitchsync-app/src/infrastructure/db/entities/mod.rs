pub mod message;
pub mod pitch;
pub mod profile;

pub use message::Entity as Message;
pub use pitch::Entity as Pitch;
pub use profile::Entity as Profile;
