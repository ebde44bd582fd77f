mod identity_client;

pub use identity_client::{AuthSession, AuthUser, IdentityClient, SignOutScope};
