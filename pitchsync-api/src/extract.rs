use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use pitchsync_app::AppContext;
use pitchsync_errors::AppError;
use serde::Serialize;

/// Account behind the request's bearer token. Resolution goes through the
/// identity provider on every request, so a revoked token stops working
/// immediately.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: uuid::Uuid,
    pub email: String,
}

impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        context: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::NotAuthenticated)?;
        let user = context.identity.get_session(token).await?;
        Ok(CurrentUser {
            id: user.id,
            email: user.email,
        })
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}
