use crate::extract::{bearer_token, CurrentUser};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use pitchsync_app::domain::{Profile, Role};
use pitchsync_app::infrastructure::auth::SignOutScope;
use pitchsync_app::AppContext;
use pitchsync_errors::AppError;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignOutRequest {
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub profile: Profile,
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub user: CurrentUser,
    pub profile: Profile,
}

pub async fn sign_up(
    State(context): State<AppContext>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::Validation("Display name is required".to_string()));
    }
    let role = request
        .role
        .as_deref()
        .map(Role::parse)
        .unwrap_or(Role::Founder);

    let session = context
        .identity
        .sign_up(&request.email, &request.password, display_name, role)
        .await?;

    let profile = Profile::new(
        session.user.id,
        session.user.email.clone(),
        display_name.to_string(),
        role,
    );
    let stored = context
        .profiles
        .upsert(&profile)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    tracing::info!("new {} account: {}", stored.role, session.user.id);

    Ok(Json(SessionResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        profile: stored.into(),
    }))
}

pub async fn sign_in(
    State(context): State<AppContext>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = context
        .identity
        .sign_in(&request.email, &request.password)
        .await?;

    let profile = context
        .profiles
        .find_by_id(session.user.id)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?
        .ok_or(AppError::ProfileNotFound)?;

    Ok(Json(SessionResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        profile: profile.into(),
    }))
}

pub async fn sign_out(
    State(context): State<AppContext>,
    headers: HeaderMap,
    request: Option<Json<SignOutRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::NotAuthenticated)?;
    let scope = request
        .and_then(|Json(body)| body.scope)
        .map(|value| SignOutScope::parse(&value))
        .unwrap_or(SignOutScope::Global);
    context.identity.sign_out(token, scope).await?;
    tracing::info!("signed out ({})", scope.as_str());
    Ok(Json(serde_json::json!({ "signed_out": true })))
}

pub async fn session(
    State(context): State<AppContext>,
    user: CurrentUser,
) -> Result<Json<AccountResponse>, AppError> {
    let profile = context
        .profiles
        .find_by_id(user.id)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?
        .ok_or(AppError::ProfileNotFound)?;
    Ok(Json(AccountResponse {
        user,
        profile: profile.into(),
    }))
}
