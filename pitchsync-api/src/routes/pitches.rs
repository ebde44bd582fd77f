use crate::extract::CurrentUser;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pitchsync_app::domain::{NewPitch, Pitch, ReviewAction};
use pitchsync_app::AppContext;
use pitchsync_errors::AppError;
use serde::Deserialize;
use uuid::Uuid;

pub async fn list(
    State(context): State<AppContext>,
    _user: CurrentUser,
) -> Result<Json<Vec<Pitch>>, AppError> {
    Ok(Json(context.browse_pitches.list().await?))
}

pub async fn create(
    State(context): State<AppContext>,
    user: CurrentUser,
    Json(request): Json<NewPitch>,
) -> Result<(StatusCode, Json<Pitch>), AppError> {
    let pitch = context.submit_pitch.execute(Some(user.id), &request).await?;
    Ok((StatusCode::CREATED, Json(pitch)))
}

pub async fn mine(
    State(context): State<AppContext>,
    user: CurrentUser,
) -> Result<Json<Vec<Pitch>>, AppError> {
    Ok(Json(
        context.browse_pitches.list_for_owner(Some(user.id)).await?,
    ))
}

pub async fn get_one(
    State(context): State<AppContext>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Pitch>, AppError> {
    Ok(Json(context.browse_pitches.get(id).await?))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn set_status(
    State(context): State<AppContext>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Pitch>, AppError> {
    let action = ReviewAction::parse(&request.status).ok_or_else(|| {
        AppError::Validation(format!("Unknown review action: {}", request.status))
    })?;
    let pitch = context
        .review_pitch
        .execute(Some(user.id), id, action, request.notes.as_deref())
        .await?;
    Ok(Json(pitch))
}
