use crate::extract::CurrentUser;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pitchsync_app::domain::{Conversation, Message};
use pitchsync_app::AppContext;
use pitchsync_errors::AppError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SendRequest {
    pub receiver_id: Uuid,
    #[serde(default)]
    pub pitch_id: Option<Uuid>,
    pub content: String,
}

pub async fn conversations(
    State(context): State<AppContext>,
    user: CurrentUser,
) -> Result<Json<Vec<Conversation>>, AppError> {
    Ok(Json(context.messaging.conversations(Some(user.id)).await?))
}

pub async fn send(
    State(context): State<AppContext>,
    user: CurrentUser,
    Json(request): Json<SendRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = context
        .messaging
        .send(
            Some(user.id),
            request.receiver_id,
            request.pitch_id,
            &request.content,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn unread_count(
    State(context): State<AppContext>,
    user: CurrentUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let count = context.messaging.unread_count(Some(user.id)).await?;
    Ok(Json(serde_json::json!({ "count": count })))
}

pub async fn thread(
    State(context): State<AppContext>,
    user: CurrentUser,
    Path(counterpart_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(
        context
            .messaging
            .thread(Some(user.id), counterpart_id)
            .await?,
    ))
}

pub async fn mark_read(
    State(context): State<AppContext>,
    user: CurrentUser,
    Path(counterpart_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = context
        .messaging
        .mark_thread_read(Some(user.id), counterpart_id)
        .await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}
