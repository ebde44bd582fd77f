use crate::extract::CurrentUser;
use axum::extract::{Multipart, State};
use axum::Json;
use pitchsync_app::domain::UploadKind;
use pitchsync_app::AppContext;
use pitchsync_errors::AppError;
use serde::Serialize;

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

pub async fn deck(
    State(context): State<AppContext>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    upload(context, user, UploadKind::Deck, multipart).await
}

pub async fn video(
    State(context): State<AppContext>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    upload(context, user, UploadKind::Video, multipart).await
}

async fn upload(
    context: AppContext,
    user: CurrentUser,
    kind: UploadKind,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("file").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;

        tracing::info!(
            "{} upload from {}: {} ({} bytes)",
            kind.bucket(),
            user.id,
            file_name,
            bytes.len()
        );

        let url = context
            .storage
            .upload(kind, &file_name, &content_type, bytes.to_vec())
            .await?;
        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::Validation(
        "The request did not include a file field".to_string(),
    ))
}
