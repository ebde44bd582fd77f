use crate::extract::CurrentUser;
use axum::extract::{Path, Query, State};
use axum::Json;
use pitchsync_app::domain::{Profile, Role};
use pitchsync_app::AppContext;
use pitchsync_errors::AppError;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub role: Option<String>,
}

pub async fn list(
    State(context): State<AppContext>,
    _user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let rows = match query.role.as_deref() {
        Some(role) => context.profiles.find_by_role(Role::parse(role)).await,
        None => context.profiles.list().await,
    }
    .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(rows.into_iter().map(Profile::from).collect()))
}

pub async fn get_one(
    State(context): State<AppContext>,
    _user: CurrentUser,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<Profile>, AppError> {
    let profile = context
        .profiles
        .find_by_id(id)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?
        .ok_or(AppError::ProfileNotFound)?;
    Ok(Json(profile.into()))
}
