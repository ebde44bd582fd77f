use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Pitch not found")]
    PitchNotFound,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Identity service error: {0}")]
    Identity(String),

    #[error("Storage service error: {0}")]
    Storage(String),

    #[error("Notification dispatch failed: {0}")]
    Notification(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::NotAuthenticated => "You need to sign in to do that.",
            Self::PitchNotFound => "That pitch does not exist.",
            Self::ProfileNotFound => "That profile does not exist.",
            Self::Validation(_) => "Some fields are invalid. Check the form and try again.",
            Self::Identity(_) => "The sign-in service is unavailable. Try again later.",
            Self::Storage(_) => "File upload is unavailable. Try again later.",
            Self::Notification(_) => "The notification could not be sent.",
            Self::Store(_) => "Something went wrong saving your data. Try again.",
            Self::Internal(_) => "Something went wrong on our side. Try again later.",
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, self.user_message().to_string())
            }
            AppError::PitchNotFound => (StatusCode::NOT_FOUND, self.user_message().to_string()),
            AppError::ProfileNotFound => (StatusCode::NOT_FOUND, self.user_message().to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Identity(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Storage(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Notification(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}
