mod auth;
mod messages;
mod pitches;
mod profiles;
mod realtime;
mod uploads;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use pitchsync_app::domain::UploadKind;
use pitchsync_app::AppContext;
use serde_json::{json, Value};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/signup", post(auth::sign_up))
        .route("/api/auth/signin", post(auth::sign_in))
        .route("/api/auth/signout", post(auth::sign_out))
        .route("/api/auth/session", get(auth::session))
        .route("/api/profiles", get(profiles::list))
        .route("/api/profiles/{id}", get(profiles::get_one))
        .route("/api/pitches", get(pitches::list).post(pitches::create))
        .route("/api/pitches/mine", get(pitches::mine))
        .route("/api/pitches/{id}", get(pitches::get_one))
        .route("/api/pitches/{id}/status", post(pitches::set_status))
        .route("/api/conversations", get(messages::conversations))
        .route("/api/messages", post(messages::send))
        .route("/api/messages/unread/count", get(messages::unread_count))
        .route("/api/messages/{counterpart_id}", get(messages::thread))
        .route(
            "/api/messages/{counterpart_id}/read",
            post(messages::mark_read),
        )
        .route(
            "/api/uploads/deck",
            post(uploads::deck).layer(upload_body_limit()),
        )
        .route(
            "/api/uploads/video",
            post(uploads::video).layer(upload_body_limit()),
        )
        .route("/api/realtime", get(realtime::subscribe))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(context)
}

/// Multipart bodies carry the whole file, so both upload routes get the
/// video ceiling; per-kind size rules are enforced after the field is read.
fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(UploadKind::Video.max_bytes() + 1024 * 1024)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pitchsync_app::AppConfig;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    fn test_context() -> AppContext {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            database_url: "postgres://unused".to_string(),
            identity_url: "http://identity.invalid".to_string(),
            storage_url: "http://storage.invalid".to_string(),
            functions_url: "http://functions.invalid".to_string(),
            service_api_key: "test-key".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        AppContext::new(&config, db)
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let app = router(test_context());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        for uri in [
            "/api/conversations",
            "/api/pitches",
            "/api/messages/unread/count",
        ] {
            let app = router(test_context());
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = router(test_context());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/nonsense")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
