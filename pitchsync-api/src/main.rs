use pitchsync_app::infrastructure::db::{create_connection, run_migrations};
use pitchsync_app::{AppConfig, AppContext};

mod extract;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env();

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");
    run_migrations(&db).await.expect("Failed to run migrations");

    let context = AppContext::new(&config, db);
    let app = routes::router(context);

    tracing::info!("Listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
