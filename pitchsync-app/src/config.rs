#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub identity_url: String,
    pub storage_url: String,
    pub functions_url: String,
    pub service_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            identity_url: std::env::var("IDENTITY_URL").expect("IDENTITY_URL must be set"),
            storage_url: std::env::var("STORAGE_URL").expect("STORAGE_URL must be set"),
            functions_url: std::env::var("FUNCTIONS_URL").expect("FUNCTIONS_URL must be set"),
            service_api_key: std::env::var("SERVICE_API_KEY").expect("SERVICE_API_KEY must be set"),
        }
    }
}
