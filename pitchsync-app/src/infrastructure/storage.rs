use crate::domain::UploadKind;
use pitchsync_errors::AppError;

/// Client for the hosted object store. Uploads land in a per-kind bucket and
/// come back as a public URL the pitch record stores verbatim.
#[derive(Clone)]
pub struct StorageClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StorageClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub async fn upload(
        &self,
        kind: UploadKind,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        kind.validate(content_type, bytes.len())?;

        let object_name = format!("{}-{}", uuid::Uuid::new_v4(), sanitize_file_name(file_name));
        let object_url = format!(
            "{}/objects/{}/{}",
            self.base_url,
            kind.bucket(),
            urlencoding::encode(&object_name)
        );

        let response = self
            .http_client
            .post(&object_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("storage upload error: {} - {}", status, body);
            return Err(AppError::Storage(format!("upload failed: {}", status)));
        }

        Ok(object_url)
    }
}

/// Object names are flat; anything that could smuggle path segments or
/// control characters is stripped.
fn sanitize_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .take(100)
        .collect();

    if safe.is_empty() {
        "file".to_string()
    } else {
        safe
    }
}
