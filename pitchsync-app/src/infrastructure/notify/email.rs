use super::{MessageNotice, Notifier, PitchActionNotice};
use async_trait::async_trait;
use pitchsync_errors::AppError;
use serde::Serialize;

const PITCH_NOTIFICATION_FN: &str = "send-pitch-notification";
const MESSAGE_NOTIFICATION_FN: &str = "send-message-notification";

/// Invokes the hosted serverless functions that render and send the emails.
#[derive(Clone)]
pub struct EmailNotifier {
    http_client: reqwest::Client,
    functions_url: String,
    api_key: String,
}

impl EmailNotifier {
    pub fn new(functions_url: String, api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            functions_url: functions_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn invoke<T: Serialize>(&self, function: &str, payload: &T) -> Result<(), AppError> {
        let response = self
            .http_client
            .post(format!("{}/{}", self.functions_url, function))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Notification(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{} error: {} - {}", function, status, body);
            return Err(AppError::Notification(format!(
                "{} returned {}",
                function, status
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn pitch_action(&self, notice: &PitchActionNotice) -> Result<(), AppError> {
        self.invoke(PITCH_NOTIFICATION_FN, notice).await
    }

    async fn message_received(&self, notice: &MessageNotice) -> Result<(), AppError> {
        self.invoke(MESSAGE_NOTIFICATION_FN, notice).await
    }
}
