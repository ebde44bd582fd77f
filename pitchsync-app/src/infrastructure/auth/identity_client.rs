use crate::domain::Role;
use pitchsync_errors::AppError;
use serde::{Deserialize, Serialize};

/// Account as the hosted identity provider reports it. The id is the foreign
/// key for every owned record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: uuid::Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// How far a sign-out reaches: every session, just the presented token, or
/// every session except the presented one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutScope {
    Global,
    Local,
    Others,
}

impl SignOutScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
            Self::Others => "others",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "local" => Self::Local,
            "others" => Self::Others,
            _ => Self::Global,
        }
    }
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpUserData<'a> {
    display_name: &'a str,
    role: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpUserData<'a>,
}

#[derive(Debug, Serialize)]
struct SignOutRequest {
    scope: &'static str,
}

#[derive(Clone)]
pub struct IdentityClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Creates the account and returns a live session. Display name and role
    /// ride along as user metadata so the provider echoes them back on
    /// session lookups.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> Result<AuthSession, AppError> {
        validate_credentials(email, password)?;

        let response = self
            .http_client
            .post(format!("{}/sign-up", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .json(&SignUpRequest {
                email,
                password,
                data: SignUpUserData {
                    display_name,
                    role: role.as_str(),
                },
            })
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        if response.status().is_client_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("sign-up rejected: {}", body);
            return Err(AppError::Validation(
                "Sign-up was rejected. The email may already be in use.".to_string(),
            ));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("identity sign-up error: {} - {}", status, body);
            return Err(AppError::Identity(format!("sign-up failed: {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        validate_credentials(email, password)?;

        let response = self
            .http_client
            .post(format!("{}/sign-in", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        if response.status().is_client_error() {
            return Err(AppError::Validation("Invalid email or password".to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("identity sign-in error: {} - {}", status, body);
            return Err(AppError::Identity(format!("sign-in failed: {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))
    }

    pub async fn sign_out(&self, access_token: &str, scope: SignOutScope) -> Result<(), AppError> {
        let response = self
            .http_client
            .post(format!("{}/sign-out", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .bearer_auth(access_token)
            .json(&SignOutRequest {
                scope: scope.as_str(),
            })
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        // 401 means the token was already dead, which is a successful
        // sign-out from the caller's point of view.
        if !response.status().is_success() && response.status().as_u16() != 401 {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("identity sign-out error: {} - {}", status, body);
            return Err(AppError::Identity(format!("sign-out failed: {}", status)));
        }

        Ok(())
    }

    /// Resolves a bearer token to the account it belongs to. An expired or
    /// unknown token comes back as NotAuthenticated, not a provider error.
    pub async fn get_session(&self, access_token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .http_client
            .get(format!("{}/user", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        if response.status().as_u16() == 401 {
            return Err(AppError::NotAuthenticated);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("identity session error: {} - {}", status, body);
            return Err(AppError::Identity(format!("session lookup failed: {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if !looks_like_email(email) {
        return Err(AppError::Validation("Enter a valid email address".to_string()));
    }
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

fn looks_like_email(input: &str) -> bool {
    regex_lite::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map(|re| re.is_match(input))
        .unwrap_or(false)
}
