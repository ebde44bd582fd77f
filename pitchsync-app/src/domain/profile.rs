use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Founder,
    Investor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Founder => "founder",
            Self::Investor => "investor",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "investor" => Self::Investor,
            _ => Self::Founder,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: uuid::Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Profile {
    pub fn new(id: uuid::Uuid, email: String, display_name: String, role: Role) -> Self {
        Self {
            id,
            email,
            display_name,
            role,
            created_at: None,
        }
    }
}
