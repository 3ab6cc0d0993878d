//! Row and auth payload types mirrored from the hosted backend schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile row (`profiles` table).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Conversation row (`conversations` table).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Conversation {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Persisted chat message row (`messages` table).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoredMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Role of a persisted message. The system prompt is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl From<MessageRole> for crate::llm::ChatRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => crate::llm::ChatRole::User,
            MessageRole::Assistant => crate::llm::ChatRole::Assistant,
        }
    }
}

/// Subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Premium,
}

impl Plan {
    /// Storage value of the plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => crate::constants::plan::BASIC,
            Plan::Premium => crate::constants::plan::PREMIUM,
        }
    }

    /// Localized display name.
    pub fn label(&self) -> String {
        match self {
            Plan::Basic => rust_i18n::t!("plan.basic").to_string(),
            Plan::Premium => rust_i18n::t!("plan.premium").to_string(),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            other => Err(format!("Unknown plan: '{}'", other)),
        }
    }
}

/// Subscription row (`subscriptions` table).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub plan: Plan,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Authenticated user as returned by the auth endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Locally persisted session.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: String,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether the access token is past its recorded expiry.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() >= at,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_plan_round_trip() {
        assert_eq!("premium".parse::<Plan>().unwrap(), Plan::Premium);
        assert_eq!("Basic".parse::<Plan>().unwrap(), Plan::Basic);
        assert!("gold".parse::<Plan>().is_err());
        assert_eq!(Plan::Premium.to_string(), "premium");
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            access_token: "t".into(),
            refresh_token: None,
            user_id: "u".into(),
            email: None,
            expires_at: Some(Utc::now() - chrono::Duration::minutes(1)),
        };
        assert!(session.is_expired());

        let fresh = Session {
            expires_at: Some(Utc::now() + chrono::Duration::hours(1)),
            ..session.clone()
        };
        assert!(!fresh.is_expired());

        let unknown = Session {
            expires_at: None,
            ..session
        };
        assert!(!unknown.is_expired());
    }
}
