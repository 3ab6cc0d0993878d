//! Profile storage.

use chrono::Utc;
use serde_json::json;

use super::types::Profile;
use super::{BackendClient, eq};
use crate::error::Result;

impl BackendClient {
    /// Fetches one profile by user id.
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        self.get_row(
            "profiles",
            &[("select", "*".to_string()), ("id", eq(user_id))],
        )
        .await
    }

    /// Updates the display fields of a profile.
    pub async fn update_profile(
        &self,
        user_id: &str,
        full_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Profile> {
        let mut body = serde_json::Map::new();
        if let Some(name) = full_name {
            body.insert("full_name".to_string(), json!(name));
        }
        if let Some(url) = avatar_url {
            body.insert("avatar_url".to_string(), json!(url));
        }
        body.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        self.update_row("profiles", &[("id", eq(user_id))], body).await
    }

    /// Lists all profiles (admin dashboard; the backend's row policy
    /// decides who may actually see them).
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.get_rows("profiles", &[("select", "*".to_string())])
            .await
    }
}
