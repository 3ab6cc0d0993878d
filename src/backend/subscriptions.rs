//! Subscription-plan storage.

use chrono::Utc;
use serde_json::json;

use super::types::{Plan, Subscription};
use super::{BackendClient, eq};
use crate::error::Result;

impl BackendClient {
    /// Returns the user's subscription, if one exists.
    pub async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>> {
        let rows: Vec<Subscription> = self
            .get_rows(
                "subscriptions",
                &[("select", "*".to_string()), ("user_id", eq(user_id))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Creates a subscription on the given plan.
    pub async fn create_subscription(&self, user_id: &str, plan: Plan) -> Result<Subscription> {
        let now = Utc::now().to_rfc3339();
        self.insert_row(
            "subscriptions",
            json!({
                "user_id": user_id,
                "plan": plan,
                "status": "active",
                "created_at": now,
                "updated_at": now,
            }),
        )
        .await
    }

    /// Switches the user's subscription to another plan.
    pub async fn change_plan(&self, user_id: &str, plan: Plan) -> Result<Subscription> {
        self.update_row(
            "subscriptions",
            &[("user_id", eq(user_id))],
            json!({ "plan": plan, "updated_at": Utc::now().to_rfc3339() }),
        )
        .await
    }

    /// Returns the user's subscription, creating one on the given plan if
    /// none exists yet.
    pub async fn ensure_subscription(&self, user_id: &str, plan: Plan) -> Result<Subscription> {
        match self.get_subscription(user_id).await? {
            Some(subscription) => Ok(subscription),
            None => self.create_subscription(user_id, plan).await,
        }
    }
}
