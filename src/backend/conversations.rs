//! Conversation and message storage.

use chrono::Utc;
use serde_json::json;

use super::types::{Conversation, MessageRole, StoredMessage};
use super::{BackendClient, eq};
use crate::error::Result;

impl BackendClient {
    /// Generates the next automatic session title ("Session #N",
    /// localized) from the user's conversation count.
    pub async fn generate_conversation_title(&self, user_id: &str) -> String {
        #[derive(serde::Deserialize)]
        struct IdRow {
            #[allow(dead_code)]
            id: String,
        }

        let count = match self
            .get_rows::<IdRow>(
                "conversations",
                &[("select", "id".to_string()), ("user_id", eq(user_id))],
            )
            .await
        {
            Ok(rows) => rows.len(),
            Err(e) => {
                tracing::warn!("Failed to count conversations: {}", e);
                0
            }
        };

        rust_i18n::t!("chat.session_title", n = count + 1).to_string()
    }

    /// Creates a conversation; a missing title is generated automatically.
    pub async fn create_conversation(
        &self,
        user_id: &str,
        title: Option<&str>,
    ) -> Result<Conversation> {
        let title = match title {
            Some(t) => t.to_string(),
            None => self.generate_conversation_title(user_id).await,
        };

        self.insert_row(
            "conversations",
            json!({ "user_id": user_id, "title": title }),
        )
        .await
    }

    /// Lists the user's conversations, newest first.
    pub async fn list_conversations(&self, user_id: &str) -> Result<Vec<Conversation>> {
        self.get_rows(
            "conversations",
            &[
                ("select", "*".to_string()),
                ("user_id", eq(user_id)),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    /// Fetches one conversation owned by the user.
    pub async fn get_conversation(&self, id: &str, user_id: &str) -> Result<Conversation> {
        self.get_row(
            "conversations",
            &[
                ("select", "*".to_string()),
                ("id", eq(id)),
                ("user_id", eq(user_id)),
            ],
        )
        .await
    }

    /// Renames a conversation and touches its `updated_at`.
    pub async fn rename_conversation(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
    ) -> Result<Conversation> {
        self.update_row(
            "conversations",
            &[("id", eq(id)), ("user_id", eq(user_id))],
            json!({ "title": title, "updated_at": Utc::now().to_rfc3339() }),
        )
        .await
    }

    /// Deletes a conversation owned by the user.
    pub async fn delete_conversation(&self, id: &str, user_id: &str) -> Result<()> {
        self.delete_rows("conversations", &[("id", eq(id)), ("user_id", eq(user_id))])
            .await
    }

    /// Appends a message to a conversation.
    pub async fn add_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage> {
        self.insert_row(
            "messages",
            json!({
                "conversation_id": conversation_id,
                "role": role,
                "content": content,
            }),
        )
        .await
    }

    /// Lists a conversation's messages, oldest first.
    pub async fn list_messages(&self, conversation_id: &str) -> Result<Vec<StoredMessage>> {
        self.get_rows(
            "messages",
            &[
                ("select", "*".to_string()),
                ("conversation_id", eq(conversation_id)),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }
}
